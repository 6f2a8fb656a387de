//! Logging capability consumed by the store.
//!
//! The store does not log through a global; it is handed a [`Logger`] at
//! construction time and emits severity-leveled events (an event name plus a
//! structured payload) through it. The default [`ConsoleLogger`] forwards to
//! `tracing`; [`NoopLogger`] discards everything, which keeps tests quiet.

use serde_json::Value as Payload;

/// A severity-leveled, structured event sink.
///
/// Each method takes an event name (a short dotted category such as
/// `record.created`) and an arbitrary JSON payload for structured inspection.
/// No format is imposed beyond event name + payload.
pub trait Logger: Send + Sync {
    /// Emits a debug-level event.
    fn debug(&self, event: &str, payload: Payload);

    /// Emits an info-level event.
    fn info(&self, event: &str, payload: Payload);

    /// Emits a warn-level event.
    fn warn(&self, event: &str, payload: Payload);

    /// Emits an error-level event.
    fn error(&self, event: &str, payload: Payload);
}

/// Default logger: forwards events to the `tracing` ecosystem at the
/// matching level.
///
/// Subscribers installed by the host application decide formatting and
/// destination; with no subscriber installed, events are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn debug(&self, event: &str, payload: Payload) {
        tracing::debug!(event, %payload);
    }

    fn info(&self, event: &str, payload: Payload) {
        tracing::info!(event, %payload);
    }

    fn warn(&self, event: &str, payload: Payload) {
        tracing::warn!(event, %payload);
    }

    fn error(&self, event: &str, payload: Payload) {
        tracing::error!(event, %payload);
    }
}

/// A logger that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _event: &str, _payload: Payload) {}

    fn info(&self, _event: &str, _payload: Payload) {}

    fn warn(&self, _event: &str, _payload: Payload) {}

    fn error(&self, _event: &str, _payload: Payload) {}
}
