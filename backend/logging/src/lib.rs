//! Telemetry and structured logging components for medrelay.
//!
//! Handles log redaction, JSON file output, and relay event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, RelayEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
