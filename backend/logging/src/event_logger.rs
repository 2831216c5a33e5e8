//! Relay Event Logger
//!
//! One structured event per finished request, emitted on the `relay_events`
//! target so it can be filtered or routed separately from request traces.
//! Measurement values and OCR text are never logged, only counts and labels.

use serde::Serialize;
use tracing::{info, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum RelayEvent {
    PredictionRelayed {
        predictor: String,
        label: String,
        latency_ms: u64,
    },
    FieldsExtracted {
        extractor: String,
        fields_found: usize,
        text_chars: usize,
        latency_ms: u64,
    },
    Failed {
        route: String,
        kind: String,
        message: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub event: RelayEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redacts free-text fields and hands the event to `tracing`.
    pub fn log_event(request_id: &str, mut event: RelayEvent) {
        if let RelayEvent::Failed { message, .. } = &mut event {
            *message = redact_sensitive_data(message);
        }

        let failed = matches!(event, RelayEvent::Failed { .. });
        let entry = EventLogEntry {
            request_id: request_id.into(),
            event,
        };

        if failed {
            warn!(target: "relay_events", event = ?entry, "Relay event");
        } else {
            info!(target: "relay_events", event = ?entry, "Relay event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_type_tag() {
        let entry = EventLogEntry {
            request_id: "req-1".into(),
            event: RelayEvent::FieldsExtracted {
                extractor: "tesseract".into(),
                fields_found: 3,
                text_chars: 40,
                latency_ms: 12,
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["type"], "FieldsExtracted");
        assert_eq!(json["event"]["fields_found"], 3);
    }
}
