//! Widget event observers
//!
//! The widget reports what it is doing through DOM events. Each event kind
//! maps to one [`WidgetObserver`] method.

use serde::Deserialize;
use serde_json::Value;

/// Captured when an error event carries no message
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected ChatKit error. Check console for details.";

/// Event emitted by the widget
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEvent")]
pub enum WidgetEvent {
    /// `chatkit.error`
    Error { message: Option<String> },
    /// `chatkit.response.start`
    ResponseStart,
    /// `chatkit.response.end`
    ResponseEnd,
    /// `chatkit.log`
    Log { name: String, data: Option<Value> },
}

impl WidgetEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WidgetEvent::Error { .. } => "chatkit.error",
            WidgetEvent::ResponseStart => "chatkit.response.start",
            WidgetEvent::ResponseEnd => "chatkit.response.end",
            WidgetEvent::Log { .. } => "chatkit.log",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    detail: Value,
}

impl TryFrom<RawEvent> for WidgetEvent {
    type Error = String;

    fn try_from(raw: RawEvent) -> Result<Self, String> {
        match raw.kind.as_str() {
            "chatkit.error" => Ok(WidgetEvent::Error {
                message: raw
                    .detail
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            "chatkit.response.start" => Ok(WidgetEvent::ResponseStart),
            "chatkit.response.end" => Ok(WidgetEvent::ResponseEnd),
            "chatkit.log" => Ok(WidgetEvent::Log {
                name: raw
                    .detail
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                data: raw.detail.get("data").filter(|d| !d.is_null()).cloned(),
            }),
            other => Err(format!("unknown widget event '{other}'")),
        }
    }
}

/// Receives widget events, one method per kind
pub trait WidgetObserver: Send + Sync {
    fn on_error(&self, message: Option<&str>);

    fn on_response_start(&self) {}

    fn on_response_end(&self) {}

    fn on_log(&self, _name: &str, _data: Option<&Value>) {}
}

/// Route `event` to the matching observer method
pub fn dispatch(observer: &dyn WidgetObserver, event: &WidgetEvent) {
    match event {
        WidgetEvent::Error { message } => observer.on_error(message.as_deref()),
        WidgetEvent::ResponseStart => observer.on_response_start(),
        WidgetEvent::ResponseEnd => observer.on_response_end(),
        WidgetEvent::Log { name, data } => observer.on_log(name, data.as_ref()),
    }
}

/// Observer that writes every event to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl WidgetObserver for TracingObserver {
    fn on_error(&self, message: Option<&str>) {
        tracing::error!(error = message.unwrap_or(UNEXPECTED_ERROR_MESSAGE), "ChatKit error");
    }

    fn on_response_start(&self) {
        tracing::debug!("ChatKit response started");
    }

    fn on_response_end(&self) {
        tracing::debug!("ChatKit response finished");
    }

    fn on_log(&self, name: &str, data: Option<&Value>) {
        tracing::info!(event_name = name, ?data, "ChatKit log");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    /// Records the sequence of observer calls
    #[derive(Default)]
    pub(crate) struct RecordingObserver {
        pub calls: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl WidgetObserver for RecordingObserver {
        fn on_error(&self, message: Option<&str>) {
            self.calls
                .lock()
                .push(format!("error:{}", message.unwrap_or("-")));
        }

        fn on_response_start(&self) {
            self.calls.lock().push("start".to_string());
        }

        fn on_response_end(&self) {
            self.calls.lock().push("end".to_string());
        }

        fn on_log(&self, name: &str, _data: Option<&Value>) {
            self.calls.lock().push(format!("log:{name}"));
        }
    }

    #[test]
    fn parses_error_event_message() {
        let event: WidgetEvent = serde_json::from_value(json!({
            "type": "chatkit.error",
            "detail": { "error": { "message": "quota exceeded" } }
        }))
        .unwrap();
        assert_eq!(
            event,
            WidgetEvent::Error {
                message: Some("quota exceeded".to_string())
            }
        );
    }

    #[test]
    fn error_event_without_message() {
        let event: WidgetEvent =
            serde_json::from_value(json!({ "type": "chatkit.error", "detail": {} })).unwrap();
        assert_eq!(event, WidgetEvent::Error { message: None });
    }

    #[test]
    fn response_events_need_no_detail() {
        let start: WidgetEvent =
            serde_json::from_value(json!({ "type": "chatkit.response.start" })).unwrap();
        let end: WidgetEvent =
            serde_json::from_value(json!({ "type": "chatkit.response.end", "detail": null }))
                .unwrap();
        assert_eq!(start, WidgetEvent::ResponseStart);
        assert_eq!(end, WidgetEvent::ResponseEnd);
    }

    #[test]
    fn log_event_keeps_name_and_data() {
        let event: WidgetEvent = serde_json::from_value(json!({
            "type": "chatkit.log",
            "detail": { "name": "thread.created", "data": { "id": "t1" } }
        }))
        .unwrap();
        assert_eq!(event.kind(), "chatkit.log");
        assert_eq!(
            event,
            WidgetEvent::Log {
                name: "thread.created".to_string(),
                data: Some(json!({ "id": "t1" })),
            }
        );
    }

    #[test]
    fn unknown_event_is_rejected() {
        let result: Result<WidgetEvent, _> =
            serde_json::from_value(json!({ "type": "chatkit.thread.change" }));
        assert!(result.is_err());
    }

    #[test]
    fn dispatch_calls_one_method_per_event() {
        let observer = RecordingObserver::default();
        let events = [
            WidgetEvent::ResponseStart,
            WidgetEvent::Log {
                name: "tool".to_string(),
                data: None,
            },
            WidgetEvent::ResponseEnd,
            WidgetEvent::Error { message: None },
        ];

        for event in &events {
            dispatch(&observer, event);
        }

        assert_eq!(observer.calls(), vec!["start", "log:tool", "end", "error:-"]);
    }
}
