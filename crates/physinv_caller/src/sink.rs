use caller_logging::{caller_error, caller_info};
use log::Level;
use serde::Serialize;

use crate::CallerEvent;

/// Receives every record set and failure produced by a fetch branch.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: CallerEvent);
}

/// Writes events to the global `log` facade: records at info level as JSON,
/// failures at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, event: CallerEvent) {
        match render(&event) {
            (Level::Error, line) => caller_error!("{line}"),
            (_, line) => caller_info!("{line}"),
        }
    }
}

fn render(event: &CallerEvent) -> (Level, String) {
    match event {
        CallerEvent::Headers(headers) => (Level::Info, format!("Header: {}", to_json(headers))),
        CallerEvent::Items(items) => (Level::Info, format!("Item: {}", to_json(items))),
        CallerEvent::ToItems(items) => (Level::Info, format!("ToItem: {}", to_json(items))),
        CallerEvent::Failed { resource, error } => {
            (Level::Error, format!("{resource} branch failed: {error}"))
        }
    }
}

fn to_json<T: Serialize>(records: &[T]) -> String {
    serde_json::to_string(records).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}
