use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex},
};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Line layout used by both the console and the diagnostic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `timestamp LEVEL target: message key=value ...`
    Text,
    /// One JSON object per event, structured fields under `fields`.
    Json,
}

impl LogFormat {
    /// Parses a format name, `text` or `json`, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "text" => Some(LogFormat::Text),
            _ => None,
        }
    }

    /// Reads `BOOKING_LOG_FORMAT`, falling back to `Text`.
    pub fn from_env_or_default() -> Self {
        std::env::var("BOOKING_LOG_FORMAT")
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or(LogFormat::Text)
    }
}

/// Bounded in-memory record of formatted log lines.
///
/// Used as the diagnostic sink of the login placeholder and by tests that need
/// to see what was logged. The oldest line is dropped once `capacity` is
/// reached; a capacity of 0 is clamped to 1.
#[derive(Clone)]
pub struct DiagnosticSink {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl DiagnosticSink {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Copies of the retained lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

/// Tracing layer that writes every event into a `DiagnosticSink`.
pub struct DiagnosticLayer {
    sink: DiagnosticSink,
    format: LogFormat,
}

impl DiagnosticLayer {
    pub fn new(sink: DiagnosticSink, format: LogFormat) -> Self {
        DiagnosticLayer { sink, format }
    }
}

impl<S> tracing_subscriber::Layer<S> for DiagnosticLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut fields = EventFields::default();
        event.record(&mut fields);
        self.sink.push(fields.render(event.metadata(), self.format));
    }
}

/// Fields of one event. Events bridged from `log` carry `log.*` bookkeeping
/// fields (module path, file, line) which are left out.
#[derive(Default)]
struct EventFields {
    message: String,
    extra: Vec<(&'static str, String)>,
}

impl EventFields {
    fn push(&mut self, name: &'static str, value: String) {
        match name {
            "message" => self.message = value,
            name if name.starts_with("log.") => {}
            name => self.extra.push((name, value)),
        }
    }

    fn render(self, metadata: &tracing::Metadata<'_>, format: LogFormat) -> String {
        let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f");
        match format {
            LogFormat::Text => {
                let mut line = format!(
                    "{} {:>5} {}: {}",
                    timestamp,
                    metadata.level(),
                    metadata.target(),
                    self.message
                );
                for (name, value) in &self.extra {
                    line.push_str(&format!(" {}={}", name, value));
                }
                line
            }
            LogFormat::Json => {
                let fields: serde_json::Map<String, serde_json::Value> = self
                    .extra
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), serde_json::Value::String(value)))
                    .collect();
                serde_json::json!({
                    "timestamp": timestamp.to_string(),
                    "level": metadata.level().to_string(),
                    "target": metadata.target(),
                    "message": self.message,
                    "fields": fields,
                })
                .to_string()
            }
        }
    }
}

impl tracing::field::Visit for EventFields {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        self.push(field.name(), format!("{:?}", value));
    }
}

/// Installs the global subscriber: env filter (default `info`), console
/// output in the configured format, the `log` bridge and, optionally, a
/// diagnostic sink.
///
/// Calling it again once a subscriber is installed is a no-op returning
/// `Ok(())`.
pub fn init_logging(sink: Option<DiagnosticSink>) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_log::LogTracer;
    use tracing_subscriber::fmt;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = LogFormat::from_env_or_default();

    let (text_layer, json_layer) = match format {
        LogFormat::Text => (Some(fmt::layer().with_target(true)), None),
        LogFormat::Json => (None, Some(fmt::layer().json().with_target(true))),
    };
    let diagnostic_layer = sink.map(|sink| DiagnosticLayer::new(sink, format));

    let _ = LogTracer::init();

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(diagnostic_layer)
        .with(text_layer)
        .with(json_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!(
            "Tracing subscriber already initialized or failed to initialize: {:?}",
            e
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("text"), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn test_sink_drops_oldest() {
        let sink = DiagnosticSink::new(2);
        sink.push("a".to_string());
        sink.push("b".to_string());
        sink.push("c".to_string());
        assert_eq!(sink.lines(), vec!["b".to_string(), "c".to_string()]);
        sink.clear();
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_layer_formats_text_events() {
        let sink = DiagnosticSink::new(10);
        let subscriber =
            tracing_subscriber::registry().with(DiagnosticLayer::new(sink.clone(), LogFormat::Text));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "booking::test", "table booked");
        });

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(" INFO booking::test: table booked"));
    }

    #[test]
    fn test_text_lists_structured_fields() {
        let sink = DiagnosticSink::new(10);
        let subscriber =
            tracing_subscriber::registry().with(DiagnosticLayer::new(sink.clone(), LogFormat::Text));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(table = 4, guests = 2, "table booked");
        });

        let line = sink.lines().pop().unwrap();
        assert!(line.ends_with("table booked table=4 guests=2"));
    }

    #[test]
    fn test_layer_formats_json_events() {
        let sink = DiagnosticSink::new(10);
        let subscriber =
            tracing_subscriber::registry().with(DiagnosticLayer::new(sink.clone(), LogFormat::Json));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(key = "email", "session lookup failed");
        });

        let line = sink.lines().pop().unwrap();
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(json["level"], "WARN");
        assert_eq!(json["message"], "session lookup failed");
        assert_eq!(json["fields"]["key"], "email");
    }
}
