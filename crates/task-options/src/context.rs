use rdkafka::client::ClientContext;
use rdkafka::config::RDKafkaLogLevel;
use rdkafka::consumer::ConsumerContext;
use rdkafka::error::KafkaError;
use tracing::{debug, error, info, warn, Level};

/// Client context that forwards librdkafka log lines and client errors to
/// `tracing`, tagged with the task that owns the client.
#[derive(Debug, Clone, Copy)]
pub struct TaskClientContext {
    task: &'static str,
}

impl TaskClientContext {
    pub fn new(task: &'static str) -> Self {
        Self { task }
    }

    pub fn task(&self) -> &'static str {
        self.task
    }
}

impl ClientContext for TaskClientContext {
    fn log(&self, level: RDKafkaLogLevel, fac: &str, log_message: &str) {
        let task = self.task;
        match level {
            RDKafkaLogLevel::Emerg
            | RDKafkaLogLevel::Alert
            | RDKafkaLogLevel::Critical
            | RDKafkaLogLevel::Error => {
                error!(target: "librdkafka", task, "{fac}: {log_message}")
            }
            RDKafkaLogLevel::Warning => warn!(target: "librdkafka", task, "{fac}: {log_message}"),
            RDKafkaLogLevel::Notice | RDKafkaLogLevel::Info => {
                info!(target: "librdkafka", task, "{fac}: {log_message}")
            }
            RDKafkaLogLevel::Debug => debug!(target: "librdkafka", task, "{fac}: {log_message}"),
        }
    }

    fn error(&self, error: KafkaError, reason: &str) {
        error!(target: "librdkafka", task = self.task, "{error}: {reason}");
    }
}

impl ConsumerContext for TaskClientContext {}

/// librdkafka log level matching what the active subscriber will record.
pub fn log_level() -> RDKafkaLogLevel {
    if tracing::enabled!(target: "librdkafka", Level::DEBUG) {
        RDKafkaLogLevel::Debug
    } else if tracing::enabled!(target: "librdkafka", Level::INFO) {
        RDKafkaLogLevel::Info
    } else if tracing::enabled!(target: "librdkafka", Level::WARN) {
        RDKafkaLogLevel::Warning
    } else {
        RDKafkaLogLevel::Error
    }
}
