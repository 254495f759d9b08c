//! Configuration for background producers and logging.

use serde::{Deserialize, Serialize};
use std::thread;

/// Configuration applied to every traversal that spawns a producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Name given to producer threads.
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
    /// Stack size for producer threads, in bytes. `None` keeps the OS default.
    #[serde(default)]
    pub stack_size: Option<usize>,
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Whether logs are emitted as JSON lines.
    #[serde(default)]
    pub json_logs: bool,
}

fn default_thread_name() -> String {
    "iterflow-producer".to_string()
}

fn default_log_filter() -> String {
    "iterflow=info".to_string()
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            thread_name: default_thread_name(),
            stack_size: None,
            log_filter: default_log_filter(),
            json_logs: false,
        }
    }
}

impl TraversalConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Sets the producer thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Sets the producer stack size.
    #[must_use]
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Sets the fallback log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Switches JSON log output on or off.
    #[must_use]
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Returns a thread builder for a producer.
    pub(crate) fn thread_builder(&self) -> thread::Builder {
        let builder = thread::Builder::new().name(self.thread_name.clone());
        match self.stack_size {
            Some(bytes) => builder.stack_size(bytes),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = TraversalConfig::default();
        assert_eq!(config.thread_name, "iterflow-producer");
        assert_eq!(config.stack_size, None);
        assert_eq!(config.log_filter, "iterflow=info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_builder() {
        let config = TraversalConfig::new()
            .with_thread_name("keys")
            .with_stack_size(64 * 1024)
            .with_log_filter("iterflow=debug")
            .with_json_logs(true);

        assert_eq!(config.thread_name, "keys");
        assert_eq!(config.stack_size, Some(64 * 1024));
        assert_eq!(config.log_filter, "iterflow=debug");
        assert!(config.json_logs);
    }

    #[test]
    fn test_from_json_partial() {
        let config = TraversalConfig::from_json(r#"{"thread_name": "bench"}"#).unwrap();
        assert_eq!(config.thread_name, "bench");
        assert_eq!(config.log_filter, "iterflow=info");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(TraversalConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = TraversalConfig::new().with_stack_size(128 * 1024);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TraversalConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_thread_builder_names_thread() {
        let config = TraversalConfig::new().with_thread_name("named-producer");
        let handle = config
            .thread_builder()
            .spawn(|| std::thread::current().name().map(String::from))
            .unwrap();
        assert_eq!(handle.join().unwrap().as_deref(), Some("named-producer"));
    }
}
