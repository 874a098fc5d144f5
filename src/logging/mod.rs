//! Structured logging.
//!
//! Diagnostics go through `tracing` macros with structured fields. The
//! subscriber is installed once per process; later calls are no-ops.

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn all_levels() -> Vec<LogLevel> {
        vec![
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ]
    }

    /// Case-insensitive lookup by name.
    pub fn parse(name: &str) -> Option<LogLevel> {
        let name = name.trim();
        Self::all_levels()
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
    }
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_targets: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("dungeon_core::generation".to_string(), LogLevel::Info),
                ("dungeon_core::monster".to_string(), LogLevel::Info),
                ("dungeon_core::engine".to_string(), LogLevel::Info),
            ],
            show_targets: true,
        }
    }
}

impl TracingConfig {
    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }

    /// Same filters with a different default level.
    pub fn with_default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing with default settings (idempotent)
pub fn init_tracing_default() {
    init_tracing(&TracingConfig::default());
}

/// Initialize tracing with custom config (first call wins, `RUST_LOG` overrides)
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    let show_targets = config.show_targets;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(show_targets)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact();

        // A host process may already own the global subscriber
        let _ = subscriber.try_init();
    });
}

/// Guard that keeps a named span entered for the duration of an operation
pub struct TimingSpan {
    _span: tracing::span::EnteredSpan,
}

impl TimingSpan {
    pub fn new(name: &str) -> Self {
        let span = tracing::info_span!("operation", name = name);
        Self {
            _span: span.entered(),
        }
    }
}
