//! Tracing and logging setup
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to
//! this workspace's crates while dependencies stay at `warn`.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::Environment;

const WORKSPACE_TARGETS: &[&str] = &[
    "vidshare_core",
    "vidshare_common",
    "vidshare_db",
    "vidshare_cache",
    "vidshare_service",
    "vidshare_api",
    "tower_http",
];

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    /// One JSON object per line instead of human-readable output
    pub json: bool,
    /// Emit span open/close events
    pub span_events: bool,
    pub file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            json: false,
            span_events: false,
            file_line: true,
        }
    }

    #[must_use]
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            json: true,
            span_events: false,
            file_line: false,
        }
    }

    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Production => Self::production(),
            Environment::Staging => Self {
                json: true,
                ..Self::default()
            },
            Environment::Development => Self::development(),
        }
    }

    fn default_directives(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        std::iter::once("warn".to_string())
            .chain(WORKSPACE_TARGETS.iter().map(|t| format!("{t}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

/// Install the global subscriber; safe to call more than once
pub fn try_init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_span_events(span_events.clone())
    });
    let pretty_layer = (!config.json).then(|| {
        fmt::layer()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_span_events(span_events)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}
