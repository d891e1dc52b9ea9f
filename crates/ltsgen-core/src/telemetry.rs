//! Tracing initialisation for the `ltsgen` binary.
//!
//! Call [`init_tracing_from_env`] once at program start. Later calls are
//! ignored (the global subscriber can only be set once per process).
//!
//! Logs go to stderr; stdout carries the echoed tool output.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "LTSGEN_LOG_FORMAT";

/// Shape of the log lines on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,

    /// Newline-delimited JSON, one object per event.
    Json,
}

impl LogFormat {
    /// Read `LTSGEN_LOG_FORMAT`; anything other than `json` means text.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Initialise tracing with the format taken from `LTSGEN_LOG_FORMAT`.
///
/// `RUST_LOG` wins over `level` when set.
pub fn init_tracing_from_env(level: Level) {
    init_tracing(LogFormat::from_env(), level);
}

/// Initialise the global tracing subscriber with an explicit format.
pub fn init_tracing(format: LogFormat, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry.with(layer.json()).try_init().ok(),
        LogFormat::Text => registry.with(layer).try_init().ok(),
    };
}
