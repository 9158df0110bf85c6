use thiserror::Error;
use tracing_subscriber::{filter::ParseError, util::TryInitError};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?} (expected text, json or journald)")]
    UnknownFormat(String),

    #[error("journald output needs Linux and the `journald` feature")]
    JournaldUnavailable,

    #[error("invalid log directives {directives:?}: {source}")]
    InvalidDirectives {
        directives: String,
        #[source]
        source: ParseError,
    },

    #[error("a global subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),

    #[error("journald socket unavailable: {0}")]
    Journald(#[from] std::io::Error),
}
