//! Logging for the bank sorting crates.
//!
//! `logger_init` installs the global `tracing` subscriber. With the
//! `subscriber` feature, [`Journal`] renders scheduler events as log lines.

mod logger;
pub use logger::*;

#[cfg(feature = "subscriber")]
mod subscriber;
#[cfg(feature = "subscriber")]
pub use subscriber::*;
