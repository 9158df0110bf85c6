//! Host-facing bank sorting plugin.
//!
//! Wires the host's lifecycle signals, settings and notification hooks to the
//! scheduler in `banksort-core`.

mod error;
pub use error::PluginError;

mod settings;
pub use settings::{LiveSettings, PluginSettings};

mod notify;
pub use notify::{CompletionNotifier, LogNotify, Notify};

mod plugin;
pub use plugin::{SortBankItems, SortBankItemsBuilder};
