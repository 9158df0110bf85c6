use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("plugin is not started")]
    NotStarted,

    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    #[error("sort refused: {0}")]
    Sort(#[from] banksort_core::SortError),
}
