use serde::{Deserialize, Deserializer};
use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Validated `EnvFilter` directive string, e.g. `info` or `banksort_core=trace,info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(directives: impl Into<String>) -> Result<Self, LoggerError> {
        let directives = directives.into();
        parse(&directives)?;
        Ok(Self(directives))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn filter(&self) -> Result<EnvFilter, LoggerError> {
        parse(&self.0)
    }
}

fn parse(directives: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(directives).map_err(|source| LoggerError::InvalidDirectives {
        directives: directives.to_string(),
        source,
    })
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl<'de> Deserialize<'de> for LoggerLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LoggerLevel::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_directives() {
        assert!(LoggerLevel::new("debug").is_ok());
        assert!(LoggerLevel::new("banksort_core=trace,warn").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        let err = LoggerLevel::new("banksort_core=loud").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidDirectives { directives, .. } if directives == "banksort_core=loud"));
    }
}
