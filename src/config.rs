//! Resolution configuration: acceptance threshold and the batch column the
//! resolver reads mentions from. Defaults can be overridden from the
//! environment (`ROSTERLINK_THRESHOLD`, `ROSTERLINK_MENTION_COLUMN`) or per
//! invocation by the caller.

use crate::error::{EnrichError, Result};
use crate::resolver::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MENTION_COLUMN: &str = "mention_name";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Minimum similarity (0-100, inclusive) for accepting a match
    pub threshold: f64,
    /// Name of the batch column carrying the mention text
    pub mention_column: String,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mention_column: DEFAULT_MENTION_COLUMN.to_string(),
        }
    }
}

impl ResolutionConfig {
    /// Build a config from defaults plus environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("ROSTERLINK_THRESHOLD") {
            config.threshold = raw.parse::<f64>().map_err(|_| {
                EnrichError::Config(format!("Invalid ROSTERLINK_THRESHOLD: {}", raw))
            })?;
        }
        if let Ok(column) = std::env::var("ROSTERLINK_MENTION_COLUMN") {
            config.mention_column = column;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(EnrichError::Config(format!(
                "Threshold must be within 0-100, got {}",
                self.threshold
            )));
        }
        if self.mention_column.is_empty() {
            return Err(EnrichError::Config(
                "Mention column name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolutionConfig::default();
        assert_eq!(config.threshold, 80.0);
        assert_eq!(config.mention_column, "mention_name");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = ResolutionConfig {
            threshold: 140.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_mention_column_rejected() {
        let config = ResolutionConfig {
            mention_column: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
