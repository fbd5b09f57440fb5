//! Runtime configuration for the tracker and its sink.
//!
//! Every field has a default, so an empty YAML document is a valid config:
//!
//! ```yaml
//! diff_mode: raw            # or shortest_angular
//! evict_after_ticks: 30     # omit to keep objects forever
//! precision: 3
//! sink:
//!   address: localhost:9999
//!   framing: raw            # raw | newline | length_prefixed
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::tracking::DiffMode;
use crate::transport::Framing;

/// Largest accepted number of decimals in a record.
const MAX_PRECISION: usize = 12;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub diff_mode: DiffMode,
    /// Remove objects unobserved for this many consecutive ticks. `None`
    /// keeps every object for the life of the process.
    pub evict_after_ticks: Option<u64>,
    /// Decimal places per record field.
    pub precision: usize,
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub address: String,
    pub framing: Framing,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            diff_mode: DiffMode::Raw,
            evict_after_ticks: None,
            precision: crate::io::record::DEFAULT_PRECISION,
            sink: SinkConfig::default(),
        }
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            address: "localhost:9999".to_string(),
            framing: Framing::Raw,
        }
    }
}

impl TrackerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty map
        let config: Self = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(contents)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            bail!(
                "precision {} exceeds maximum of {}",
                self.precision,
                MAX_PRECISION
            );
        }
        if self.evict_after_ticks == Some(0) {
            bail!("evict_after_ticks must be at least 1");
        }
        if self.sink.address.trim().is_empty() {
            bail!("sink address is empty");
        }
        Ok(())
    }
}
