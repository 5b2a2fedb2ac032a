//! Extraction settings.
//!
//! Loaded from an optional YAML file and overridden per run from the command
//! line. Every field has a default, so an empty file is valid.
//!
//! # Example YAML
//!
//! ```yaml
//! team_name: Gonzaga
//! default_opponent_federation: ENG
//! player_id_placeholder: "????"
//! timeout_secs: 30
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings shared by the extractors and the fetcher.
///
/// # Examples
///
/// ```
/// use crosstable_extract::ExtractConfig;
///
/// let config = ExtractConfig::default();
/// assert_eq!(config.team_name, "Gonzaga");
/// assert_eq!(config.default_opponent_federation, "ENG");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Own team as written on league pairing pages.
    pub team_name: String,
    /// Federation given to league opponents, which the league site omits.
    pub default_opponent_federation: String,
    /// Identifier written for every player on report lines.
    pub player_id_placeholder: String,
    /// User agent sent with HTTP requests.
    pub user_agent: String,
    /// HTTP request timeout.
    pub timeout_secs: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            team_name: "Gonzaga".to_string(),
            default_opponent_federation: "ENG".to_string(),
            player_id_placeholder: crosstable_core::UNKNOWN_PLAYER_ID.to_string(),
            user_agent: concat!("crosstable/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

impl ExtractConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ExtractError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::ExtractError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }
}
