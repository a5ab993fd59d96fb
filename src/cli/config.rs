//! Agora configuration file handling
//!
//! Provides default configuration generation and loading for the Agora CLI.
//! Configuration files are TOML format and stored adjacent to the registry
//! database.
//!
//! The `[governance]` section carries the registry parameters (voting period,
//! quorum). They are read once when the registry is opened; nothing in the
//! registry mutates them afterwards.

use agora::registry::{GovernanceParams, DEFAULT_QUORUM, DEFAULT_VOTING_PERIOD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default voting period, in humantime format
const DEFAULT_VOTING_PERIOD_STR: &str = "14days";

/// Agora CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgoraConfig {
    /// Registry database configuration
    pub storage: StorageConfig,

    /// Governance parameters
    #[serde(default)]
    pub governance: GovernanceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite registry database
    pub db_path: PathBuf,
}

/// Governance parameters as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Voting window length (humantime format, e.g. "14days", "48h")
    #[serde(default = "default_voting_period")]
    pub voting_period: String,

    /// Minimum affirmative votes for a proposal to pass after its deadline
    #[serde(default = "default_quorum")]
    pub quorum: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_voting_period() -> String {
    DEFAULT_VOTING_PERIOD_STR.to_string()
}

fn default_quorum() -> u32 {
    DEFAULT_QUORUM
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            voting_period: default_voting_period(),
            quorum: DEFAULT_QUORUM,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl GovernanceConfig {
    /// Parse the configured values into registry parameters.
    pub fn params(&self) -> Result<GovernanceParams, Box<dyn std::error::Error>> {
        let period = humantime::parse_duration(&self.voting_period)
            .map_err(|e| format!("Invalid voting_period '{}': {}", self.voting_period, e))?;
        Ok(GovernanceParams {
            voting_period_secs: period.as_secs(),
            quorum: self.quorum,
        })
    }
}

impl AgoraConfig {
    /// Create a new configuration with the given database path
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            storage: StorageConfig { db_path },
            governance: GovernanceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: AgoraConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(path, contents)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml(db_path: &Path) -> String {
        format!(
            r#"# Agora Registry Configuration
#
# Governance parameters are read once when the registry is opened. Changing
# the voting period only affects proposals created afterwards; each proposal
# keeps the deadline it was created with.

[storage]
# Path to the SQLite registry database
db_path = "{db_path}"

[governance]
# Voting window, fixed at proposal creation (humantime format)
voting_period = "{voting_period}"

# Minimum votes in favor for a proposal to pass after its deadline
quorum = {quorum}

[logging]
# Log level: trace, debug, info, warn, error
level = "info"
"#,
            db_path = db_path.display(),
            voting_period = DEFAULT_VOTING_PERIOD_STR,
            quorum = DEFAULT_QUORUM,
        )
    }

    /// Create and save a default configuration file
    pub fn create_default(
        config_path: &Path,
        db_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let contents = Self::generate_default_toml(db_path);

        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(config_path, contents).map_err(|e| {
            format!(
                "Failed to write config file '{}': {}",
                config_path.display(),
                e
            )
        })?;

        Ok(())
    }
}

/// Get the default config file path based on the database path
///
/// The config file is stored adjacent to the registry database:
/// - Database: ~/.local/share/agora/registry.db
/// - Config:   ~/.local/share/agora/config.toml
pub fn default_config_path(db_path: &Path) -> PathBuf {
    db_path.parent().unwrap_or(db_path).join("config.toml")
}

/// Get the default registry database path
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agora")
        .join("registry.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let db_path = PathBuf::from("/data/agora/registry.db");
        let config = AgoraConfig::new(db_path.clone());

        assert_eq!(config.storage.db_path, db_path);
        assert_eq!(config.governance.voting_period, "14days");
        assert_eq!(config.governance.quorum, 1000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_params_match_registry_defaults() {
        let config = AgoraConfig::new(PathBuf::from("/tmp/registry.db"));
        let params = config.governance.params().unwrap();

        assert_eq!(params, GovernanceParams::default());
        assert_eq!(params.voting_period_secs, DEFAULT_VOTING_PERIOD.as_secs());
    }

    #[test]
    fn test_params_reject_bad_period() {
        let mut config = AgoraConfig::new(PathBuf::from("/tmp/registry.db"));
        config.governance.voting_period = "a fortnight".to_string();

        assert!(config.governance.params().is_err());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let db_path = PathBuf::from("/data/agora/registry.db");

        let config = AgoraConfig::new(db_path.clone());
        config.save(&config_path).unwrap();

        let loaded = AgoraConfig::load(&config_path).unwrap();
        assert_eq!(loaded.storage.db_path, db_path);
        assert_eq!(loaded.governance.quorum, 1000);
    }

    #[test]
    fn test_create_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let db_path = temp_dir.path().join("registry.db");

        AgoraConfig::create_default(&config_path, &db_path).unwrap();

        assert!(config_path.exists());

        // Verify it can be loaded and parsed
        let config = AgoraConfig::load(&config_path).unwrap();
        assert_eq!(config.storage.db_path, db_path);
        assert_eq!(config.governance.params().unwrap().quorum, 1000);
    }

    #[test]
    fn test_default_config_path() {
        let db_path = PathBuf::from("/data/agora/registry.db");
        let config_path = default_config_path(&db_path);
        assert_eq!(config_path, PathBuf::from("/data/agora/config.toml"));
    }

    #[test]
    fn test_generate_default_toml() {
        let db_path = PathBuf::from("/data/agora/registry.db");
        let toml = AgoraConfig::generate_default_toml(&db_path);

        assert!(toml.contains("db_path = \"/data/agora/registry.db\""));
        assert!(toml.contains("voting_period = \"14days\""));
        assert!(toml.contains("quorum = 1000"));
    }

    #[test]
    fn test_load_config_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        // Write minimal config (only required fields)
        let minimal_config = r#"
[storage]
db_path = "/tmp/registry.db"
"#;
        fs::write(&config_path, minimal_config).unwrap();

        let config = AgoraConfig::load(&config_path).unwrap();

        // Verify defaults are applied
        assert_eq!(config.governance.voting_period, "14days");
        assert_eq!(config.governance.quorum, 1000);
        assert_eq!(config.logging.level, "info");
    }
}
