use crate::adapters::storage::DEFAULT_STORAGE_KEY;
use crate::core::roster::DEFAULT_MIN_PLAYERS;
use crate::core::ConfigProvider;
use crate::domain::model::DEFAULT_RESERVED_KEYS;
use crate::utils::error::{ScoreError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "sattori.toml";
pub const DEFAULT_DATA_DIR: &str = "./.sattori";
pub const MAX_MIN_PLAYERS: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub game: GameConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_min_players")]
    pub min_players: usize,
    #[serde(default = "default_reserved_keys")]
    pub reserved_keys: Vec<String>,
    #[serde(default)]
    pub stamp_rounds: bool,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_min_players() -> usize {
    DEFAULT_MIN_PLAYERS
}

fn default_reserved_keys() -> Vec<String> {
    DEFAULT_RESERVED_KEYS.iter().map(|k| k.to_string()).collect()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: default_storage_key(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: default_min_players(),
            reserved_keys: default_reserved_keys(),
            stamp_rounds: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 載入指定檔案；未指定時若目前目錄有 sattori.toml 則使用，否則採用預設值
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::info!("📁 Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                tracing::debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// 替換環境變數 (例如 ${HOME})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoreError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_non_empty_string("storage.key", &self.storage.key)?;
        validation::validate_file_stem("storage.key", &self.storage.key)?;
        validation::validate_range(
            "game.min_players",
            self.game.min_players,
            DEFAULT_MIN_PLAYERS,
            MAX_MIN_PLAYERS,
        )?;

        for key in &self.game.reserved_keys {
            validation::validate_non_empty_string("game.reserved_keys", key)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn storage_key(&self) -> &str {
        &self.storage.key
    }

    fn min_players(&self) -> usize {
        self.game.min_players
    }

    fn reserved_keys(&self) -> &[String] {
        &self.game.reserved_keys
    }

    fn stamp_rounds(&self) -> bool {
        self.game.stamp_rounds
    }
}
