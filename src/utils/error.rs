use crate::domain::model::{RoundStage, SessionState};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Player name cannot be empty.")]
    EmptyName,

    #[error("Player name must be unique.")]
    DuplicateName { name: String },

    #[error("Player name '{name}' is reserved.")]
    ReservedName { name: String },

    #[error("At least {required} players are required.")]
    InsufficientPlayers { required: usize, actual: usize },

    #[error("All players must enter their scores before {stage}.")]
    IncompleteRound {
        stage: RoundStage,
        missing: Vec<String>,
    },

    #[error("Unknown player: {name}")]
    UnknownPlayer { name: String },

    #[error("Cannot {action} while the game is {state}")]
    InvalidTransition {
        state: SessionState,
        action: &'static str,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    State,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoreError::EmptyName
            | ScoreError::DuplicateName { .. }
            | ScoreError::ReservedName { .. }
            | ScoreError::InsufficientPlayers { .. }
            | ScoreError::IncompleteRound { .. }
            | ScoreError::UnknownPlayer { .. } => ErrorCategory::Input,
            ScoreError::InvalidTransition { .. } => ErrorCategory::State,
            ScoreError::IoError(_)
            | ScoreError::SerializationError(_)
            | ScoreError::CsvError(_) => ErrorCategory::Storage,
            ScoreError::ConfigError { .. }
            | ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::State => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 使用者輸入錯誤只需顯示訊息，不影響遊戲狀態
    pub fn is_input_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoreError::IoError(e) => format!("Could not access the saved game: {}", e),
            ScoreError::SerializationError(_) => "The saved game could not be encoded.".to_string(),
            ScoreError::CsvError(e) => format!("Could not write the scoreboard: {}", e),
            ScoreError::ConfigError { message } => format!("Invalid configuration: {}", message),
            ScoreError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            ScoreError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoreError::EmptyName => "Type a name before adding the player.",
            ScoreError::DuplicateName { .. } => "Pick a name that is not already on the roster.",
            ScoreError::ReservedName { .. } => "Pick a name that is not used for round metadata.",
            ScoreError::InsufficientPlayers { .. } => "Add more players before starting the game.",
            ScoreError::IncompleteRound { .. } => "Enter a score for every player, then try again.",
            ScoreError::UnknownPlayer { .. } => "Use a name exactly as it appears on the scoreboard.",
            ScoreError::InvalidTransition { .. } => "Reset the game to start a new one.",
            ScoreError::IoError(_) => "Check that the data directory exists and is writable.",
            ScoreError::SerializationError(_) | ScoreError::CsvError(_) => {
                "Retry the command; reset the game if the problem persists."
            }
            ScoreError::ConfigError { .. }
            | ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line options."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
