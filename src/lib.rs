pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{FileStore, FixedAnswer, JsonLedgerStore, LinePrompt, MemoryStore};
pub use app::{ExportFormat, Shell};
pub use crate::core::{
    keeper::{Screen, ScoreKeeper},
    roster::RosterManager,
    session::{GameSession, SessionSettings},
};
pub use domain::model::{Ledger, Round, RoundStage, SessionState, WinnerResult};
pub use utils::error::{Result, ScoreError};
