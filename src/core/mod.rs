pub mod keeper;
pub mod roster;
pub mod scoring;
pub mod session;

pub use crate::domain::model::{Ledger, Round, RoundStage, SessionState, WinnerResult};
pub use crate::domain::ports::{ConfigProvider, Confirmation, KeyValueStore, LedgerStore};
pub use crate::utils::error::Result;
