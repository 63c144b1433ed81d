// Adapters layer: concrete implementations for external systems (storage, user prompts).

pub mod confirm;
pub mod storage;

pub use confirm::{FixedAnswer, LinePrompt};
pub use storage::{FileStore, JsonLedgerStore, MemoryStore};
