use crate::domain::model::Ledger;
use crate::utils::error::Result;

/// String-valued key-value store, the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removing a key that is not there is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Where the ledger of the running game is kept between runs.
pub trait LedgerStore {
    /// `None` when nothing usable is saved. Malformed data counts as nothing saved.
    fn load(&mut self) -> Result<Option<Ledger>>;
    fn save(&mut self, ledger: &Ledger) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Blocking yes/no question asked before destructive actions.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn min_players(&self) -> usize;
    fn reserved_keys(&self) -> &[String];
    fn stamp_rounds(&self) -> bool;
}
