use crate::domain::model::DEFAULT_RESERVED_KEYS;
use crate::utils::error::{Result, ScoreError};

pub const DEFAULT_MIN_PLAYERS: usize = 2;

/// Collects unique player names before a game starts.
#[derive(Debug, Clone)]
pub struct RosterManager {
    input: String,
    players: Vec<String>,
    last_error: Option<String>,
    min_players: usize,
    /// Names used for round metadata, which would be lost on reload.
    reserved: Vec<String>,
}

impl Default for RosterManager {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PLAYERS)
    }
}

impl RosterManager {
    pub fn new(min_players: usize) -> Self {
        Self {
            input: String::new(),
            players: Vec::new(),
            last_error: None,
            min_players,
            reserved: DEFAULT_RESERVED_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn with_reserved_keys(mut self, reserved: Vec<String>) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn reserved_keys(&self) -> &[String] {
        &self.reserved
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn min_players(&self) -> usize {
        self.min_players
    }

    pub fn can_start(&self) -> bool {
        self.players.len() >= self.min_players
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Adds whatever is currently typed in the input.
    pub fn submit_input(&mut self) -> Result<()> {
        let name = std::mem::take(&mut self.input);
        let result = self.add_player(&name);
        if result.is_err() {
            self.input = name;
        }
        result
    }

    pub fn add_player(&mut self, name: &str) -> Result<()> {
        let name = name.trim();

        if name.is_empty() {
            return self.reject(ScoreError::EmptyName);
        }

        if self.reserved.iter().any(|k| k == name) {
            return self.reject(ScoreError::ReservedName {
                name: name.to_string(),
            });
        }

        if self.players.iter().any(|p| p == name) {
            return self.reject(ScoreError::DuplicateName {
                name: name.to_string(),
            });
        }

        tracing::debug!("Adding player '{}' at position {}", name, self.players.len() + 1);
        self.players.push(name.to_string());
        self.input.clear();
        self.last_error = None;
        Ok(())
    }

    /// Out-of-range indexes are ignored.
    pub fn remove_player(&mut self, index: usize) -> Option<String> {
        if index >= self.players.len() {
            tracing::debug!("Ignoring removal of player at invalid index {}", index);
            return None;
        }
        let removed = self.players.remove(index);
        tracing::debug!("Removed player '{}'", removed);
        Some(removed)
    }

    /// Hands over the finalized roster once enough players are registered.
    pub fn start_session(&mut self) -> Result<Vec<String>> {
        if !self.can_start() {
            return self.reject(ScoreError::InsufficientPlayers {
                required: self.min_players,
                actual: self.players.len(),
            });
        }
        self.last_error = None;
        Ok(self.players.clone())
    }

    fn reject<T>(&mut self, error: ScoreError) -> Result<T> {
        tracing::debug!("Roster input rejected: {}", error);
        self.last_error = Some(error.to_string());
        Err(error)
    }
}
