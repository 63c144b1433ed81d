use crate::core::roster::DEFAULT_MIN_PLAYERS;
use crate::core::scoring;
use crate::domain::model::{
    Ledger, Round, RoundStage, SessionState, WinnerResult, DEFAULT_RESERVED_KEYS,
    ROUND_NUMBER_KEY, TIMESTAMP_KEY,
};
use crate::domain::ports::{ConfigProvider, Confirmation, LedgerStore};
use crate::utils::error::{Result, ScoreError};
use serde_json::Value;
use std::collections::HashMap;

pub const RESET_PROMPT: &str = "Are you sure you want to reset the game?";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub min_players: usize,
    /// Round keys that never name a player.
    pub reserved_keys: Vec<String>,
    /// Write `roundNumber` and `timestamp` into every committed round.
    pub stamp_rounds: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            min_players: DEFAULT_MIN_PLAYERS,
            reserved_keys: DEFAULT_RESERVED_KEYS.iter().map(|k| k.to_string()).collect(),
            stamp_rounds: false,
        }
    }
}

impl SessionSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            min_players: config.min_players(),
            reserved_keys: config.reserved_keys().to_vec(),
            stamp_rounds: config.stamp_rounds(),
        }
    }
}

/// Round-by-round ledger of one game, persisted through a [`LedgerStore`].
pub struct GameSession<S: LedgerStore> {
    store: S,
    settings: SessionSettings,
    roster: Vec<String>,
    ledger: Ledger,
    pending: HashMap<String, Value>,
    state: SessionState,
    winner: Option<WinnerResult>,
    last_error: Option<String>,
}

impl<S: LedgerStore> GameSession<S> {
    pub fn new(store: S, settings: SessionSettings) -> Self {
        Self {
            store,
            settings,
            roster: Vec::new(),
            ledger: Ledger::new(),
            pending: HashMap::new(),
            state: SessionState::NotStarted,
            winner: None,
            last_error: None,
        }
    }

    /// Picks up a saved game if the store has one.
    ///
    /// The roster comes back from the keys of the first saved round. Anything
    /// unreadable or without player keys starts a fresh session.
    pub fn restore(mut store: S, settings: SessionSettings) -> Result<Self> {
        let saved = store.load()?;
        let mut session = Self::new(store, settings);

        let Some(ledger) = saved.filter(|ledger| !ledger.is_empty()) else {
            tracing::debug!("No saved game found");
            return Ok(session);
        };

        let roster: Vec<String> = ledger
            .first()
            .map(|round| {
                round
                    .player_names(&session.settings.reserved_keys)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if roster.is_empty() {
            tracing::warn!("⚠️ Saved rounds name no players, starting fresh");
            if let Err(e) = session.store.clear() {
                tracing::warn!("⚠️ Could not remove the empty saved game: {}", e);
            }
            return Ok(session);
        }

        tracing::info!(
            "📂 Restored game with {} players and {} rounds",
            roster.len(),
            ledger.len()
        );
        session.roster = roster;
        session.ledger = ledger;
        session.state = SessionState::InProgress;
        Ok(session)
    }

    pub fn start(&mut self, roster: Vec<String>) -> Result<()> {
        if self.state != SessionState::NotStarted {
            return Err(self.invalid("start a game"));
        }

        if roster.len() < self.settings.min_players {
            return Err(ScoreError::InsufficientPlayers {
                required: self.settings.min_players,
                actual: roster.len(),
            });
        }

        for (i, name) in roster.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ScoreError::EmptyName);
            }
            if self.settings.reserved_keys.contains(name) {
                return Err(ScoreError::ReservedName { name: name.clone() });
            }
            if roster[..i].contains(name) {
                return Err(ScoreError::DuplicateName { name: name.clone() });
            }
        }

        tracing::info!("🎲 Starting game with players: {}", roster.join(", "));
        self.roster = roster;
        self.ledger.clear();
        self.pending.clear();
        self.winner = None;
        self.last_error = None;
        self.state = SessionState::InProgress;
        Ok(())
    }

    /// Stores the raw value for the round in progress. Values are checked at commit.
    pub fn set_pending_score(&mut self, player: &str, raw: impl Into<Value>) -> Result<()> {
        match self.state {
            SessionState::Finished => {
                tracing::debug!("Ignoring score for '{}' after the game finished", player);
                return Ok(());
            }
            SessionState::NotStarted => return Err(self.invalid("enter scores")),
            SessionState::InProgress => {}
        }

        if !self.roster.iter().any(|p| p == player) {
            return Err(ScoreError::UnknownPlayer {
                name: player.to_string(),
            });
        }

        let raw = raw.into();
        tracing::debug!("Pending score for '{}': {}", player, raw);
        self.pending.insert(player.to_string(), raw);
        Ok(())
    }

    pub fn next_round(&mut self) -> Result<()> {
        self.commit_round(RoundStage::Proceed)
    }

    pub fn finish_game(&mut self) -> Result<()> {
        self.commit_round(RoundStage::Finish)
    }

    /// Appends the pending scores as a round, then persists the whole ledger.
    pub fn commit_round(&mut self, stage: RoundStage) -> Result<()> {
        if self.state != SessionState::InProgress {
            let action = if stage.is_terminal() {
                "finish the game"
            } else {
                "start the next round"
            };
            return Err(self.invalid(action));
        }

        let missing: Vec<String> = self
            .roster
            .iter()
            .filter(|player| !scoring::is_entered(self.pending.get(player.as_str())))
            .cloned()
            .collect();

        if !missing.is_empty() {
            let error = ScoreError::IncompleteRound { stage, missing };
            tracing::debug!("Round rejected: {}", error);
            self.last_error = Some(error.to_string());
            return Err(error);
        }

        let round = self.snapshot_pending();
        self.ledger.push(round);
        self.pending.clear();
        self.last_error = None;
        tracing::info!("📝 Round {} recorded", self.ledger.len());

        if let Err(e) = self.store.save(&self.ledger) {
            tracing::warn!("⚠️ Round {} kept in memory but not saved: {}", self.ledger.len(), e);
        }

        if stage.is_terminal() {
            self.state = SessionState::Finished;
            self.winner = self.compute_winner();
            if let Some(winner) = &self.winner {
                tracing::info!("🏆 Game finished, winner: {}", winner);
            }
        }

        Ok(())
    }

    fn snapshot_pending(&self) -> Round {
        let mut round = Round::new();
        if self.settings.stamp_rounds {
            round.insert(ROUND_NUMBER_KEY, Value::from(self.ledger.len() + 1));
            round.insert(TIMESTAMP_KEY, Value::from(chrono::Utc::now().to_rfc3339()));
        }
        for player in &self.roster {
            let value = self.pending.get(player).cloned().unwrap_or(Value::Null);
            round.insert(player.clone(), value);
        }
        round
    }

    /// Asks for confirmation, then wipes the game and the saved copy.
    ///
    /// Returns `false` when the reset was declined.
    pub fn reset(&mut self, confirmation: &mut dyn Confirmation) -> Result<bool> {
        if !confirmation.confirm(RESET_PROMPT) {
            tracing::debug!("Reset declined");
            return Ok(false);
        }

        self.roster.clear();
        self.ledger.clear();
        self.pending.clear();
        self.winner = None;
        self.last_error = None;
        self.state = SessionState::NotStarted;
        if let Err(e) = self.store.clear() {
            tracing::warn!("⚠️ Game reset in memory but the saved copy remains: {}", e);
        }
        tracing::info!("🔄 Game reset");
        Ok(true)
    }

    pub fn total(&self, player: &str) -> f64 {
        scoring::total_for(&self.ledger, player)
    }

    pub fn totals(&self) -> Vec<(String, f64)> {
        scoring::totals_for(&self.ledger, &self.roster)
    }

    pub fn standings(&self) -> Vec<(String, f64)> {
        scoring::standings_for(&self.ledger, &self.roster)
    }

    pub fn compute_winner(&self) -> Option<WinnerResult> {
        scoring::winner_for(&self.ledger, &self.roster)
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn pending_score(&self, player: &str) -> Option<&Value> {
        self.pending.get(player)
    }

    pub fn pending(&self) -> &HashMap<String, Value> {
        &self.pending
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn winner(&self) -> Option<&WinnerResult> {
        self.winner.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn invalid(&self, action: &'static str) -> ScoreError {
        ScoreError::InvalidTransition {
            state: self.state,
            action,
        }
    }
}
