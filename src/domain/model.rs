use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Keys that later revisions of the saved format write next to player scores.
pub const DEFAULT_RESERVED_KEYS: [&str; 3] = ["roundNumber", "date", "timestamp"];

pub const ROUND_NUMBER_KEY: &str = "roundNumber";
pub const TIMESTAMP_KEY: &str = "timestamp";

/// One completed turn: player name to the score exactly as it was entered.
///
/// Key order is preserved, so the first round of a saved ledger also
/// records the roster order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round {
    scores: Map<String, Value>,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.scores.insert(key.into(), value);
    }

    /// Raw value stored for `key`, player or metadata.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.scores.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    /// Keys that name players, in stored order.
    pub fn player_names<'a>(
        &'a self,
        reserved: &'a [String],
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.keys()
            .filter(move |key| !reserved.iter().any(|r| r.as_str() == *key))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl FromIterator<(String, Value)> for Round {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Ordered history of committed rounds. Grows by appending, shrinks only by clearing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    rounds: Vec<Round>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn first(&self) -> Option<&Round> {
        self.rounds.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Round> {
        self.rounds.iter()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub(crate) fn push(&mut self, round: Round) {
        self.rounds.push(round);
    }

    pub(crate) fn clear(&mut self) {
        self.rounds.clear();
    }
}

impl From<Vec<Round>> for Ledger {
    fn from(rounds: Vec<Round>) -> Self {
        Self { rounds }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Round;
    type IntoIter = std::slice::Iter<'a, Round>;

    fn into_iter(self) -> Self::IntoIter {
        self.rounds.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::NotStarted => "not started",
            SessionState::InProgress => "in progress",
            SessionState::Finished => "finished",
        };
        f.write_str(label)
    }
}

/// Whether a round commit continues the game or ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStage {
    Proceed,
    Finish,
}

impl RoundStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundStage::Finish)
    }
}

impl fmt::Display for RoundStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundStage::Proceed => f.write_str("proceeding"),
            RoundStage::Finish => f.write_str("finishing"),
        }
    }
}

/// Lowest total wins; several players can share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinnerResult {
    Single(String),
    Tie(Vec<String>),
}

impl WinnerResult {
    pub fn players(&self) -> Vec<&str> {
        match self {
            WinnerResult::Single(name) => vec![name.as_str()],
            WinnerResult::Tie(names) => names.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, WinnerResult::Tie(_))
    }

    pub fn contains(&self, player: &str) -> bool {
        self.players().contains(&player)
    }
}

impl fmt::Display for WinnerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinnerResult::Single(name) => f.write_str(name),
            WinnerResult::Tie(names) => write!(f, "Tie between {}", names.join(", ")),
        }
    }
}
