use crate::core::roster::RosterManager;
use crate::core::session::{GameSession, SessionSettings};
use crate::domain::model::SessionState;
use crate::domain::ports::{Confirmation, LedgerStore};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Roster,
    Scoreboard,
}

/// Switches between player entry and the scoreboard of a running game.
pub struct ScoreKeeper<S: LedgerStore> {
    roster: RosterManager,
    session: GameSession<S>,
}

impl<S: LedgerStore> ScoreKeeper<S> {
    /// Restores a saved game when one exists, otherwise opens player entry.
    pub fn activate(store: S, settings: SessionSettings) -> Result<Self> {
        let roster = roster_for(&settings);
        let session = GameSession::restore(store, settings)?;
        Ok(Self { roster, session })
    }

    pub fn screen(&self) -> Screen {
        match self.session.state() {
            SessionState::NotStarted => Screen::Roster,
            SessionState::InProgress | SessionState::Finished => Screen::Scoreboard,
        }
    }

    pub fn roster(&self) -> &RosterManager {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut RosterManager {
        &mut self.roster
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession<S> {
        &mut self.session
    }

    pub fn start_game(&mut self) -> Result<()> {
        let players = self.roster.start_session()?;
        self.session.start(players)
    }

    /// On a confirmed reset player entry starts over with an empty roster.
    pub fn reset_game(&mut self, confirmation: &mut dyn Confirmation) -> Result<bool> {
        let reset = self.session.reset(confirmation)?;
        if reset {
            self.roster = roster_for(self.session.settings());
        }
        Ok(reset)
    }
}

fn roster_for(settings: &SessionSettings) -> RosterManager {
    RosterManager::new(settings.min_players).with_reserved_keys(settings.reserved_keys.clone())
}
