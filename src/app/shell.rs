use crate::adapters::confirm::{FixedAnswer, LinePrompt};
use crate::app::render::{render_roster, render_scoreboard};
use crate::core::keeper::{Screen, ScoreKeeper};
use crate::domain::model::RoundStage;
use crate::domain::ports::LedgerStore;
use crate::utils::error::{Result, ScoreError};
use serde_json::Value;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    /// Zero-based roster position.
    Remove(usize),
    List,
    Start,
    Score { player: String, value: String },
    Round(Vec<String>),
    Next,
    Finish,
    Board,
    Reset,
    Help,
    Quit,
    Empty,
    Usage(&'static str),
    Unknown(String),
}

pub fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "add" => ShellCommand::Add(rest.to_string()),
        "remove" | "rm" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => ShellCommand::Remove(n - 1),
            _ => ShellCommand::Usage("remove <number>"),
        },
        "list" | "ls" => ShellCommand::List,
        "start" => ShellCommand::Start,
        "score" | "set" => match rest.rsplit_once(char::is_whitespace) {
            Some((player, value)) if !player.trim().is_empty() => ShellCommand::Score {
                player: player.trim().to_string(),
                value: value.to_string(),
            },
            _ => ShellCommand::Usage("score <player> <value>"),
        },
        "round" => {
            if rest.is_empty() {
                ShellCommand::Usage("round <score> <score> ...")
            } else {
                ShellCommand::Round(rest.split_whitespace().map(str::to_string).collect())
            }
        }
        "next" => ShellCommand::Next,
        "finish" => ShellCommand::Finish,
        "board" | "show" => ShellCommand::Board,
        "reset" => ShellCommand::Reset,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(word.to_string()),
    }
}

const ROSTER_HELP: &str = "\
Commands:
  add <name>        add a player
  remove <number>   remove the player at that position
  list              show the players
  start             start the game
  reset             discard the current game
  quit              leave (the game stays saved)";

const SCOREBOARD_HELP: &str = "\
Commands:
  score <player> <value>   enter a score for the current round
  round <v1> <v2> ...      enter one score per player, in table order
  next                     record the round and start the next one
  finish                   record the round and declare the winner
  board                    show the scoreboard
  reset                    discard the game and go back to player entry
  quit                     leave (the game stays saved)";

/// Line-driven front end over a [`ScoreKeeper`].
pub struct Shell<R: BufRead, W: Write, S: LedgerStore> {
    input: R,
    output: W,
    keeper: ScoreKeeper<S>,
    assume_yes: bool,
}

impl<R: BufRead, W: Write, S: LedgerStore> Shell<R, W, S> {
    pub fn new(input: R, output: W, keeper: ScoreKeeper<S>, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            keeper,
            assume_yes,
        }
    }

    pub fn keeper(&self) -> &ScoreKeeper<S> {
        &self.keeper
    }

    pub fn into_parts(self) -> (ScoreKeeper<S>, W) {
        (self.keeper, self.output)
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.show_screen()?;

        loop {
            write!(self.output, "{}", self.prompt())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            let command = parse_command(&line);
            tracing::debug!("Shell command: {:?}", command);
            if !self.execute(command)? {
                break;
            }
        }

        tracing::debug!("Shell closed");
        Ok(())
    }

    fn prompt(&self) -> String {
        let session = self.keeper.session();
        match self.keeper.screen() {
            Screen::Roster => "players> ".to_string(),
            Screen::Scoreboard if session.is_finished() => "finished> ".to_string(),
            Screen::Scoreboard => format!("round {}> ", session.ledger().len() + 1),
        }
    }

    /// Returns `false` once the shell should stop.
    pub fn execute(&mut self, command: ShellCommand) -> Result<bool> {
        match command {
            ShellCommand::Empty => {}
            ShellCommand::Quit => return Ok(false),
            ShellCommand::Help => {
                let help = match self.keeper.screen() {
                    Screen::Roster => ROSTER_HELP,
                    Screen::Scoreboard => SCOREBOARD_HELP,
                };
                writeln!(self.output, "{}", help)?;
            }
            ShellCommand::Usage(usage) => writeln!(self.output, "Usage: {}", usage)?,
            ShellCommand::Unknown(word) => {
                writeln!(self.output, "Unknown command '{}'. Type 'help' for a list.", word)?
            }
            ShellCommand::Reset => self.reset()?,
            command => match self.keeper.screen() {
                Screen::Roster => self.roster_command(command)?,
                Screen::Scoreboard => self.scoreboard_command(command)?,
            },
        }
        Ok(true)
    }

    fn roster_command(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Add(name) => {
                let roster = self.keeper.roster_mut();
                roster.set_input(name);
                let result = roster.submit_input();
                if self.report(result)? {
                    self.show_screen()?;
                }
            }
            ShellCommand::Remove(index) => {
                match self.keeper.roster_mut().remove_player(index) {
                    Some(name) => writeln!(self.output, "Removed {}.", name)?,
                    None => writeln!(self.output, "No player at position {}.", index + 1)?,
                }
            }
            ShellCommand::List => self.show_screen()?,
            ShellCommand::Start => {
                let result = self.keeper.start_game();
                if self.report(result)? {
                    self.show_screen()?;
                }
            }
            _ => writeln!(self.output, "Start the game first. Type 'help' for a list.")?,
        }
        Ok(())
    }

    fn scoreboard_command(&mut self, command: ShellCommand) -> Result<()> {
        if self.keeper.session().is_finished()
            && matches!(command, ShellCommand::Score { .. } | ShellCommand::Round(_))
        {
            writeln!(self.output, "The game is finished. Type 'reset' to start over.")?;
            return Ok(());
        }

        match command {
            ShellCommand::Score { player, value } => {
                let result = self
                    .keeper
                    .session_mut()
                    .set_pending_score(&player, Value::String(value));
                self.report(result)?;
            }
            ShellCommand::Round(values) => self.enter_round(values)?,
            ShellCommand::Next => self.commit(RoundStage::Proceed)?,
            ShellCommand::Finish => self.commit(RoundStage::Finish)?,
            ShellCommand::Board => self.show_screen()?,
            _ => writeln!(self.output, "The game is already running. Type 'help' for a list.")?,
        }
        Ok(())
    }

    fn enter_round(&mut self, values: Vec<String>) -> Result<()> {
        let roster = self.keeper.session().roster().to_vec();
        if values.len() != roster.len() {
            writeln!(
                self.output,
                "Expected {} scores ({}), got {}.",
                roster.len(),
                roster.join(", "),
                values.len()
            )?;
            return Ok(());
        }

        for (player, value) in roster.iter().zip(values) {
            let result = self
                .keeper
                .session_mut()
                .set_pending_score(player, Value::String(value));
            if !self.report(result)? {
                return Ok(());
            }
        }
        Ok(())
    }

    fn commit(&mut self, stage: RoundStage) -> Result<()> {
        let result = self.keeper.session_mut().commit_round(stage);
        if self.report(result)? {
            self.show_screen()?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        let reset = if self.assume_yes {
            self.keeper.reset_game(&mut FixedAnswer::new(true))?
        } else {
            let mut prompt = LinePrompt::new(&mut self.input, &mut self.output);
            self.keeper.reset_game(&mut prompt)?
        };

        if reset {
            writeln!(self.output, "Game reset.")?;
            self.show_screen()?;
        } else {
            writeln!(self.output, "Reset cancelled.")?;
        }
        Ok(())
    }

    /// Prints input and state errors; anything else stops the shell.
    fn report(&mut self, result: Result<()>) -> Result<bool> {
        match result {
            Ok(()) => Ok(true),
            Err(e @ ScoreError::InvalidTransition { .. }) => {
                writeln!(self.output, "❌ {}", e)?;
                Ok(false)
            }
            Err(e) if e.is_input_error() => {
                writeln!(self.output, "❌ {}", e)?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn show_screen(&mut self) -> Result<()> {
        let view = match self.keeper.screen() {
            Screen::Roster => render_roster(self.keeper.roster()),
            Screen::Scoreboard => render_scoreboard(self.keeper.session()),
        };
        write!(self.output, "{}", view)?;
        Ok(())
    }
}
