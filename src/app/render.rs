//! Plain-text views of the roster and the scoreboard.

use crate::core::roster::RosterManager;
use crate::core::scoring::{format_raw, format_score};
use crate::core::session::GameSession;
use crate::domain::ports::LedgerStore;
use std::fmt::Write;

pub fn render_roster(roster: &RosterManager) -> String {
    let mut out = String::from("Add Players\n");

    if let Some(error) = roster.last_error() {
        let _ = writeln!(out, "❌ {}", error);
    }

    if !roster.is_empty() {
        let _ = writeln!(out, "Players: ({} added)", roster.len());
        for (i, player) in roster.players().iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, player);
        }
    }

    if roster.can_start() {
        let _ = writeln!(out, "Type 'start' to start the game with {} players.", roster.len());
    } else {
        let _ = writeln!(out, "Add at least {} players.", roster.min_players());
    }
    out
}

/// Rounds as columns, the pending round as `Current`, totals once the game is over.
pub fn render_scoreboard<S: LedgerStore>(session: &GameSession<S>) -> String {
    let finished = session.is_finished();
    let ledger = session.ledger();

    let mut header = vec!["Player".to_string()];
    header.extend((1..=ledger.len()).map(|n| format!("Round {}", n)));
    header.push("Current".to_string());
    if finished {
        header.push("Total".to_string());
    }

    let mut rows = vec![header];
    for player in session.roster() {
        let marker = match session.winner() {
            Some(winner) if winner.contains(player) => "* ",
            _ => "  ",
        };
        let mut row = vec![format!("{}{}", marker, player)];
        row.extend(ledger.iter().map(|round| format_raw(round.get(player))));
        row.push(format_raw(session.pending_score(player)));
        if finished {
            row.push(format_score(session.total(player)));
        }
        rows.push(row);
    }

    let mut out = String::from("Scoreboard\n");
    if let Some(error) = session.last_error() {
        let _ = writeln!(out, "❌ {}", error);
    }
    out.push_str(&format_table(&rows));

    match session.winner() {
        Some(winner) => {
            let _ = writeln!(out, "🏆 Winner: {}", winner);
            out.push_str("Game Complete!\n");
        }
        None => {
            let totals: Vec<String> = session
                .totals()
                .into_iter()
                .map(|(player, total)| format!("{} {}", player, format_score(total)))
                .collect();
            let _ = writeln!(out, "Running totals: {}", totals.join(", "));
        }
    }
    out
}

/// Left-aligned columns separated by ` | `.
pub fn format_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        let _ = writeln!(out, "{}", cells.join(" | ").trim_end());

        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            let _ = writeln!(out, "{}", rule.join("-+-"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{JsonLedgerStore, MemoryStore};
    use crate::core::session::SessionSettings;
    use crate::domain::model::RoundStage;

    #[test]
    fn test_render_roster_hints() {
        let mut roster = RosterManager::default();
        assert!(render_roster(&roster).contains("Add at least 2 players."));

        roster.add_player("Ana").unwrap();
        let _ = roster.add_player("Ana");
        let view = render_roster(&roster);
        assert!(view.contains("❌ Player name must be unique."));
        assert!(view.contains("  1. Ana"));

        roster.add_player("Bo").unwrap();
        assert!(render_roster(&roster).contains("start the game with 2 players"));
    }

    #[test]
    fn test_format_table_aligns_columns() {
        let rows = vec![
            vec!["Player".to_string(), "Round 1".to_string()],
            vec!["Al".to_string(), "12".to_string()],
        ];
        assert_eq!(
            format_table(&rows),
            "Player | Round 1\n-------+--------\nAl     | 12\n"
        );
    }

    #[test]
    fn test_render_finished_scoreboard() {
        let mut session = GameSession::new(JsonLedgerStore::new(MemoryStore::new()), SessionSettings::default());
        session.start(vec!["A".into(), "B".into(), "C".into()]).unwrap();
        session.set_pending_score("A", "5").unwrap();
        session.set_pending_score("B", "3").unwrap();
        session.set_pending_score("C", "3").unwrap();
        session.commit_round(RoundStage::Finish).unwrap();

        let view = render_scoreboard(&session);
        assert!(view.contains("Total"));
        assert!(view.contains("* B"));
        assert!(view.contains("* C"));
        assert!(!view.contains("* A"));
        assert!(view.contains("🏆 Winner: Tie between B, C"));
    }

    #[test]
    fn test_render_in_progress_shows_pending_and_error() {
        let mut session = GameSession::new(JsonLedgerStore::new(MemoryStore::new()), SessionSettings::default());
        session.start(vec!["A".into(), "B".into()]).unwrap();
        session.set_pending_score("A", "7").unwrap();
        let _ = session.next_round();

        let view = render_scoreboard(&session);
        assert!(view.contains("❌ All players must enter their scores before proceeding."));
        assert!(view.contains("Current"));
        assert!(!view.contains("Total"));
        assert!(view.contains("Running totals: A 0, B 0"));
    }
}
