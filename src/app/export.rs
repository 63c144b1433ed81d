use crate::core::scoring::{format_raw, format_score};
use crate::core::session::GameSession;
use crate::domain::ports::LedgerStore;
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }
}

/// Header plus one row per player: raw round values, then the running total.
pub fn scoreboard_rows<S: LedgerStore>(session: &GameSession<S>) -> Vec<Vec<String>> {
    let ledger = session.ledger();

    let mut header = vec!["Player".to_string()];
    header.extend((1..=ledger.len()).map(|n| format!("Round {}", n)));
    header.push("Total".to_string());

    let mut rows = vec![header];
    for (player, total) in session.totals() {
        let mut row = vec![player.clone()];
        row.extend(ledger.iter().map(|round| format_raw(round.get(&player))));
        row.push(format_score(total));
        rows.push(row);
    }
    rows
}

pub fn write_scoreboard<S: LedgerStore, W: Write>(
    session: &GameSession<S>,
    format: ExportFormat,
    writer: W,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(writer);

    for row in scoreboard_rows(session) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;

    tracing::debug!(
        "Exported {} rounds for {} players",
        session.ledger().len(),
        session.roster().len()
    );
    Ok(())
}

pub fn scoreboard_to_string<S: LedgerStore>(
    session: &GameSession<S>,
    format: ExportFormat,
) -> Result<String> {
    let mut buffer = Vec::new();
    write_scoreboard(session, format, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
