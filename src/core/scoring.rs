//! Pure computations over committed rounds. Nothing here touches session state.

use crate::domain::model::{Ledger, WinnerResult};
use serde_json::Value;

/// Numeric meaning of an entered score.
///
/// Numbers count as-is and strings are parsed after trimming. Empty text,
/// missing values and anything that does not parse to a finite number count as zero.
pub fn numeric_score(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Whether a pending value counts as entered when a round is committed.
pub fn is_entered(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Running total of `player` across every round of the ledger.
pub fn total_for(ledger: &Ledger, player: &str) -> f64 {
    ledger
        .iter()
        .map(|round| numeric_score(round.get(player)))
        .sum()
}

pub fn totals_for(ledger: &Ledger, roster: &[String]) -> Vec<(String, f64)> {
    roster
        .iter()
        .map(|player| (player.clone(), total_for(ledger, player)))
        .collect()
}

/// Players holding the lowest total. `None` only for an empty roster.
pub fn winner_for(ledger: &Ledger, roster: &[String]) -> Option<WinnerResult> {
    let totals = totals_for(ledger, roster);
    let min = totals
        .iter()
        .map(|(_, total)| *total)
        .fold(None, |acc: Option<f64>, total| match acc {
            Some(current) if current <= total => Some(current),
            _ => Some(total),
        })?;

    let mut leaders: Vec<String> = totals
        .into_iter()
        .filter(|(_, total)| *total == min)
        .map(|(player, _)| player)
        .collect();

    if leaders.len() == 1 {
        leaders.pop().map(WinnerResult::Single)
    } else {
        Some(WinnerResult::Tie(leaders))
    }
}

/// Totals sorted from best (lowest) to worst. Equal totals keep roster order.
pub fn standings_for(ledger: &Ledger, roster: &[String]) -> Vec<(String, f64)> {
    let mut totals = totals_for(ledger, roster);
    totals.sort_by(|a, b| a.1.total_cmp(&b.1));
    totals
}

/// Renders a total without a trailing `.0` for whole numbers.
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Renders a raw entered value the way it was typed.
pub fn format_raw(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
