//! CLI command implementations for Battleview.

pub(crate) mod list;
pub(crate) mod replay;
pub(crate) mod validate;

mod output;

use battleview::{BattleRecord, PlaybackError, RecordError, TurnReport};
use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReplayFormat {
    /// Interactive TUI.
    Tui,
    /// Plain text output.
    Text,
    /// Structured text for LLM consumption.
    Llm,
    /// Machine-readable JSON with every phase snapshot.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<RecordError> for CliError {
    fn from(e: RecordError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<PlaybackError> for CliError {
    fn from(e: PlaybackError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load a turn report, or a single battle record wrapped as one.
pub(crate) fn load_report(path: &Path) -> Result<TurnReport, CliError> {
    let json = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;

    let value: serde_json::Value = serde_json::from_str(&json)
        .map_err(|e| CliError::new(format!("Failed to parse {}: {e}", path.display())))?;

    if value.get("battles").is_some() {
        let report = TurnReport::from_json(&json)?;
        debug!(battles = report.battles.len(), "loaded turn report");
        Ok(report)
    } else {
        let record = BattleRecord::from_json(&json)?;
        debug!(battle = record.num, "loaded single battle record");
        Ok(TurnReport {
            planets: Vec::new(),
            battles: vec![record],
        })
    }
}

/// Pick one battle out of a report.
///
/// Without an explicit number the report must hold exactly one battle.
pub(crate) fn select_battle(
    report: &mut TurnReport,
    battle: Option<u32>,
) -> Result<BattleRecord, CliError> {
    if let Some(num) = battle {
        return Ok(report.take_battle(num)?);
    }

    match report.battles.len() {
        0 => Err(CliError::new("No battles in file")),
        1 => Ok(report.battles.remove(0)),
        _ => {
            let nums: Vec<String> = report.battles.iter().map(|b| b.num.to_string()).collect();
            Err(CliError::new(format!(
                "File holds {} battles ({}); pick one with --battle",
                nums.len(),
                nums.join(", ")
            )))
        }
    }
}
