//! List command implementation.

use super::output::format_battle_line;
use super::{load_report, CliError};
use battleview::Battle;
use std::path::Path;

/// Execute the list command.
///
/// Battles that fail validation are listed with their error rather than
/// aborting the listing.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded.
pub(crate) fn execute(file: &Path) -> Result<(), CliError> {
    let report = load_report(file)?;

    println!("{} battle(s) in {}", report.battles.len(), file.display());
    println!();

    for record in &report.battles {
        let num = record.num;
        match Battle::new(record.clone()) {
            Ok(battle) => println!("{}", format_battle_line(&battle, &report)),
            Err(e) => println!("#{num:<4} invalid: {e}"),
        }
    }

    Ok(())
}
