//! Battle record validation command implementation.

use super::{load_report, CliError};
use battleview::battle::check_invariants;
use battleview::{Battle, BattleRecord};
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any checked battle is invalid.
pub(crate) fn execute(file: &Path, battle: Option<u32>) -> Result<(), CliError> {
    let mut report = load_report(file)?;

    println!("Validating: {}", file.display());

    let records: Vec<BattleRecord> = match battle {
        Some(num) => vec![report.take_battle(num)?],
        None => std::mem::take(&mut report.battles),
    };

    let mut failures = 0usize;
    for record in records {
        if !validate_battle(record) {
            failures += 1;
        }
    }

    println!();
    if failures > 0 {
        return Err(CliError::new(format!("{failures} battle(s) failed validation")));
    }

    println!("Validation successful!");
    Ok(())
}

/// Check one battle, printing each step. Returns whether it passed.
fn validate_battle(record: BattleRecord) -> bool {
    println!();
    println!("Battle #{}:", record.num);

    let unknown_plans = record
        .tokens
        .iter()
        .filter(|t| {
            !(t.tactic.is_known()
                && t.primary_target.is_known()
                && t.secondary_target.is_known()
                && t.attack_who.is_known())
        })
        .count();

    let battle = match Battle::new(record) {
        Ok(battle) => {
            print_check("Record structure", true);
            battle
        }
        Err(e) => {
            print_check("Record structure", false);
            println!("      {e}");
            return false;
        }
    };

    let violations = check_invariants(&battle);
    print_check("Phase invariants", violations.is_empty());
    for violation in &violations {
        println!("      {violation}");
    }

    println!("  Summary:");
    println!("    Tokens:         {}", battle.tokens().len());
    println!("    Rounds:         {}", battle.total_rounds());
    println!("    Logged actions: {}", battle.total_phases());
    println!("    Snapshots:      {}", battle.phase_count());
    let round_zero = battle.record().actions_per_round.first().map_or(0, Vec::len);
    if round_zero > 0 {
        println!("    Note: {round_zero} round 0 action(s) are not replayed");
    }
    if unknown_plans > 0 {
        println!("    Note: {unknown_plans} token(s) use battle plan values unknown to this build");
    }

    violations.is_empty()
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
