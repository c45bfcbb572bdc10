//! Terminal UI — spinners, step outcomes, and the confirmation gate.
//!
//! # Design goals
//!
//! - **Clean by default.** While a step runs the user sees only a spinner and a short label.
//! - **Informative on failure.** A failed step prints its full error message, including both
//!   resolution attempts when identity lookup is exhausted.
//! - **Scriptable.** The confirmation gate auto-accepts when stdin is not a terminal, so cron
//!   jobs and tests never hang on a prompt; `--force` skips it everywhere.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::ArmError;

// ─── Icons ───────────────────────────────────────────────────────────────────

/// Braille spinner frames — same style as indicatif's default.
static SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Green ✓  — printed when a step succeeds.
fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}
/// Red ✗    — printed when a step fails.
fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}

// ─── Step outcome ─────────────────────────────────────────────────────────────

/// The outcome of a single step of a flow.
#[derive(Debug)]
pub struct StepOutcome {
    /// Human-readable step label, e.g. `"Resolve storage account"`.
    pub label: String,
    /// Whether the step completed without error.
    pub success: bool,
    /// One-line detail shown next to the label on success (may be empty).
    pub detail: String,
    /// The error message, if any.
    pub error: Option<String>,
}

impl StepOutcome {
    /// Print the one-line summary (✓/✗ + label) to stdout.
    ///
    /// On failure, also prints the error message so the operator has
    /// everything without re-running.
    pub fn print(&self) {
        if self.success {
            if self.detail.is_empty() {
                println!("  {}  {}", icon_ok(), style(&self.label).bold());
            } else {
                println!(
                    "  {}  {}  {}",
                    icon_ok(),
                    style(&self.label).bold(),
                    style(&self.detail).dim()
                );
            }
        } else {
            println!("  {}  {}", icon_err(), style(&self.label).bold());
            if let Some(ref msg) = self.error {
                eprintln!();
                eprintln!("  {} {}", style("Error:").red().bold(), msg);
            }
        }
    }

    /// Returns `true` if the step did not succeed.
    pub const fn failed(&self) -> bool {
        !self.success
    }
}

// ─── Spinner ──────────────────────────────────────────────────────────────────

/// Create and start an indeterminate spinner for `label`.
fn make_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan}  {msg}")
            .unwrap()
            .tick_chars(SPINNER_CHARS),
    );
    pb.set_message(format!("{}", style(label).dim()));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ─── High-level step runner ───────────────────────────────────────────────────

/// Run one step of a flow behind a spinner.
///
/// Returns the outcome plus the step's value on success.  The spinner is
/// cleared before the outcome line is printed, so the terminal always
/// shows a clean, static summary when the step finishes.
pub fn run_step<T>(
    label: &str,
    f: impl FnOnce() -> Result<T, ArmError>,
) -> (StepOutcome, Option<T>) {
    let spinner = make_spinner(label);
    let result = f();
    spinner.finish_and_clear();

    match result {
        Ok(value) => (
            StepOutcome {
                label: label.to_string(),
                success: true,
                detail: String::new(),
                error: None,
            },
            Some(value),
        ),
        Err(e) => (
            StepOutcome {
                label: label.to_string(),
                success: false,
                detail: String::new(),
                error: Some(e.to_string()),
            },
            None,
        ),
    }
}

// ─── Confirmation gate ────────────────────────────────────────────────────────

/// Ask the operator to confirm a mutating action.
///
/// Returns `true` (proceed) when `force` is set or stdin is not an
/// interactive terminal.  Otherwise prompts `<action> '<target>'? [y/N]`
/// and accepts only an explicit `y`/`yes`.
pub fn confirm(action: &str, target: &str, force: bool) -> bool {
    if force {
        return true;
    }
    let term = console::Term::stdout();
    if !console::user_attended() {
        return true;
    }

    eprint!(
        "{} '{}'? [y/N] ",
        style(action).bold(),
        style(target).cyan()
    );
    match term.read_line() {
        Ok(line) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

// ─── Verbose diagnostics ──────────────────────────────────────────────────────

/// Print a dim diagnostic line when `--verbose` is set.
pub fn debug(verbose: bool, msg: impl AsRef<str>) {
    if verbose {
        eprintln!("  {}", style(msg.as_ref()).dim());
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── StepOutcome ───────────────────────────────────────────────────────────

    #[test]
    fn success_outcome_is_not_failed() {
        let (outcome, value) = run_step("Create trigger", || Ok(42));
        assert!(!outcome.failed());
        assert_eq!(value, Some(42));
        assert!(outcome.error.is_none());
    }

    #[test]
    fn failure_outcome_carries_the_error_message() {
        let (outcome, value): (StepOutcome, Option<()>) = run_step("Submit restore", || {
            Err(ArmError::Transport("connection refused".into()))
        });
        assert!(outcome.failed());
        assert!(value.is_none());
        assert!(outcome.error.as_deref().unwrap().contains("connection refused"));
    }

    #[test]
    fn print_does_not_panic_either_way() {
        let (ok, _) = run_step("A", || Ok(()));
        ok.print();
        let (err, _): (StepOutcome, Option<()>) =
            run_step("B", || Err(ArmError::Transport("boom".into())));
        err.print();
    }

    // ── confirm ───────────────────────────────────────────────────────────────

    #[test]
    fn force_always_confirms() {
        assert!(confirm("Create trigger", "nightly", true));
    }

    #[test]
    fn unattended_stdin_confirms() {
        // Test harnesses are never attended, so this exercises the
        // non-interactive path.
        assert!(confirm("Create trigger", "nightly", false));
    }

    // ── debug ─────────────────────────────────────────────────────────────────

    #[test]
    fn debug_is_silent_when_not_verbose() {
        debug(false, "should not appear");
        debug(true, "may appear on stderr");
    }
}
