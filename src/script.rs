//! Line-oriented command script for the `pagectl` binary.
//!
//! Each input line is one action against a [`ListDriver`]; after it the
//! current snapshot is printed as a single status line:
//!
//! ```text
//! page=2/3 items=20 total=25 more=true loading=false fetching=false refreshing=false query="abc"
//! ```
//!
//! `search` only records the keystroke so that several `search` lines in a
//! row coalesce like typing does. Every other action waits for its fetch to
//! settle before printing.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::driver::ListDriver;
use crate::model::AppError;
use crate::state::{selection_channel, ListSnapshot, SelectionOutcome};

/// How long a step may take to settle before the script moves on.
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Type into the search field. Empty text clears the search.
    Search(String),
    /// The list reached its end.
    More,
    /// Pull to refresh.
    Refresh,
    /// Retry the last failed page.
    Retry,
    /// Print the status line.
    Show,
    /// Let pending searches and fetches settle.
    Wait,
    /// Pick the item at this index.
    Select(usize),
    /// Stop reading input.
    Quit,
}

/// Errors parsing a script line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// First word is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Command needs an argument that is missing.
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    /// `select` argument is not a non-negative integer.
    #[error("invalid index: {0}")]
    InvalidIndex(String),
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns `ScriptError` for unknown commands or bad arguments.
pub fn parse_command(line: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word {
        // Search text is kept verbatim after the first space.
        "search" => ScriptCommand::Search(rest.to_string()),
        "more" => ScriptCommand::More,
        "refresh" => ScriptCommand::Refresh,
        "retry" => ScriptCommand::Retry,
        "show" => ScriptCommand::Show,
        "wait" => ScriptCommand::Wait,
        "quit" | "exit" => ScriptCommand::Quit,
        "select" => {
            let arg = rest.trim();
            if arg.is_empty() {
                return Err(ScriptError::MissingArgument("select"));
            }
            let index = arg
                .parse()
                .map_err(|_| ScriptError::InvalidIndex(arg.to_string()))?;
            ScriptCommand::Select(index)
        }
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

/// Render a snapshot as one status line.
pub fn format_status<T>(snapshot: &ListSnapshot<'_, T>) -> String {
    let total_pages = snapshot
        .total_pages
        .map_or_else(|| "?".to_string(), |n| n.to_string());
    let total_count = snapshot
        .total_count
        .map_or_else(|| "?".to_string(), |n| n.to_string());

    format!(
        "page={}/{} items={} total={} more={} loading={} fetching={} refreshing={} query={:?}",
        snapshot.current_page,
        total_pages,
        snapshot.items.len(),
        total_count,
        snapshot.has_more_pages,
        snapshot.is_loading,
        snapshot.is_fetching,
        snapshot.is_refreshing,
        snapshot.search_query,
    )
}

/// Output options for [`run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptOptions {
    /// Print every item after the status line.
    pub verbose: bool,
}

/// Run commands from `input` against `driver`, writing to `output`.
///
/// Pending work is settled when input ends or on `quit`.
///
/// # Errors
///
/// Returns `AppError::Io` if reading input or writing output fails.
pub fn run<R: BufRead, W: Write>(
    driver: &mut ListDriver<Value>,
    input: R,
    mut output: W,
    options: ScriptOptions,
) -> Result<(), AppError> {
    driver.wait_until_idle(SETTLE_TIMEOUT);
    write_snapshot(driver, &mut output, options)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "error: {e}")?;
                continue;
            }
        };
        debug!(?command, "script command");

        match command {
            ScriptCommand::Search(text) => {
                driver.set_search_text(text);
                driver.poll(Instant::now());
            }
            ScriptCommand::More => {
                driver.load_more();
                settle(driver);
            }
            ScriptCommand::Refresh => {
                driver.refresh();
                settle(driver);
            }
            ScriptCommand::Retry => {
                driver.retry();
                settle(driver);
            }
            ScriptCommand::Show => {}
            ScriptCommand::Wait => settle(driver),
            ScriptCommand::Select(index) => {
                writeln!(output, "{}", select(driver, index))?;
                continue;
            }
            ScriptCommand::Quit => break,
        }

        write_snapshot(driver, &mut output, options)?;
    }

    if !driver.is_idle() {
        settle(driver);
    }
    info!(fetches = driver.fetch_count(), "script finished");
    output.flush()?;
    Ok(())
}

fn settle(driver: &mut ListDriver<Value>) {
    if !driver.wait_until_idle(SETTLE_TIMEOUT) {
        warn!(timeout = ?SETTLE_TIMEOUT, "step did not settle");
    }
}

/// Hand the item at `index` back through a selection channel, the way a
/// picker screen returns its choice to the screen that opened it.
fn select(driver: &ListDriver<Value>, index: usize) -> String {
    let (picker, caller) = selection_channel();

    match driver.snapshot().items.get(index) {
        Some(item) => {
            // The receiver is alive until `wait` below.
            let _ = picker.select(item.clone());
        }
        None => picker.cancel(),
    }

    match caller.wait() {
        SelectionOutcome::Selected(item) => format!("selected: {item}"),
        SelectionOutcome::Cancelled | SelectionOutcome::Pending => {
            format!("selection cancelled: no item at index {index}")
        }
    }
}

fn write_snapshot<W: Write>(
    driver: &ListDriver<Value>,
    output: &mut W,
    options: ScriptOptions,
) -> Result<(), AppError> {
    let snapshot = driver.snapshot();
    writeln!(output, "{}", format_status(&snapshot))?;
    if let Some(error) = snapshot.error {
        writeln!(output, "error: {error}")?;
    }
    if options.verbose {
        for item in snapshot.items {
            writeln!(output, "  {item}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
