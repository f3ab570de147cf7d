//! Console output: color decisions, tables and status lines.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Modify, Panel, Style};
use tabled::{Table, Tabled};

use crate::cli::ColorMode;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Green for a healthy link, red for anything else.
pub fn paint_status(status: &str, connected: bool, color: bool) -> String {
    match (color, connected) {
        (false, _) => status.to_owned(),
        (true, true) => status.green().to_string(),
        (true, false) => status.red().to_string(),
    }
}

// ── Tables ───────────────────────────────────────────────────────────

/// Rounded table with a title panel; columns from `right_from` onward
/// are right-aligned.
pub fn render_titled_table<R: Tabled>(title: &str, rows: &[R], right_from: usize) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(right_from..)).with(Alignment::right()))
        .with(Panel::header(title))
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

// ── Printing ─────────────────────────────────────────────────────────

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Final status line after a completed run.
pub fn print_success(message: &str, color: bool, quiet: bool) {
    let line = if color {
        message.green().bold().to_string()
    } else {
        message.to_owned()
    };
    print_output(&line, quiet);
}

/// Final status line when the run stops early. Printed even in quiet mode.
pub fn print_failure(message: &str, color: bool) {
    let line = if color {
        message.red().bold().to_string()
    } else {
        message.to_owned()
    };
    print_output(&line, false);
}
