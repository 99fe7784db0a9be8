//! Terminal styling, resolved once from the global flags.
//!
//! Command output goes to stdout and notices and errors go to stderr. Either
//! may be redirected, so each stream decides on color separately.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};
use crate::commands::shared::errors;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    /// Status words in tables.
    pub table_color: bool,
    /// Session notices, error reports and hints.
    pub stderr_color: bool,
    pub term_width: Option<usize>,
}

/// Role of a stderr line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Error,
    Notice,
    Hint,
}

impl Tone {
    const fn sgr(self) -> &'static str {
        match self {
            Self::Error => "31",
            Self::Notice => "33",
            Self::Hint => "2",
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLUMNS").ok().as_deref(),
    ));
}

fn resolve(
    flags: &GlobalFlags,
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
    columns: Option<&str>,
) -> UiPrefs {
    let wants = |tty: bool| match flags.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => tty && !no_color,
    };
    UiPrefs {
        table_color: flags.format == OutputFormat::Table
            && wants(stdout_tty)
            && !(flags.quiet && flags.color == ColorMode::Auto),
        stderr_color: wants(stderr_tty),
        term_width: columns
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|width| *width >= 40),
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[must_use]
pub fn paint(text: &str, tone: Tone, color: bool) -> String {
    if color {
        format!("\u{1b}[{}m{text}\u{1b}[0m", tone.sgr())
    } else {
        text.to_string()
    }
}

/// Session expiry warnings and sign-out lines.
pub fn notice(message: &str) {
    eprintln!("{}", paint(message, Tone::Notice, prefs().stderr_color));
}

/// A failed command's error chain, followed by a hint when the failure
/// maps onto a known kind.
pub fn report_error(error: &anyhow::Error) {
    let color = prefs().stderr_color;
    let (message, hint) = errors::report(error);
    eprintln!("{}", paint(&message, Tone::Error, color));
    if let Some(hint) = hint {
        eprintln!("{}", paint(&format!("hint: {hint}"), Tone::Hint, color));
    }
}
