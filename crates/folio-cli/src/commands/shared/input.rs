//! Terminal input: prompts, confirmations, and text read from files.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;

/// Print `prompt` to stderr and read one line from stdin, without the newline.
pub fn read_line(prompt: &str) -> anyhow::Result<String> {
    eprint!("{prompt}");
    io::stderr().flush().context("failed to write prompt")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask a yes/no question on the terminal; anything but yes declines.
pub fn confirm_on_stdin(prompt: &str) -> bool {
    match read_line(&format!("{prompt}\n[y/N] ")) {
        Ok(answer) => is_yes(&answer),
        Err(error) => {
            tracing::warn!(%error, "confirmation unreadable; treating as no");
            false
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// `inline`, or the contents of `file` when given.
pub fn text_or_file(inline: Option<&str>, file: Option<&Path>) -> anyhow::Result<Option<String>> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("failed to read {}", path.display())),
        None => Ok(inline.map(str::to_string)),
    }
}

/// Overwrite `slot` when a value was given.
pub fn set_text(slot: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_yes_confirms() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn file_wins_over_inline_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.md");
        std::fs::write(&path, "# From file\n").unwrap();

        let text = text_or_file(Some("inline"), Some(&path)).unwrap();
        assert_eq!(text.as_deref(), Some("# From file\n"));
        assert_eq!(text_or_file(Some("inline"), None).unwrap().as_deref(), Some("inline"));
        assert_eq!(text_or_file(None, None).unwrap(), None);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = text_or_file(None, Some(Path::new("/nonexistent/post.md"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/post.md"));
    }

    #[test]
    fn set_text_keeps_value_when_absent() {
        let mut slot = String::from("kept");
        set_text(&mut slot, None);
        assert_eq!(slot, "kept");
        set_text(&mut slot, Some(&"new".to_string()));
        assert_eq!(slot, "new");
    }
}
