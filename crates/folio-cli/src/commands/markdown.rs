use std::io::Read;
use std::path::Path;

use anyhow::Context;
use folio_core::markdown::{Insertion, MarkdownSyntax, insert_markdown};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MarkdownArgs;
use crate::output::output;

#[derive(Serialize)]
struct MarkdownResponse {
    text: String,
    cursor: usize,
}

/// Handle `folio markdown`.
pub fn handle(args: &MarkdownArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let syntax: MarkdownSyntax = args.syntax.parse()?;
    let text = match &args.file {
        Some(path) => read_file(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read text from stdin")?;
            text
        }
    };

    let Insertion { text, cursor } = apply(&text, args.start, args.end, syntax);

    if args.write
        && let Some(path) = &args.file
    {
        std::fs::write(path, &text)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    output(&MarkdownResponse { text, cursor }, flags.format)
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// With no selection, insert at the end of the text.
fn apply(text: &str, start: Option<usize>, end: Option<usize>, syntax: MarkdownSyntax) -> Insertion {
    let start = start.unwrap_or(text.len());
    let end = end.unwrap_or(start);
    insert_markdown(text, start..end, syntax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_caret_at_end() {
        let result = apply("Intro ", None, None, MarkdownSyntax::Bold);
        assert_eq!(result.text, "Intro **bold text**");
        assert_eq!(result.cursor, 8);
    }

    #[test]
    fn end_defaults_to_start() {
        let result = apply("abc", Some(1), None, MarkdownSyntax::Italic);
        assert_eq!(result.text, "a_italic text_bc");
    }

    #[test]
    fn selection_is_wrapped() {
        let result = apply("see docs here", Some(4), Some(8), MarkdownSyntax::Link);
        assert_eq!(result.text, "see [docs](url) here");
    }
}
