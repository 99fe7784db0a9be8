//! Markdown toolbar helper for the admin content editors.
//!
//! Wraps the current selection (or a placeholder when nothing is selected)
//! in the chosen markdown construct and reports where the cursor should land.

use std::ops::Range;
use std::str::FromStr;

use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownSyntax {
    Bold,
    Italic,
    Heading,
    Link,
    Code,
    List,
}

impl MarkdownSyntax {
    const fn placeholder(self) -> &'static str {
        match self {
            Self::Bold => "bold text",
            Self::Italic => "italic text",
            Self::Heading => "Heading",
            Self::Link => "link text",
            Self::Code => "code here",
            Self::List => "list item",
        }
    }

    /// Cursor offset from the selection start after insertion.
    const fn cursor_offset(self) -> usize {
        match self {
            Self::Bold => 2,
            Self::Italic | Self::Link => 1,
            Self::Heading | Self::List => 3,
            Self::Code => 10,
        }
    }

    fn wrap(self, inner: &str) -> String {
        match self {
            Self::Bold => format!("**{inner}**"),
            Self::Italic => format!("_{inner}_"),
            Self::Heading => format!("## {inner}"),
            Self::Link => format!("[{inner}](url)"),
            Self::Code => format!("```python\n{inner}\n```"),
            Self::List => format!("\n- {inner}\n- item 2"),
        }
    }
}

impl FromStr for MarkdownSyntax {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "heading" => Ok(Self::Heading),
            "link" => Ok(Self::Link),
            "code" => Ok(Self::Code),
            "list" => Ok(Self::List),
            other => Err(CoreError::validation("syntax", format!("unknown markdown syntax '{other}'"))),
        }
    }
}

/// Result of a toolbar insertion: the new text and the byte offset for the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    pub cursor: usize,
}

/// Apply `syntax` to `selection` within `text`.
///
/// The selection is a byte range; out-of-bounds or inverted ranges are clamped
/// and offsets inside a multi-byte character snap back to its start.
#[must_use]
pub fn insert_markdown(text: &str, selection: Range<usize>, syntax: MarkdownSyntax) -> Insertion {
    let start = floor_char_boundary(text, selection.start);
    let end = floor_char_boundary(text, selection.end.max(start));

    let selected = &text[start..end];
    let inner = if selected.is_empty() {
        syntax.placeholder()
    } else {
        selected
    };

    let mut out = String::with_capacity(text.len() + inner.len() + 16);
    out.push_str(&text[..start]);
    out.push_str(&syntax.wrap(inner));
    out.push_str(&text[end..]);

    Insertion {
        text: out,
        cursor: start + syntax.cursor_offset(),
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
