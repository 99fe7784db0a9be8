use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{
    AuthCommands, BlogCommands, ContactCommands, PaperCommands, ResearchCommands, SessionCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Admin login, logout and session status.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Blog posts.
    Blog {
        #[command(subcommand)]
        action: BlogCommands,
    },
    /// Research projects.
    Research {
        #[command(subcommand)]
        action: ResearchCommands,
    },
    /// Publications.
    Papers {
        #[command(subcommand)]
        action: PaperCommands,
    },
    /// Contact form and admin inbox.
    Contact {
        #[command(subcommand)]
        action: ContactCommands,
    },
    /// Admin dashboard: verified user and content counts.
    Dashboard,
    /// Session expiry monitoring.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Print the JSON Schema of an entity or payload.
    Schema(SchemaArgs),
    /// Apply a markdown toolbar action to text.
    Markdown(MarkdownArgs),
}

impl Commands {
    /// Whether this run ends the session on purpose.
    #[must_use]
    pub const fn is_logout(&self) -> bool {
        matches!(
            self,
            Self::Auth {
                action: AuthCommands::Logout
            }
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaEntity {
    Blog,
    BlogPayload,
    Research,
    ResearchPayload,
    Publication,
    PublicationPayload,
    Contact,
    ContactPayload,
    Identity,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Entity to describe.
    #[arg(value_enum)]
    pub entity: SchemaEntity,
}

#[derive(Clone, Debug, Args)]
pub struct MarkdownArgs {
    /// bold, italic, heading, link, code or list
    pub syntax: String,
    /// Read text from this file instead of stdin.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Selection start (byte offset). Defaults to the end of the text.
    #[arg(long)]
    pub start: Option<usize>,
    /// Selection end (byte offset). Defaults to `--start`.
    #[arg(long)]
    pub end: Option<usize>,
    /// Write the result back to `--file`.
    #[arg(long, requires = "file")]
    pub write: bool,
}
