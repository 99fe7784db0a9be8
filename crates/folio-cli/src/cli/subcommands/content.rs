//! Subcommands shared by the three content collections.
//!
//! `list` and `get` use the public views; `create`, `update` and `delete`
//! go through the guarded admin view. Field flags left unset keep the form's
//! current value (the blank default on create, the stored value on update).

use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Clone, Debug, Args)]
pub struct PageArgs {
    /// Items to skip.
    #[arg(long, default_value_t = 0)]
    pub skip: u32,
    /// Page size (overrides the global --limit).
    #[arg(long = "page-size")]
    pub page_size: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    pub id: i64,
    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum BlogCommands {
    /// List posts, newest page first.
    List(PageArgs),
    /// Show one post.
    Get { id: i64 },
    /// Write a new post.
    Create(BlogFields),
    /// Edit an existing post.
    Update {
        id: i64,
        #[command(flatten)]
        fields: BlogFields,
    },
    /// Delete a post.
    Delete(DeleteArgs),
}

#[derive(Clone, Debug, Default, Args)]
pub struct BlogFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,
    /// Read the markdown body from a file.
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    #[arg(long)]
    pub excerpt: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub published: Option<bool>,
    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ResearchCommands {
    /// List projects in display order.
    List,
    /// Show one project.
    Get { id: i64 },
    /// Add a project.
    Create(ResearchFields),
    /// Edit an existing project.
    Update {
        id: i64,
        #[command(flatten)]
        fields: ResearchFields,
    },
    /// Delete a project.
    Delete(DeleteArgs),
}

#[derive(Clone, Debug, Default, Args)]
pub struct ResearchFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "description_file")]
    pub description: Option<String>,
    #[arg(long)]
    pub description_file: Option<PathBuf>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub project_url: Option<String>,
    /// Comma-separated technologies.
    #[arg(long)]
    pub technologies: Option<String>,
    /// Completed, Ongoing or Planned.
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub order: Option<i32>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum PaperCommands {
    /// List publications, newest first.
    List,
    /// Show one publication.
    Get { id: i64 },
    /// Add a publication.
    Create(PaperFields),
    /// Edit an existing publication.
    Update {
        id: i64,
        #[command(flatten)]
        fields: PaperFields,
    },
    /// Delete a publication.
    Delete(DeleteArgs),
}

#[derive(Clone, Debug, Default, Args)]
pub struct PaperFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub authors: Option<String>,
    #[arg(long)]
    pub journal: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    /// Bare DOI or a doi.org link.
    #[arg(long)]
    pub doi: Option<String>,
    #[arg(long)]
    pub pdf_url: Option<String>,
    #[arg(long = "abstract")]
    pub abstract_text: Option<String>,
    #[arg(long)]
    pub citation: Option<String>,
    #[arg(long)]
    pub order: Option<i32>,
}
