use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::content::PageArgs;

/// Contact form commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ContactCommands {
    /// Send a message through the public contact form.
    Send(ContactSendArgs),
    /// List received messages (admin).
    List(PageArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ContactSendArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub subject: Option<String>,
    #[arg(long, required_unless_present = "message_file")]
    pub message: Option<String>,
    /// Read the message body from a file.
    #[arg(long, conflicts_with = "message")]
    pub message_file: Option<PathBuf>,
}
