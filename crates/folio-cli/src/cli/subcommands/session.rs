use clap::Subcommand;

/// Session expiry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Poll the stored token and report when it is about to expire.
    Watch {
        /// Check once and exit.
        #[arg(long)]
        once: bool,
    },
}
