use clap::{Args, Subcommand};

/// Admin authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Exchange username and password for a session token.
    Login(AuthLoginArgs),
    /// Forget the stored token.
    Logout,
    /// Show the stored session without contacting the server.
    Status,
    /// Ask the server whether the stored token is still accepted.
    Verify,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Admin username.
    #[arg(long, env = "FOLIO_USERNAME")]
    pub username: String,

    /// Admin password. Read from stdin when not given.
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
