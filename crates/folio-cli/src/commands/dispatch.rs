use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Blog { action } => commands::blog::handle(&action, ctx, flags).await,
        Commands::Research { action } => commands::research::handle(&action, ctx, flags).await,
        Commands::Papers { action } => commands::papers::handle(&action, ctx, flags).await,
        Commands::Contact { action } => commands::contact::handle(&action, ctx, flags).await,
        Commands::Dashboard => commands::dashboard::handle(ctx, flags).await,
        Commands::Session { action } => commands::session::handle(&action, ctx, flags).await,
        Commands::Schema(_) | Commands::Markdown(_) => {
            unreachable!("schema/markdown are pre-dispatched in main")
        }
    }
}
