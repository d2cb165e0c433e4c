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
        Commands::Paths(args) => commands::paths::handle(&args, ctx, flags).await,
        Commands::Tree(args) => commands::tree::handle(&args, ctx, flags).await,
        Commands::Set(args) => commands::set::handle(&args, ctx, flags).await,
        Commands::Remove(args) => commands::remove::handle(&args, ctx, flags).await,
        Commands::ResetVisibility(args) => {
            commands::reset_visibility::handle(&args, ctx, flags).await
        }
        Commands::Export(args) => commands::export::handle(&args, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Last => commands::last::handle(ctx, flags).await,
        Commands::Forget(args) => commands::forget::handle(&args, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
