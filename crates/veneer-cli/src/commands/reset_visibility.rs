use veneer_core::responses::OperationResult;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ModelArgs;
use crate::context::AppContext;
use crate::output::{output, settle};

/// Handle `vnr reset-visibility`.
pub async fn handle(
    args: &ModelArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.open_model(args).await?;
    if let Some(cleared) = settle(ctx.service.reset_all_visibility().await, flags.format)? {
        tracing::info!(cleared, "visibility overrides reset");
        output(&OperationResult::ok(), flags.format)?;
    }
    Ok(())
}
