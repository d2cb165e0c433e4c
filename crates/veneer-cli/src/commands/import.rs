use anyhow::Context;
use veneer_core::responses::OperationResult;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::{output, settle};

/// Handle `vnr import`.
pub async fn handle(
    args: &ImportArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let model_key = ctx.open_model(&args.model).await?;

    if settle(ctx.service.import_document(&text, &model_key).await, flags.format)?.is_some() {
        output(&OperationResult::ok(), flags.format)?;
    }
    Ok(())
}
