use anyhow::Context;
use veneer_core::responses::OperationResult;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::{output, settle};

/// Handle `vnr export`.
pub async fn handle(
    args: &ExportArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.open_model(&args.model).await?;
    let Some(envelope) = settle(ctx.service.export_document(), flags.format)? else {
        return Ok(());
    };

    match &args.out {
        None => output(&envelope, flags.format),
        Some(path) => {
            let text = serde_json::to_string_pretty(&envelope)?;
            tokio::fs::write(path, text)
                .await
                .with_context(|| format!("failed to write export to {}", path.display()))?;
            tracing::info!(path = %path.display(), "export written");
            output(&OperationResult::ok(), flags.format)
        }
    }
}
