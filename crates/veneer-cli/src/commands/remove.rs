use veneer_core::responses::OverrideResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RemoveArgs;
use crate::context::AppContext;
use crate::output::{output, settle};

/// Handle `vnr remove`.
pub async fn handle(
    args: &RemoveArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let model_key = ctx.open_model(&args.model).await?;
    if settle(ctx.service.remove_override(&args.path).await, flags.format)?.is_none() {
        return Ok(());
    }
    let response = OverrideResponse {
        model_key,
        path: args.path.clone(),
        current: None,
        resolved: ctx.service.resolves(&args.path),
    };
    output(&response, flags.format)
}
