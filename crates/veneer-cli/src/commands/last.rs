use veneer_core::responses::LastModelResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vnr last`.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let model_key = ctx.service.last_active_model().await?;
    output(&LastModelResponse { model_key }, flags.format)
}
