use veneer_core::responses::OperationResult;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ForgetArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vnr forget`.
pub async fn handle(
    args: &ForgetArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let model_key = match &args.model {
        Some(key) => key.clone(),
        None => match ctx.service.last_active_model().await? {
            Some(key) => key,
            None => {
                return output(
                    &OperationResult::failed("no model given and no last active model"),
                    flags.format,
                );
            }
        },
    };
    ctx.service.delete_persisted(&model_key).await?;
    output(&OperationResult::ok(), flags.format)
}
