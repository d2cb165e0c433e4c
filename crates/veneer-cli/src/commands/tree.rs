use veneer_core::responses::TreeResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TreeArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vnr tree`.
pub async fn handle(
    args: &TreeArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let model_key = ctx.open_model(&args.model).await?;
    let nodes = if args.browse {
        ctx.service.browse_tree()
    } else {
        ctx.service.tree().to_vec()
    };
    output(
        &TreeResponse {
            model_key,
            browse: args.browse,
            nodes,
        },
        flags.format,
    )
}
