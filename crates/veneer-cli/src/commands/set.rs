use veneer_core::overrides::{MenuMode, NodeOverride};
use veneer_core::responses::OverrideResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SetArgs;
use crate::commands::shared::parse::parse_property;
use crate::context::AppContext;
use crate::output::{output, settle};

/// Handle `vnr set`.
pub async fn handle(
    args: &SetArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let partial = build_partial(args)?;
    let model_key = ctx.open_model(&args.model).await?;

    let result = if args.by_id {
        ctx.service
            .set_override_for_id(&args.target, partial)
            .await
    } else {
        ctx.service
            .set_override(&args.target, partial)
            .await
            .map(|()| args.target.clone())
    };
    let Some(path) = settle(result, flags.format)? else {
        return Ok(());
    };

    let response = OverrideResponse {
        model_key,
        current: ctx.service.override_for(&path).cloned(),
        resolved: ctx.service.resolves(&path),
        path,
    };
    output(&response, flags.format)
}

fn build_partial(args: &SetArgs) -> anyhow::Result<NodeOverride> {
    let mut partial = NodeOverride {
        display_name: args.name.clone(),
        visible: args.visible,
        ..NodeOverride::default()
    };
    if let Some(raw) = &args.menu {
        partial.menu = Some(raw.parse::<MenuMode>()?);
    }
    for raw in &args.props {
        let (key, value) = parse_property(raw)?;
        partial = partial.with_property(key, value);
    }
    if partial.is_empty() {
        anyhow::bail!("nothing to set: pass --name, --visible, --menu or --prop");
    }
    Ok(partial)
}
