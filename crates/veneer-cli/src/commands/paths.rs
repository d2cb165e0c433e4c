use anyhow::Context;
use veneer_core::responses::{PathEntry, PathMappingResponse};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ModelArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vnr paths`.
pub async fn handle(
    args: &ModelArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.open_model(args).await?;
    let mapping = ctx.service.mapping().context("model was not loaded")?;
    let paths = mapping
        .iter()
        .map(|(id, path)| PathEntry {
            id: id.to_string(),
            path: path.to_string(),
        })
        .collect();
    output(&PathMappingResponse { paths }, flags.format)
}
