use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the node-id to path mapping of a scene.
    Paths(ModelArgs),
    /// Print the enriched display tree.
    Tree(TreeArgs),
    /// Merge override fields into one node.
    Set(SetArgs),
    /// Delete the whole override of one node.
    Remove(RemoveArgs),
    /// Drop every visibility override.
    ResetVisibility(ModelArgs),
    /// Export the override document as a versioned envelope.
    Export(ExportArgs),
    /// Replace the override document with an exported envelope.
    Import(ImportArgs),
    /// Show the last active model.
    Last,
    /// Delete the persisted overrides of a model.
    Forget(ForgetArgs),
    /// Print a registered JSON Schema, or list them.
    Schema(SchemaArgs),
}

/// Scene snapshot and model selection shared by model-bound commands.
#[derive(Clone, Debug, Args)]
pub struct ModelArgs {
    /// Scene snapshot file (JSON scene node tree).
    #[arg(long)]
    pub scene: PathBuf,

    /// Model key. Defaults to the last active model, then the scene file stem.
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Apply browse-mode filtering.
    #[arg(long)]
    pub browse: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SetArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Node path, or node id with `--by-id`.
    pub target: String,

    /// Treat the target as a node id.
    #[arg(long)]
    pub by_id: bool,

    /// Display name.
    #[arg(long)]
    pub name: Option<String>,

    /// Visibility (true or false).
    #[arg(long)]
    pub visible: Option<bool>,

    /// Browse menu marker: root, disabled, hide.
    #[arg(long)]
    pub menu: Option<String>,

    /// Custom property as KEY=VALUE. Repeatable; replaces all stored properties.
    #[arg(long = "prop", value_name = "KEY=VALUE")]
    pub props: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Node path.
    pub path: String,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Write the envelope to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Exported envelope file.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ForgetArgs {
    /// Model key. Defaults to the last active model.
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, e.g. `export_envelope`. Omit to list names.
    pub name: Option<String>,
}
