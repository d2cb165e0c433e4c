use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `vnr` binary.
#[derive(Debug, Parser)]
#[command(name = "vnr", version, about = "Veneer - scene node overrides")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to auto-detect via .veneer)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["vnr", "--format", "raw", "--verbose", "last"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Last));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli =
            Cli::try_parse_from(["vnr", "last", "--format", "raw", "--quiet"]).expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["vnr", "--format", "table", "last"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn set_collects_fields() {
        let cli = Cli::try_parse_from([
            "vnr",
            "set",
            "--scene",
            "scene.json",
            "Level 1/Wall[1]",
            "--name",
            "East wall",
            "--visible",
            "false",
            "--menu",
            "hide",
            "--prop",
            "fire=R90",
            "--prop",
            "owner=arch",
        ])
        .expect("cli should parse");

        let Commands::Set(args) = cli.command else {
            panic!("expected set");
        };
        assert_eq!(args.model.scene, Path::new("scene.json"));
        assert_eq!(args.model.model, None);
        assert_eq!(args.target, "Level 1/Wall[1]");
        assert!(!args.by_id);
        assert_eq!(args.name.as_deref(), Some("East wall"));
        assert_eq!(args.visible, Some(false));
        assert_eq!(args.menu.as_deref(), Some("hide"));
        assert_eq!(args.props, vec!["fire=R90", "owner=arch"]);
    }

    #[test]
    fn model_bound_commands_require_scene() {
        assert!(Cli::try_parse_from(["vnr", "tree"]).is_err());
        assert!(Cli::try_parse_from(["vnr", "tree", "--scene", "s.json", "--browse"]).is_ok());
    }

    #[test]
    fn schema_name_is_optional() {
        let cli = Cli::try_parse_from(["vnr", "schema"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Schema(ref args) if args.name.is_none()));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["vnr", "--project", "/tmp/demo", "last"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.project.as_deref(), Some("/tmp/demo"));
    }
}
