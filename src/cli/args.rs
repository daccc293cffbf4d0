//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_FILE;

/// Content schema checks, nav highlighting and theme config for the blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the working directory
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate frontmatter of the blog collection
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// Mark the current page's nav links as active in rendered HTML
    #[command(visible_alias = "hl")]
    Highlight {
        #[command(flatten)]
        args: HighlightArgs,
    },

    /// Write tailwind.config.mjs from the [theme] section
    #[command(visible_alias = "t")]
    Theme {
        #[command(flatten)]
        args: ThemeArgs,
    },
}

/// Flags shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Entry files or directories to report on. If omitted, reports the whole
    /// collection. Use `-` to read paths from stdin.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// List draft entries
    #[arg(short, long)]
    pub drafts: bool,

    /// Print valid entries as JSON on stdout
    #[arg(short, long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Highlight command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct HighlightArgs {
    /// HTML file or directory (default: the build output directory)
    #[arg(value_name = "FILE|DIR", value_hint = clap::ValueHint::AnyPath)]
    pub target: Option<PathBuf>,

    /// Page path to highlight, for a single file outside the output directory
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<String>,

    /// Report what would change without writing files
    #[arg(short = 'n', long)]
    pub dry: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Theme command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ThemeArgs {
    /// Output file, `-` for stdout (default: tailwind.config.mjs at the root)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Cli {
    pub const fn common(&self) -> &CommonArgs {
        match &self.command {
            Commands::Check { args } => &args.common,
            Commands::Highlight { args } => &args.common,
            Commands::Theme { args } => &args.common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["petrona", "check", "a.md", "--drafts", "-V"]).unwrap();
        let Commands::Check { args } = &cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.paths, vec![PathBuf::from("a.md")]);
        assert!(args.drafts);
        assert!(!args.json);
        assert!(cli.common().verbose);
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn test_parse_highlight() {
        let cli = Cli::try_parse_from([
            "petrona", "-C", "site.toml", "hl", "page.html", "--path", "/about", "--dry",
        ])
        .unwrap();
        let Commands::Highlight { args } = &cli.command else {
            panic!("expected highlight");
        };
        assert_eq!(args.target, Some(PathBuf::from("page.html")));
        assert_eq!(args.path.as_deref(), Some("/about"));
        assert!(args.dry);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }

    #[test]
    fn test_parse_theme_stdout() {
        let cli = Cli::try_parse_from(["petrona", "theme", "-o", "-", "--color", "never"]).unwrap();
        let Commands::Theme { args } = &cli.command else {
            panic!("expected theme");
        };
        assert_eq!(args.output, Some(PathBuf::from("-")));
        assert_eq!(cli.color, ColorChoice::Never);
    }
}
