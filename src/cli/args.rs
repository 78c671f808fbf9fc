//! CLI argument definitions.
//!
//! All Clap derive structs for `psych-report` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Personality report page: resolve, render, build and preview.
#[derive(Parser, Debug)]
#[command(name = "psych-report", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a YAML site configuration file.
    #[arg(long, global = true, env = "PSYCH_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "PSYCH_REPORT_COLOR")]
    pub color: ColorChoice,

    /// Log line format on stderr.
    #[arg(
        long,
        default_value = "human",
        global = true,
        env = "PSYCH_REPORT_LOG_FORMAT"
    )]
    pub log_format: OutputFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which report a page path asks for.
    Resolve(ResolveArgs),

    /// Load a report into the page and print the result.
    Render(RenderArgs),

    /// Copy the site into the output directory.
    Build(BuildArgs),

    /// Serve the built site locally.
    Serve(ServeArgs),

    /// Validate the site configuration.
    Check(CheckArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Page Commands
// ============================================================================

/// Arguments for `resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Page path, e.g. `/brave-otter-a1b2c3`.
    pub path: String,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `render`.
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("source").multiple(false))]
pub struct RenderArgs {
    /// Page path, e.g. `/brave-otter-a1b2c3`.
    pub path: String,

    /// Site directory to read report documents from.
    #[arg(long, group = "source")]
    pub root: Option<PathBuf>,

    /// Deployed site URL to fetch report documents from.
    #[arg(long, group = "source")]
    pub base_url: Option<String>,

    /// Output format.
    #[arg(short, long, default_value = "html")]
    pub format: RenderFormat,

    /// Fail unless the requested report itself was shown.
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Site Commands
// ============================================================================

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project root holding the site sources.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output directory, relative to the project root.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Directory to serve (defaults to the build output).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Address to bind, `host:port`.
    #[arg(long, env = "PSYCH_REPORT_BIND")]
    pub bind: Option<String>,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Output of `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    /// The patched page markup.
    #[default]
    Html,
    /// The load report.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["psych-report", "render", "/brave-otter-a1b2c3"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.path, "/brave-otter-a1b2c3");
        assert_eq!(args.format, RenderFormat::Html);
        assert!(!args.strict);
        assert!(args.root.is_none());
    }

    #[test]
    fn test_root_and_base_url_mutually_exclusive() {
        let cli = Cli::try_parse_from([
            "psych-report",
            "render",
            "/",
            "--root",
            "site",
            "--base-url",
            "http://localhost:8080",
        ]);
        assert!(cli.is_err(), "expected mutual exclusion error");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "psych-report",
            "build",
            "-vv",
            "--config",
            "site.yaml",
            "--color",
            "never",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("site.yaml")));
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn test_serve_args() {
        let cli = Cli::try_parse_from(["psych-report", "serve", "--bind", "127.0.0.1:0"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.as_deref(), Some("127.0.0.1:0"));
        assert!(args.dir.is_none());
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["psych-report", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["psych-report", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Cli::try_parse_from(["psych-report"]).is_err());
    }
}
