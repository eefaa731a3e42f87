//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "gign",
    bin_name = "gign",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate and maintain .gitignore files",
    long_about = "gign detects the technologies a project uses, merges the matching \
                  ignore templates with your existing .gitignore and writes the result \
                  atomically. Your own lines are never dropped.",
    after_help = "EXAMPLES:\n\
        \x20 gign generate\n\
        \x20 gign generate --tech rust,node --backup\n\
        \x20 gign scan --format json\n\
        \x20 gign template add team-rules ./team.gitignore\n\
        \x20 gign completions bash > ~/.local/share/bash-completion/completions/gign",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect, resolve, merge and write the ignore file.
    #[command(
        visible_alias = "gen",
        about = "Generate or update a .gitignore",
        after_help = "EXAMPLES:\n\
            \x20 gign generate                       # detect technologies in .\n\
            \x20 gign generate --path ../api --backup\n\
            \x20 gign generate -t python -t node --dry-run\n\
            \x20 gign generate --security --backup\n\
            \x20 gign generate --offline --fresh"
    )]
    Generate(GenerateArgs),

    /// Show which technologies were detected.
    #[command(
        about = "Detect technologies in a project",
        after_help = "EXAMPLES:\n\
            \x20 gign scan\n\
            \x20 gign scan --path ../web --format json"
    )]
    Scan(ScanArgs),

    /// Suggest ignore rules the current file is missing.
    #[command(
        about = "Recommend missing ignore rules",
        after_help = "EXAMPLES:\n\
            \x20 gign recommend\n\
            \x20 gign recommend --path ../api --format json"
    )]
    Recommend(RecommendArgs),

    /// Manage custom templates.
    #[command(
        about = "Manage templates",
        subcommand,
        visible_alias = "t",
        after_help = "EXAMPLES:\n\
            \x20 gign template list\n\
            \x20 gign template show rust\n\
            \x20 gign template add team-rules ./team.gitignore\n\
            \x20 gign template validate ./team.gitignore"
    )]
    Template(TemplateCommands),

    /// Initialise a gign configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 gign init            # default location\n\
            \x20 gign init --force    # overwrite existing\n\
            \x20 gign -c ./gign.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 gign completions bash > ~/.local/share/bash-completion/completions/gign\n\
            \x20 gign completions zsh  > ~/.zfunc/_gign\n\
            \x20 gign completions fish > ~/.config/fish/completions/gign.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the gign configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 gign config get templates.offline\n\
            \x20 gign config list\n\
            \x20 gign config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `gign generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project root to scan.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project root"
    )]
    pub path: PathBuf,

    /// Explicit technologies; skips detection.
    #[arg(
        short = 't',
        long = "tech",
        value_name = "ID",
        value_delimiter = ',',
        help = "Technology to include (repeatable, comma separated)"
    )]
    pub tech: Vec<String>,

    /// Write somewhere other than `<path>/.gitignore`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file (default: <path>/.gitignore)"
    )]
    pub output: Option<PathBuf>,

    /// Keep a timestamped copy of the previous file.
    #[arg(short = 'b', long = "backup", help = "Back up the existing file first")]
    pub backup: bool,

    /// Preview the merged file without writing it.
    #[arg(long = "dry-run", help = "Print the result instead of writing it")]
    pub dry_run: bool,

    /// Start from an empty file instead of the existing one.
    #[arg(long = "fresh", help = "Ignore the existing file's content")]
    pub fresh: bool,

    /// Add a `security` group for keys, certificates and `.env` files.
    #[arg(long = "security", help = "Also ignore common secret files")]
    pub security: bool,
}

// ── scan / recommend ──────────────────────────────────────────────────────────

/// Arguments for `gign scan`.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Project root to scan.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project root"
    )]
    pub path: PathBuf,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ReportFormat,
}

/// Arguments for `gign recommend`.
#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Project root to scan.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project root"
    )]
    pub path: PathBuf,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ReportFormat,
}

/// Output format for report-style commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable table.
    Table,
    /// JSON document.
    Json,
}

// ── template subcommands ──────────────────────────────────────────────────────

/// Subcommands for `gign template`.
#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// List custom and bundled templates.
    #[command(visible_alias = "ls")]
    List {
        #[arg(
            long = "format",
            value_enum,
            default_value = "table",
            help = "Output format"
        )]
        format: ReportFormat,
    },
    /// Print a template's content.
    Show {
        /// Template id, e.g. `rust`.
        id: String,
    },
    /// Save a file as a custom template.
    Add {
        /// Template name (letters, digits, `-`, `_`).
        name: String,
        /// File to read the template from.
        file: PathBuf,
        /// Replace an existing custom template.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Delete a custom template.
    #[command(visible_alias = "rm")]
    Remove {
        name: String,
        /// Skip the confirmation prompt.
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Lint a template file without saving it.
    Validate {
        file: PathBuf,
    },
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `gign init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `gign completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `gign config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `cache.staleness_hours`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
