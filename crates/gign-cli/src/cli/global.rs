//! Flags accepted by every `gign` subcommand, before or after its name.
//!
//! The directory and offline overrides win over both the config file and
//! `GIGN__*` variables; see [`crate::config::AppConfig::with_overrides`].

use clap::{ArgAction, Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` progress, `-vv` cache and fallback decisions, `-vvv` everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Only errors reach stderr. Reports and `--dry-run` content still print.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors"
    )]
    pub quiet: bool,

    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// TOML config file. Must exist, except for `gign init` which creates it.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Config file (default: platform config dir)"
    )]
    pub config: Option<PathBuf>,

    /// How reports are printed on stdout.
    ///
    /// With `json`, each command prints one JSON document on stdout and
    /// tracing switches to JSON lines on stderr.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Report format on stdout"
    )]
    pub output_format: OutputFormat,

    /// Same as `templates.offline = true`.
    #[arg(
        long = "offline",
        global = true,
        help = "Never contact the remote template API"
    )]
    pub offline: bool,

    #[arg(
        long = "cache-dir",
        global = true,
        value_name = "DIR",
        help = "Template cache directory (overrides cache.dir)"
    )]
    pub cache_dir: Option<PathBuf>,

    #[arg(
        long = "templates-dir",
        global = true,
        value_name = "DIR",
        help = "Custom template directory (overrides templates.custom_dir)"
    )]
    pub templates_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when stdout is piped.
    #[default]
    Auto,
    /// Colors, spinners and aligned tables.
    Human,
    /// Same text without ANSI codes or spinners.
    Plain,
    /// One JSON document per command; logs become JSON lines.
    Json,
}
