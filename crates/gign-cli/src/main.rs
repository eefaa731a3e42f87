//! # gign CLI
//!
//! Detects project technologies and writes a merged `.gitignore`.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env + global flags).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the command handler on a tokio runtime, racing Ctrl-C.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |
//! | 130  | Cancelled               |

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info, instrument, warn};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod wiring;

fn main() -> ExitCode {
    // Missing .env is fine; real deployments use the environment.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version land here too and must exit 0.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    // ── 3. Load configuration ─────────────────────────────────────────────
    // `init` creates the file named by -c, so it may not exist yet.
    let required = !matches!(cli.command, Commands::Init(_));
    let config = match AppConfig::load(cli.global.config.as_deref(), required) {
        Ok(cfg) => cfg.with_overrides(&cli.global),
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: None,
                },
                verbose,
            );
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            return handle_error(
                CliError::IoError {
                    message: "failed to start async runtime".into(),
                    source: e,
                },
                verbose,
            );
        }
    };

    let result = runtime.block_on(run(cli, config, output));
    // A cancelled scan may still be walking on the blocking pool.
    runtime.shutdown_timeout(Duration::from_secs(1));

    match result {
        Ok(()) => {
            info!("gign completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Run the command, abandoning it if the user hits Ctrl-C.
///
/// Writes are atomic, so dropping the command mid-flight never leaves a
/// half-written file behind.
async fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let Cli { global, command } = cli;

    tokio::select! {
        result = dispatch(command, &global, config, output) => result,
        () = interrupted() => {
            warn!("Interrupted");
            Err(CliError::Cancelled)
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
async fn dispatch(
    command: Commands,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, config, output).await,
        Commands::Scan(args) => commands::scan::execute(args, config, output).await,
        Commands::Recommend(args) => commands::recommend::execute(args, config, output).await,
        Commands::Template(cmd) => commands::template::execute(cmd, global, config, output),
        Commands::Init(args) => commands::init::execute(args, global, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, global, config, output),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // Colour only when stderr is a TTY (same rule as logging.rs).
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
