//! Implementation of the `gign generate` command.
//!
//! Responsibility: translate CLI arguments into a `GenerateRequest`, run the
//! core pipeline, and display the report. No business logic lives here.

use tracing::{debug, instrument};

use gign_core::{
    application::{GenerateRequest, GenerationReport, WriteOutcome},
    domain::TechnologyId,
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    wiring,
};

#[instrument(skip_all, fields(path = %args.path.display()))]
pub async fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let request = build_request(&args, &config)?;
    debug!(?request, "Request built");

    let service = wiring::generate_service(&config)?;

    let spinner = output.spinner(if request.technologies.is_empty() {
        "Detecting technologies and fetching templates..."
    } else {
        "Fetching templates..."
    });
    let result = service.generate(&request).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let report = result?;

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }
    render(&report, &output)
}

fn build_request(args: &GenerateArgs, config: &AppConfig) -> CliResult<GenerateRequest> {
    let technologies = args
        .tech
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| TechnologyId::parse(t))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::Core(e.into()))?;

    Ok(GenerateRequest {
        root: args.path.clone(),
        output: args.output.clone(),
        technologies,
        backup: args.backup || config.output.backup,
        dry_run: args.dry_run,
        fresh: args.fresh,
        security: args.security,
    })
}

fn render(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if !report.detections.is_empty() {
        output.header("Detected:")?;
        for d in &report.detections {
            output.print(&format!(
                "  {:<20} {:>4.0}%",
                d.technology.as_str(),
                d.confidence * 100.0
            ))?;
        }
    }

    for warning in &report.warnings {
        output.warning(&warning.to_string())?;
    }

    let techs = report
        .technologies
        .iter()
        .map(TechnologyId::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    match &report.outcome {
        WriteOutcome::Written { path, backup } => {
            if let Some(backup) = backup {
                output.info(&format!("Backup saved to {}", backup.display()))?;
            }
            output.success(&format!(
                "Wrote {} ({} rules: {techs})",
                path.display(),
                report.rule_count
            ))?;
        }
        WriteOutcome::Skipped => {
            output.info(&format!("Dry run: {} rules ({techs})", report.rule_count))?;
            output.raw(&report.content)?;
        }
        WriteOutcome::Empty => {
            output.warning("Nothing to write; the merged file would be empty")?;
        }
    }

    if !report.recommendations.is_empty() {
        output.print("")?;
        output.header("Recommendations:")?;
        for rec in &report.recommendations {
            let advice = rec.advice();
            output.print(&format!("  [{}] {}", advice.priority, advice.title))?;
        }
        output.detail("Run 'gign recommend' for details.")?;
    }

    Ok(())
}
