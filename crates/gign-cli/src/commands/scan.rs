//! `gign scan`: show what the detector finds.

use serde::Serialize;

use gign_core::{
    application::{DetectionReport, RunWarning},
    domain::{Detection, ProjectStats},
};

use crate::{
    cli::{ReportFormat, ScanArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    wiring,
};

#[derive(Serialize)]
struct ScanOutput<'a> {
    root: String,
    detections: &'a [Detection],
    stats: &'a ProjectStats,
    warnings: &'a [RunWarning],
}

pub async fn execute(args: ScanArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let report = wiring::detector(&config).scan(&args.path).await?;

    if args.format == ReportFormat::Json || output.is_json() {
        output.json(&ScanOutput {
            root: args.path.display().to_string(),
            detections: &report.detections,
            stats: &report.stats,
            warnings: &report.warnings,
        })?;
        return Ok(());
    }

    render(&report, &output)
}

fn render(report: &DetectionReport, output: &OutputManager) -> CliResult<()> {
    for warning in &report.warnings {
        output.warning(&warning.to_string())?;
    }

    if report.detections.is_empty() {
        output.info("No known technologies detected")?;
    } else {
        output.header("Detected technologies:")?;
        for d in &report.detections {
            output.print(&format!(
                "  {:<20} {:>4.0}%",
                d.technology.as_str(),
                d.confidence * 100.0
            ))?;
            output.detail(&format!("      {}", d.markers.join(", ")))?;
        }
    }

    let stats = &report.stats;
    output.print("")?;
    output.detail(&format!(
        "{} files, {} directories scanned",
        stats.file_count, stats.dir_count
    ))?;
    Ok(())
}
