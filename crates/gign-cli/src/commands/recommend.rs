//! `gign recommend`: rules the current ignore file is missing.

use std::path::Path;

use gign_core::{
    application::{ApplicationError, GITIGNORE},
    domain::{MergedDocument, Recommendation, TemplateSet, recommend},
    error::GignError,
};

use crate::{
    cli::{RecommendArgs, ReportFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
    wiring,
};

pub async fn execute(
    args: RecommendArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let report = wiring::detector(&config).scan(&args.path).await?;
    let existing = existing_document(&args.path.join(GITIGNORE))?;

    let recommendations = recommend(&report.technologies(), &report.stats, existing.as_ref());

    if args.format == ReportFormat::Json || output.is_json() {
        output.json(&recommendations)?;
        return Ok(());
    }
    render(&recommendations, &output)
}

/// The project's current ignore file as a document, if there is one.
fn existing_document(path: &Path) -> CliResult<Option<MergedDocument>> {
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = std::fs::read(path).with_cli_context(|| format!("reading {}", path.display()))?;
    let text = String::from_utf8(bytes).map_err(|_| {
        GignError::Application(ApplicationError::ExistingFileUnreadable {
            path: path.to_path_buf(),
        })
    })?;

    let mut set = TemplateSet::new();
    set.prepend_custom(text);
    Ok(Some(MergedDocument::merge(&set)))
}

fn render(recommendations: &[Recommendation], output: &OutputManager) -> CliResult<()> {
    if recommendations.is_empty() {
        output.success("Nothing to recommend; your ignore file covers what was found")?;
        return Ok(());
    }

    output.header(&format!("{} recommendation(s):", recommendations.len()))?;
    for rec in recommendations {
        let advice = rec.advice();
        output.print("")?;
        output.print(&format!(
            "  [{}] {} ({}, {:.0}% confidence)",
            advice.priority,
            advice.title,
            rec.category(),
            advice.confidence * 100.0
        ))?;
        output.detail(&format!("    {}", advice.description))?;
        output.detail(&format!("    {}", advice.reasoning))?;
        for pattern in &advice.patterns {
            output.print(&format!("    + {pattern}"))?;
        }
    }
    Ok(())
}
