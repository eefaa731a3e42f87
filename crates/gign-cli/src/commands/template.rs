//! `gign template`: list, show and manage custom templates.

use std::io::ErrorKind;
use std::path::Path;

use tracing::instrument;

use gign_core::{
    application::{TemplateOrigin, TemplateService},
    domain::{Severity, TechnologyId, TemplateIssue, TemplateValidator},
};

use crate::{
    cli::{GlobalArgs, ReportFormat, TemplateCommands},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    wiring,
};

/// Dispatch to the correct template subcommand.
#[instrument(skip_all)]
pub fn execute(
    cmd: TemplateCommands,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = wiring::template_service(&config);

    match cmd {
        TemplateCommands::List { format } => list(&service, format, &output),
        TemplateCommands::Show { id } => show(&service, &id, &output),
        TemplateCommands::Add { name, file, force } => {
            let id = stored_name(&name)?;
            let content = read_template_file(&file)?;
            let warnings = service.add(&name, &content, force)?;
            print_issues(&warnings, &output)?;
            output.success(&format!(
                "Saved custom template '{id}' to {}",
                config.custom_dir().display()
            ))?;
            Ok(())
        }
        TemplateCommands::Remove { name, yes } => {
            if !yes && !global.quiet && !confirm(&format!("Remove custom template '{name}'?"))? {
                return Err(CliError::Cancelled);
            }
            service.remove(&name)?;
            output.success(&format!("Removed custom template '{name}'"))?;
            Ok(())
        }
        TemplateCommands::Validate { file } => {
            let content = read_template_file(&file)?;
            let issues = service.validate(&content);
            if output.is_json() {
                output.json(&issues)?;
            } else {
                print_issues(&issues, &output)?;
            }

            let errors = issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count();
            if errors > 0 {
                return Err(CliError::InvalidTemplateFile { path: file, errors });
            }
            if !output.is_json() {
                output.success(&format!("{} is a valid template", file.display()))?;
            }
            Ok(())
        }
    }
}

fn list(service: &TemplateService, format: ReportFormat, output: &OutputManager) -> CliResult<()> {
    let templates = service.list()?;

    if format == ReportFormat::Json || output.is_json() {
        output.json(&templates)?;
        return Ok(());
    }

    output.header("Available Templates:")?;
    for t in &templates {
        let origin = match t.origin {
            TemplateOrigin::Custom => "custom",
            TemplateOrigin::Bundled => "bundled",
        };
        output.print(&format!("  {:<24} {origin}", t.id.as_str()))?;
    }
    output.detail("Any other gitignore.io template can be used online by name.")?;
    Ok(())
}

fn show(service: &TemplateService, id: &str, output: &OutputManager) -> CliResult<()> {
    let id = TechnologyId::parse(id).map_err(|e| CliError::Core(e.into()))?;
    let (content, origin) = service
        .get_local(&id)?
        .ok_or_else(|| CliError::TemplateNotFound { id: id.to_string() })?;

    if output.is_json() {
        output.json(&serde_json::json!({
            "id": id,
            "origin": origin,
            "content": content,
        }))?;
    } else {
        output.raw(&content)?;
    }
    Ok(())
}

fn read_template_file(path: &Path) -> CliResult<String> {
    match std::fs::read_to_string(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => Err(CliError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::InvalidData => Err(CliError::InvalidInput {
            message: format!("{} is not valid UTF-8", path.display()),
            source: Some(Box::new(e)),
        }),
        result => result.with_cli_context(|| format!("reading {}", path.display())),
    }
}

fn print_issues(issues: &[TemplateIssue], output: &OutputManager) -> CliResult<()> {
    for issue in issues {
        let location = if issue.line == 0 {
            "file".to_owned()
        } else {
            format!("line {}", issue.line)
        };
        let msg = format!("{location}: {}", issue.message);
        match issue.severity {
            Severity::Warning => output.warning(&msg)?,
            Severity::Error => output.print(&format!("\u{2717} {msg}"))?,
        }
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "confirmation needed but stdin is not a terminal; pass --yes".into(),
            source: None,
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "could not read confirmation".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_prompt: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Name a custom template would be stored under, or why it is rejected.
fn stored_name(name: &str) -> CliResult<TechnologyId> {
    TemplateValidator::validate_name(name).map_err(|e| CliError::Core(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_template_file(&dir.path().join("none.gitignore")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn non_utf8_template_file_is_user_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.gitignore");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert_eq!(read_template_file(&path).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn reserved_name_is_rejected() {
        assert!(stored_name("custom").is_err());
        assert_eq!(stored_name("Team_Rules").unwrap().as_str(), "team_rules");
    }
}
