//! Template name and content checks.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::entities::{Pattern, PatternKind};
use crate::domain::error::DomainError;
use crate::domain::value_objects::TechnologyId;

const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found in template content. `line` is 1-based, 0 for the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateIssue {
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

pub struct TemplateValidator;

impl TemplateValidator {
    /// Validate a custom template name and turn it into an identifier.
    pub fn validate_name(name: &str) -> Result<TechnologyId, DomainError> {
        let reject = |reason: &str| DomainError::InvalidTemplateName {
            name: name.to_owned(),
            reason: reason.to_owned(),
        };

        if name.trim().is_empty() {
            return Err(reject("name is empty"));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(reject("name is longer than 50 characters"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(reject("only letters, digits, '-' and '_' are allowed"));
        }
        if name.eq_ignore_ascii_case(crate::domain::value_objects::CUSTOM_ID) {
            return Err(reject("'custom' is reserved for the existing .gitignore"));
        }

        TechnologyId::parse(name)
    }

    /// Lint template content. Issues are ordered by line.
    pub fn lint(content: &str) -> Vec<TemplateIssue> {
        let source = TechnologyId::custom();
        let patterns = Pattern::parse_all(content, &source);

        if patterns
            .iter()
            .all(|p| matches!(p.kind(), PatternKind::Blank | PatternKind::Comment))
        {
            return vec![TemplateIssue {
                line: 0,
                severity: Severity::Error,
                message: "template contains no patterns".into(),
            }];
        }

        let mut issues = Vec::new();
        let mut first_seen: HashMap<&str, usize> = HashMap::new();

        for (idx, pattern) in patterns.iter().enumerate() {
            let line = idx + 1;
            let kind = pattern.kind();
            if !matches!(kind, PatternKind::Rule | PatternKind::Negation) {
                continue;
            }
            let raw = pattern.raw();

            if kind == PatternKind::Negation && raw[1..].trim().is_empty() {
                issues.push(TemplateIssue {
                    line,
                    severity: Severity::Error,
                    message: "'!' without a pattern".into(),
                });
                continue;
            }
            if raw.len() != raw.trim_end().len() && !raw.trim_end().ends_with('\\') {
                issues.push(TemplateIssue {
                    line,
                    severity: Severity::Warning,
                    message: "trailing whitespace is ignored by git; escape it with '\\'".into(),
                });
            }
            if raw.contains("***") {
                issues.push(TemplateIssue {
                    line,
                    severity: Severity::Warning,
                    message: "'***' behaves like '**'; use '**' or '*'".into(),
                });
            }
            match first_seen.get(pattern.normalized()) {
                Some(first) => issues.push(TemplateIssue {
                    line,
                    severity: Severity::Warning,
                    message: format!("duplicate of line {first}"),
                }),
                None => {
                    first_seen.insert(pattern.normalized(), line);
                }
            }
        }

        issues
    }

    /// Whether any issue blocks using the content as a template.
    pub fn has_errors(issues: &[TemplateIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}
