//! Template Service - custom template management.
//!
//! Handles custom template CRUD and listing of every locally known template.
//! Separated from GenerateService for single responsibility.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::{
    application::{
        ApplicationError,
        ports::{FallbackCatalog, TemplateStore},
    },
    domain::{DomainError, Severity, TechnologyId, TemplateIssue, TemplateValidator},
    error::{GignError, GignResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateOrigin {
    Custom,
    Bundled,
}

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: TechnologyId,
    pub origin: TemplateOrigin,
}

/// Service for template operations.
pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
    bundled: Arc<dyn FallbackCatalog>,
}

impl TemplateService {
    pub fn new(store: Arc<dyn TemplateStore>, bundled: Arc<dyn FallbackCatalog>) -> Self {
        Self { store, bundled }
    }

    /// Custom and bundled templates, sorted by id. Custom shadows bundled.
    pub fn list(&self) -> GignResult<Vec<TemplateInfo>> {
        let mut infos: Vec<TemplateInfo> = self
            .store
            .list()?
            .into_iter()
            .map(|id| TemplateInfo {
                id,
                origin: TemplateOrigin::Custom,
            })
            .collect();

        for id in self.bundled.ids() {
            if !infos.iter().any(|i| i.id == id) {
                infos.push(TemplateInfo {
                    id,
                    origin: TemplateOrigin::Bundled,
                });
            }
        }

        infos.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(infos)
    }

    /// Local content of a template: custom first, then bundled.
    pub fn get_local(&self, id: &TechnologyId) -> GignResult<Option<(String, TemplateOrigin)>> {
        if let Some(content) = self.store.get(id)? {
            return Ok(Some((content, TemplateOrigin::Custom)));
        }
        Ok(self.bundled.get(id).map(|c| (c, TemplateOrigin::Bundled)))
    }

    /// Validate and store a custom template.
    ///
    /// Errors in the content block the insert; warnings are returned.
    pub fn add(&self, name: &str, content: &str, overwrite: bool) -> GignResult<Vec<TemplateIssue>> {
        let id = TemplateValidator::validate_name(name)?;

        let issues = TemplateValidator::lint(content);
        if let Some(error) = issues.iter().find(|i| i.severity == Severity::Error) {
            return Err(GignError::Domain(if error.line == 0 {
                DomainError::EmptyTemplate {
                    template_id: id.to_string(),
                }
            } else {
                DomainError::InvalidTemplate(format!("line {}: {}", error.line, error.message))
            }));
        }

        if !overwrite && self.store.get(&id)?.is_some() {
            return Err(GignError::Application(ApplicationError::TemplateExists {
                name: id.to_string(),
            }));
        }

        self.store.insert(&id, content)?;
        info!(template = %id, "Custom template saved");
        Ok(issues)
    }

    pub fn remove(&self, name: &str) -> GignResult<()> {
        let id = TemplateValidator::validate_name(name)?;
        self.store.remove(&id)?;
        info!(template = %id, "Custom template removed");
        Ok(())
    }

    pub fn validate(&self, content: &str) -> Vec<TemplateIssue> {
        TemplateValidator::lint(content)
    }
}
