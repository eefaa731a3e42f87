//! In-memory custom template store.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use gign_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TechnologyId,
    error::GignResult,
};

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    inner: Arc<RwLock<BTreeMap<TechnologyId, String>>>,
}

impl InMemoryTemplateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn get(&self, id: &TechnologyId) -> GignResult<Option<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.get(id).cloned())
    }

    fn list(&self) -> GignResult<Vec<TechnologyId>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.keys().cloned().collect())
    }

    fn insert(&self, id: &TechnologyId, content: &str) -> GignResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(id.clone(), content.to_owned());
        Ok(())
    }

    fn remove(&self, id: &TechnologyId) -> GignResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    name: id.to_string(),
                }
                .into()
            })
    }
}
