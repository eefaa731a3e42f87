use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use gign_core::{
    application::{
        ApplicationError,
        ports::{CacheKey, CachedTemplate, TemplateCache},
    },
    error::GignResult,
};

/// Thread-safe in-memory cache. Clones share entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateCache {
    inner: Arc<RwLock<HashMap<CacheKey, CachedTemplate>>>,
}

impl InMemoryTemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateCache for InMemoryTemplateCache {
    fn get(&self, key: &CacheKey) -> GignResult<Option<CachedTemplate>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.get(key).cloned())
    }

    fn put(&self, key: &CacheKey, entry: CachedTemplate) -> GignResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(key.clone(), entry);
        Ok(())
    }
}
