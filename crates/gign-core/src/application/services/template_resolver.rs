//! Template source resolution.
//!
//! Order per id: custom store → fresh cache → remote provider → stale
//! cache → bundled catalog. The first source that answers wins.

use chrono::Duration as ChronoDuration;
use futures_util::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::{
    CacheKey, CachedTemplate, Clock, FallbackCatalog, ProviderError, TemplateCache,
    TemplateProvider, TemplateStore,
};
use crate::application::report::RunWarning;
use crate::domain::{TechnologyId, TemplateSet};
use crate::error::{GignError, GignResult};

/// Cache freshness rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    /// Entries older than this are stale.
    pub staleness: ChronoDuration,
    /// Remote source generation; part of the cache key.
    pub revision: String,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            staleness: ChronoDuration::hours(168),
            revision: "v1".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    Custom,
    Cache,
    StaleCache,
    Remote,
    Bundled,
}

impl TemplateSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Cache => "cache",
            Self::StaleCache => "stale cache",
            Self::Remote => "remote",
            Self::Bundled => "bundled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub id: TechnologyId,
    pub content: String,
    pub source: TemplateSource,
}

/// Templates for many ids, in request order, plus what failed.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub set: TemplateSet,
    pub sources: Vec<(TechnologyId, TemplateSource)>,
    pub warnings: Vec<RunWarning>,
}

pub struct TemplateResolver {
    store: Option<Arc<dyn TemplateStore>>,
    cache: Arc<dyn TemplateCache>,
    provider: Option<Arc<dyn TemplateProvider>>,
    fallback: Arc<dyn FallbackCatalog>,
    clock: Arc<dyn Clock>,
    policy: CachePolicy,
    fetch_timeout: Duration,
}

impl TemplateResolver {
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

    /// Offline resolver: no custom store, no remote provider.
    pub fn new(
        cache: Arc<dyn TemplateCache>,
        fallback: Arc<dyn FallbackCatalog>,
        clock: Arc<dyn Clock>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            store: None,
            cache,
            provider: None,
            fallback,
            clock,
            policy,
            fetch_timeout: Self::DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn TemplateStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn TemplateProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn resolve(&self, id: &TechnologyId) -> GignResult<ResolvedTemplate> {
        let found = |content: String, source: TemplateSource| -> GignResult<ResolvedTemplate> {
            debug!(source = source.as_str(), "Template resolved");
            Ok(ResolvedTemplate {
                id: id.clone(),
                content,
                source,
            })
        };

        if let Some(store) = &self.store {
            match store.get(id) {
                Ok(Some(content)) => return found(content, TemplateSource::Custom),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Custom template store unavailable"),
            }
        }

        let key = CacheKey::new(id.clone(), self.policy.revision.clone());
        let cached = match self.cache.get(&key) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Template cache unavailable");
                None
            }
        };

        if let Some(entry) = &cached {
            if self.is_fresh(entry) {
                return found(entry.content.clone(), TemplateSource::Cache);
            }
        }

        let mut failure: Option<ProviderError> = None;
        if let Some(provider) = &self.provider {
            match tokio::time::timeout(self.fetch_timeout, provider.fetch(id)).await {
                Ok(Ok(content)) => {
                    let entry = CachedTemplate {
                        content: content.clone(),
                        fetched_at: self.clock.now(),
                    };
                    if let Err(e) = self.cache.put(&key, entry) {
                        warn!(error = %e, "Failed to update template cache");
                    }
                    return found(content, TemplateSource::Remote);
                }
                Ok(Err(e)) => {
                    debug!(provider = %provider.name(), error = %e, "Remote fetch failed");
                    failure = Some(e);
                }
                Err(_) => {
                    debug!(provider = %provider.name(), "Remote fetch timed out");
                    failure = Some(ProviderError::Timeout);
                }
            }
        }

        if let Some(entry) = cached {
            debug!(fetched_at = %entry.fetched_at, "Using stale cache entry");
            return found(entry.content, TemplateSource::StaleCache);
        }

        if let Some(content) = self.fallback.get(id) {
            return found(content, TemplateSource::Bundled);
        }

        Err(GignError::Application(match failure {
            Some(ProviderError::Timeout) => ApplicationError::FetchTimeout {
                id: id.to_string(),
                seconds: self.fetch_timeout.as_secs(),
            },
            Some(other) => ApplicationError::ResolutionFailure {
                id: id.to_string(),
                reason: other.to_string(),
            },
            None => ApplicationError::ResolutionFailure {
                id: id.to_string(),
                reason: "no custom, cached or bundled template".into(),
            },
        }))
    }

    /// Resolve every id concurrently. Failures become warnings and the id is
    /// left out of the set.
    #[instrument(skip_all, fields(count = ids.len()))]
    pub async fn resolve_all(&self, ids: &[TechnologyId]) -> Resolution {
        let results = join_all(ids.iter().map(|id| self.resolve(id))).await;

        let mut resolution = Resolution::default();
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(resolved) => {
                    resolution.sources.push((resolved.id.clone(), resolved.source));
                    resolution.set.insert(resolved.id, resolved.content);
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "Template unavailable");
                    resolution.warnings.push(to_warning(id, e));
                }
            }
        }

        info!(
            resolved = resolution.set.len(),
            failed = resolution.warnings.len(),
            "Templates resolved"
        );
        resolution
    }

    fn is_fresh(&self, entry: &CachedTemplate) -> bool {
        self.clock.now() - entry.fetched_at <= self.policy.staleness
    }
}

fn to_warning(id: &TechnologyId, error: GignError) -> RunWarning {
    match error {
        GignError::Application(ApplicationError::FetchTimeout { seconds, .. }) => {
            RunWarning::FetchTimeout {
                id: id.clone(),
                seconds,
            }
        }
        GignError::Application(ApplicationError::ResolutionFailure { reason, .. }) => {
            RunWarning::Resolution {
                id: id.clone(),
                reason,
            }
        }
        other => RunWarning::Resolution {
            id: id.clone(),
            reason: other.to_string(),
        },
    }
}
