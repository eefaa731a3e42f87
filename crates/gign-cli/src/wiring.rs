//! Builds core services from adapters according to [`AppConfig`].
//!
//! Commands never construct adapters themselves; they ask for a service here.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use gign_adapters::{
    BundledTemplates, DirectoryTemplateStore, FileTemplateCache, HttpTemplateProvider,
    LocalFilesystem, SystemClock,
};
use gign_core::application::{
    CachePolicy, GenerateService, OutputWriter, TechnologyDetector, TemplateResolver,
    TemplateService,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

pub fn detector(config: &AppConfig) -> TechnologyDetector {
    TechnologyDetector::new(Arc::new(LocalFilesystem::new()))
        .with_max_depth(config.detection.max_depth)
}

pub fn cache_policy(config: &AppConfig) -> CliResult<CachePolicy> {
    let staleness = config.staleness().ok_or_else(|| CliError::ConfigError {
        message: format!(
            "cache.staleness_hours is too large ({})",
            config.cache.staleness_hours
        ),
        source: None,
    })?;
    Ok(CachePolicy {
        staleness,
        revision: config.cache.revision.clone(),
    })
}

/// Resolver over custom store, on-disk cache, remote API and bundled templates.
///
/// The remote provider is left out when `templates.offline` is set.
pub fn resolver(config: &AppConfig) -> CliResult<TemplateResolver> {
    let timeout = Duration::from_secs(config.templates.fetch_timeout_secs);

    let mut resolver = TemplateResolver::new(
        Arc::new(FileTemplateCache::new(config.cache_dir())),
        Arc::new(BundledTemplates::new()),
        Arc::new(SystemClock),
        cache_policy(config)?,
    )
    .with_store(Arc::new(DirectoryTemplateStore::new(config.custom_dir())))
    .with_fetch_timeout(timeout);

    if config.templates.offline {
        debug!("Offline: remote provider disabled");
    } else {
        let provider = HttpTemplateProvider::new(config.templates.api_url.clone(), timeout)?;
        resolver = resolver.with_provider(Arc::new(provider));
    }

    Ok(resolver)
}

pub fn generate_service(config: &AppConfig) -> CliResult<GenerateService> {
    let filesystem = Arc::new(LocalFilesystem::new());
    Ok(GenerateService::new(
        filesystem.clone(),
        detector(config),
        resolver(config)?,
        OutputWriter::new(filesystem, Arc::new(SystemClock)),
    ))
}

pub fn template_service(config: &AppConfig) -> TemplateService {
    TemplateService::new(
        Arc::new(DirectoryTemplateStore::new(config.custom_dir())),
        Arc::new(BundledTemplates::new()),
    )
}
