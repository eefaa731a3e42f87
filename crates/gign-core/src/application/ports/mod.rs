//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `gign-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory listing, reads, atomic writes
//!   - `TemplateProvider`: remote template fetches (async)
//!   - `TemplateCache`: fetched templates keyed by id and revision
//!   - `TemplateStore`: user-authored custom templates
//!   - `FallbackCatalog`: templates bundled with the binary
//!   - `Clock`: current time, for cache staleness

pub mod output;

pub use output::{
    CacheKey, CachedTemplate, Clock, DirEntry, EntryKind, FallbackCatalog, Filesystem,
    ProviderError, TemplateCache, TemplateProvider, TemplateStore, Walk, WalkEntry,
};

#[cfg(test)]
pub use output::MockTemplateProvider;
