//! Gign Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the `gign`
//! `.gitignore` generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             gign-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerateService, TemplateResolver,    │
//! │   TechnologyDetector, OutputWriter)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, Provider, Cache, Clock...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      gign-adapters (Infrastructure)     │
//! │ (LocalFilesystem, HttpTemplateProvider) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Pattern, TemplateSet, MergedDocument)  │
//! │         No I/O, no async                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gign_core::domain::{MergedDocument, TechnologyId, TemplateSet};
//!
//! let mut set = TemplateSet::new();
//! set.insert(TechnologyId::parse("python").unwrap(), "*.pyc\n__pycache__/\n");
//! set.insert(TechnologyId::parse("node").unwrap(), "node_modules/\n*.pyc\n");
//!
//! let document = MergedDocument::merge(&set);
//! assert_eq!(
//!     document.to_text(),
//!     "# python\n*.pyc\n__pycache__/\n\n# node\nnode_modules/\n"
//! );
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateRequest, GenerateService, GenerationReport, OutputWriter, RunWarning,
        TechnologyDetector, TemplateResolver, TemplateService,
        ports::{Clock, FallbackCatalog, Filesystem, TemplateCache, TemplateProvider, TemplateStore},
    };
    pub use crate::domain::{
        Detection, MergedDocument, Pattern, PatternKind, ProjectStats, Recommendation,
        TechnologyId, TemplateSet,
    };
    pub use crate::error::{GignError, GignResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
