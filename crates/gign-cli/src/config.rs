//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Global CLI flags, applied by [`AppConfig::with_overrides`]
//! 2. Environment variables: `GIGN__<SECTION>__<KEY>`, e.g.
//!    `GIGN__TEMPLATES__OFFLINE=true`
//! 3. Config file (`-c FILE`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::TimeDelta;
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use gign_adapters::DEFAULT_API_URL;

use crate::cli::GlobalArgs;

const ENV_PREFIX: &str = "GIGN";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub templates: TemplateConfig,
    pub cache: CacheConfig,
    pub detection: DetectionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// gitignore.io compatible endpoint.
    pub api_url: String,
    /// Never contact the remote API.
    pub offline: bool,
    /// Directory of user `*.gitignore` templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_dir: Option<PathBuf>,
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    pub staleness_hours: i64,
    /// Bump to invalidate every cached template.
    pub revision: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub max_depth: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Back up the existing file on every `generate`.
    pub backup: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            offline: false,
            custom_dir: None,
            fetch_timeout_secs: 10,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            staleness_hours: 168,
            revision: "v1".into(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { max_depth: 2 }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// `config_file` is the path passed via `--config`. An explicit file must
    /// exist when `required` is set; the default location is always optional.
    pub fn load(config_file: Option<&Path>, required: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), required),
            None => (Self::config_path(), false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?;

        let config: Self = config
            .try_deserialize()
            .context("invalid configuration value")?;
        config.validate()?;
        Ok(config)
    }

    /// Layer `--offline`, `--cache-dir` and `--templates-dir` on top.
    pub fn with_overrides(mut self, args: &GlobalArgs) -> Self {
        if args.offline {
            self.templates.offline = true;
        }
        if let Some(dir) = &args.cache_dir {
            self.cache.dir = Some(dir.clone());
        }
        if let Some(dir) = &args.templates_dir {
            self.templates.custom_dir = Some(dir.clone());
        }
        self
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.templates.fetch_timeout_secs > 0,
            "templates.fetch_timeout_secs must be greater than zero"
        );
        anyhow::ensure!(
            self.cache.staleness_hours >= 0,
            "cache.staleness_hours must not be negative"
        );
        anyhow::ensure!(
            self.staleness().is_some(),
            "cache.staleness_hours is too large ({})",
            self.cache.staleness_hours
        );
        anyhow::ensure!(
            !self.cache.revision.trim().is_empty(),
            "cache.revision must not be empty"
        );
        Ok(())
    }

    /// Cache staleness window; `None` when the hour count overflows.
    pub fn staleness(&self) -> Option<TimeDelta> {
        TimeDelta::try_hours(self.cache.staleness_hours)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.gign.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".gign.toml"))
    }

    /// Where custom templates live.
    pub fn custom_dir(&self) -> PathBuf {
        self.templates.custom_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|d| d.config_dir().join("templates"))
                .unwrap_or_else(|| PathBuf::from(".gign/templates"))
        })
    }

    /// Where fetched templates are cached.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache.dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|d| d.cache_dir().join("templates"))
                .unwrap_or_else(|| PathBuf::from(".gign/cache"))
        })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "gign", "gign")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_api() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.templates.api_url, DEFAULT_API_URL);
        assert!(!cfg.templates.offline);
        assert_eq!(cfg.cache.staleness_hours, 168);
        assert_eq!(cfg.detection.max_depth, 2);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gign.toml");
        std::fs::write(
            &path,
            "[templates]\noffline = true\n\n[detection]\nmax_depth = 4\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(path.as_path()), true).unwrap();
        assert!(cfg.templates.offline);
        assert_eq!(cfg.detection.max_depth, 4);
        assert_eq!(cfg.cache.revision, "v1");
    }

    #[test]
    fn missing_required_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(path.as_path()), true).is_err());
        assert!(AppConfig::load(Some(path.as_path()), false).is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gign.toml");
        std::fs::write(&path, "[templates]\nfetch_timeout_secs = 0\n").unwrap();
        assert!(AppConfig::load(Some(path.as_path()), true).is_err());
    }

    #[test]
    fn huge_staleness_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gign.toml");
        std::fs::write(&path, "[cache]\nstaleness_hours = 3000000000000\n").unwrap();

        let err = AppConfig::load(Some(path.as_path()), true).unwrap_err();
        assert!(format!("{err:#}").contains("staleness_hours"));
    }

    #[test]
    fn staleness_is_checked() {
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.staleness(), Some(TimeDelta::hours(168)));
        cfg.cache.staleness_hours = i64::MAX;
        assert_eq!(cfg.staleness(), None);
    }

    #[test]
    fn flags_override_loaded_values() {
        let mut cfg = AppConfig::default();
        cfg.cache.dir = Some("/from/file".into());
        let args = GlobalArgs {
            offline: true,
            cache_dir: Some("/from/flag".into()),
            templates_dir: Some("/team".into()),
            ..Default::default()
        };

        let cfg = cfg.with_overrides(&args);
        assert!(cfg.templates.offline);
        assert_eq!(cfg.cache_dir(), PathBuf::from("/from/flag"));
        assert_eq!(cfg.custom_dir(), PathBuf::from("/team"));
    }

    #[test]
    fn absent_flags_change_nothing() {
        let mut cfg = AppConfig::default();
        cfg.templates.offline = true;
        assert_eq!(cfg.clone().with_overrides(&GlobalArgs::default()), cfg);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn explicit_dirs_win() {
        let mut cfg = AppConfig::default();
        cfg.cache.dir = Some("/tmp/gign-cache".into());
        cfg.templates.custom_dir = Some("/tmp/gign-templates".into());
        assert_eq!(cfg.cache_dir(), PathBuf::from("/tmp/gign-cache"));
        assert_eq!(cfg.custom_dir(), PathBuf::from("/tmp/gign-templates"));
    }
}
