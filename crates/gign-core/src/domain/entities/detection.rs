use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::value_objects::TechnologyId;

/// A detected technology and how sure the detector is about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub technology: TechnologyId,
    /// In `[0, 1]`.
    pub confidence: f64,
    /// Human-readable descriptions of the markers that matched.
    pub markers: Vec<String>,
}

/// Files above this size are reported as large.
pub const LARGE_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Name fragments that flag a file as sensitive, with the rules covering it.
const SENSITIVE: &[(&str, &[&str])] = &[
    (".env", &[".env", ".env.*", "!.env.example"]),
    (".key", &["*.key"]),
    (".pem", &["*.pem"]),
    (".crt", &["*.crt"]),
    (".p12", &["*.p12"]),
    (".pfx", &["*.pfx"]),
    ("config.json", &[]),
    ("secrets.", &["secrets.*"]),
    ("password", &["*password*"]),
    ("credential", &["credentials.json", "*.credentials"]),
];

/// Body of the `security` group: every rule from the sensitive-file table.
pub fn security_template() -> String {
    SENSITIVE
        .iter()
        .flat_map(|(_, rules)| rules.iter())
        .fold(String::new(), |mut text, rule| {
            text.push_str(rule);
            text.push('\n');
            text
        })
}

const CACHE_DIR_NEEDLES: &[&str] = &[
    "cache",
    "tmp",
    "temp",
    "node_modules",
    "vendor",
    "target",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".gradle",
];

const BUILD_DIR_NAMES: &[&str] = &["build", "dist", "out"];

/// Snapshot of project facts gathered during the detection walk.
///
/// Paths are relative to the scan root and use `/` as separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub file_count: usize,
    pub dir_count: usize,
    /// Lowercased extension (without dot) → number of files.
    pub extensions: BTreeMap<String, usize>,
    pub sensitive_files: Vec<String>,
    pub config_files: Vec<String>,
    pub large_files: Vec<(String, u64)>,
    pub cache_dirs: Vec<String>,
    pub log_files: Vec<String>,
    /// Build output directories directly under the root.
    pub build_dirs: Vec<String>,
}

impl ProjectStats {
    /// Record one file.
    pub fn observe_file(&mut self, rel_path: &str, name: &str, size: u64) {
        self.file_count += 1;
        let lower = name.to_ascii_lowercase();

        if let Some(ext) = extension_of(&lower) {
            *self.extensions.entry(ext.to_owned()).or_default() += 1;
            if ext == "log" {
                self.log_files.push(rel_path.to_owned());
            }
        }
        if SENSITIVE.iter().any(|(needle, _)| lower.contains(needle)) {
            self.sensitive_files.push(rel_path.to_owned());
        }
        if lower.contains("config") {
            self.config_files.push(rel_path.to_owned());
        }
        if size > LARGE_FILE_BYTES {
            self.large_files.push((rel_path.to_owned(), size));
        }
    }

    /// Record one directory. `depth` is 1 for direct children of the root.
    pub fn observe_dir(&mut self, rel_path: &str, name: &str, depth: usize) {
        self.dir_count += 1;
        let lower = name.to_ascii_lowercase();

        if CACHE_DIR_NEEDLES.iter().any(|n| lower.contains(n)) {
            self.cache_dirs.push(rel_path.to_owned());
        }
        if depth == 1 && BUILD_DIR_NAMES.contains(&name) {
            self.build_dirs.push(rel_path.to_owned());
        }
    }
}

/// Extension of a lowercased file name, ignoring dotfiles like `.env`.
pub fn extension_of(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then_some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_ignores_dotfiles() {
        assert_eq!(extension_of("main.py"), Some("py"));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of(".env"), None);
        assert_eq!(extension_of("makefile"), None);
    }

    #[test]
    fn observe_file_classifies() {
        let mut stats = ProjectStats::default();
        stats.observe_file(".env", ".env", 10);
        stats.observe_file("logs/app.log", "app.log", 10);
        stats.observe_file("data/big.bin", "big.bin", LARGE_FILE_BYTES + 1);
        stats.observe_file("app.config.js", "app.config.js", 1);

        assert_eq!(stats.file_count, 4);
        assert_eq!(stats.sensitive_files, vec![".env"]);
        assert_eq!(stats.log_files, vec!["logs/app.log"]);
        assert_eq!(stats.large_files, vec![("data/big.bin".into(), LARGE_FILE_BYTES + 1)]);
        assert_eq!(stats.config_files, vec!["app.config.js"]);
        assert_eq!(stats.extensions.get("log"), Some(&1));
    }

    #[test]
    fn security_template_covers_flagged_names() {
        let text = security_template();
        assert!(text.starts_with(".env\n.env.*\n!.env.example\n*.key\n"));
        assert!(text.ends_with('\n'));
        assert!(text.lines().any(|l| l == "secrets.*"));
        assert!(!text.contains("config.json"));
    }

    #[test]
    fn build_dirs_only_at_top_level() {
        let mut stats = ProjectStats::default();
        stats.observe_dir("dist", "dist", 1);
        stats.observe_dir("web/dist", "dist", 2);
        stats.observe_dir("node_modules", "node_modules", 1);

        assert_eq!(stats.build_dirs, vec!["dist"]);
        assert_eq!(stats.cache_dirs, vec!["node_modules"]);
    }
}
