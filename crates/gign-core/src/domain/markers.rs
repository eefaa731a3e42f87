//! Technology marker registry.
//!
//! A marker is an observable fact about a project tree (a file name, a
//! directory name, a file extension, or a needle inside a dependency
//! manifest). Each marker signals one or more technologies with a weight.
//!
//! # Adding a Technology
//!
//! 1. Add one or more [`MarkerDef`] entries to [`MARKER_REGISTRY`]
//! 2. Make sure a template exists for the id (remote or bundled)
//!
//! Declaration order matters: it is the tie-break when two technologies
//! end up with the same confidence.

use std::fmt;

/// What a marker looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPattern {
    /// A file with exactly this name.
    FileName(&'static str),
    /// A directory with exactly this name.
    DirName(&'static str),
    /// A file with this extension (compared lowercase, without the dot).
    Extension(&'static str),
    /// A manifest file whose lowercased content contains `needle`.
    ManifestContains {
        file: &'static str,
        needle: &'static str,
    },
}

impl fmt::Display for MarkerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileName(name) => f.write_str(name),
            Self::DirName(name) => write!(f, "{name}/"),
            Self::Extension(ext) => write!(f, "*.{ext}"),
            Self::ManifestContains { file, needle } => write!(f, "{file} mentions {needle}"),
        }
    }
}

/// One marker and the technologies it signals.
#[derive(Debug, Clone, Copy)]
pub struct MarkerDef {
    pub pattern: MarkerPattern,
    /// `(technology id, weight)` pairs. Weights are in `(0, 1]`.
    pub signals: &'static [(&'static str, f64)],
}

use MarkerPattern::{DirName, Extension, FileName, ManifestContains};

/// Single source of truth for technology detection.
pub static MARKER_REGISTRY: &[MarkerDef] = &[
    // ── JavaScript ecosystem ────────────────────────────────────────────
    MarkerDef { pattern: FileName("package.json"), signals: &[("node", 1.0)] },
    MarkerDef { pattern: FileName("package-lock.json"), signals: &[("node", 0.5)] },
    MarkerDef { pattern: FileName("yarn.lock"), signals: &[("node", 0.5)] },
    MarkerDef { pattern: FileName("pnpm-lock.yaml"), signals: &[("node", 0.5)] },
    MarkerDef { pattern: Extension("js"), signals: &[("node", 0.3)] },
    MarkerDef { pattern: Extension("ts"), signals: &[("node", 0.3)] },
    MarkerDef {
        pattern: ManifestContains { file: "package.json", needle: "\"react\"" },
        signals: &[("react", 1.0)],
    },
    MarkerDef {
        pattern: ManifestContains { file: "package.json", needle: "\"vue\"" },
        signals: &[("vue", 1.0)],
    },
    MarkerDef {
        pattern: ManifestContains { file: "package.json", needle: "\"next\"" },
        signals: &[("nextjs", 1.0)],
    },
    MarkerDef { pattern: FileName("next.config.js"), signals: &[("nextjs", 1.0)] },
    MarkerDef { pattern: FileName("angular.json"), signals: &[("angular", 1.0), ("node", 0.5)] },
    // ── Python ──────────────────────────────────────────────────────────
    MarkerDef { pattern: FileName("requirements.txt"), signals: &[("python", 0.8)] },
    MarkerDef { pattern: FileName("pyproject.toml"), signals: &[("python", 0.8)] },
    MarkerDef { pattern: FileName("setup.py"), signals: &[("python", 0.8)] },
    MarkerDef { pattern: FileName("Pipfile"), signals: &[("python", 0.8)] },
    MarkerDef { pattern: Extension("py"), signals: &[("python", 0.5)] },
    MarkerDef { pattern: FileName("manage.py"), signals: &[("django", 0.6), ("python", 0.3)] },
    MarkerDef {
        pattern: ManifestContains { file: "requirements.txt", needle: "django" },
        signals: &[("django", 0.8)],
    },
    MarkerDef {
        pattern: ManifestContains { file: "pyproject.toml", needle: "django" },
        signals: &[("django", 0.8)],
    },
    MarkerDef {
        pattern: ManifestContains { file: "requirements.txt", needle: "flask" },
        signals: &[("flask", 0.8)],
    },
    MarkerDef {
        pattern: ManifestContains { file: "pyproject.toml", needle: "flask" },
        signals: &[("flask", 0.8)],
    },
    MarkerDef {
        pattern: Extension("ipynb"),
        signals: &[("jupyternotebooks", 1.0), ("python", 0.3)],
    },
    // ── Systems languages ───────────────────────────────────────────────
    MarkerDef { pattern: FileName("Cargo.toml"), signals: &[("rust", 1.0)] },
    MarkerDef { pattern: Extension("rs"), signals: &[("rust", 0.5)] },
    MarkerDef { pattern: FileName("go.mod"), signals: &[("go", 1.0)] },
    MarkerDef { pattern: Extension("go"), signals: &[("go", 0.5)] },
    MarkerDef { pattern: FileName("CMakeLists.txt"), signals: &[("cmake", 1.0)] },
    // ── JVM ─────────────────────────────────────────────────────────────
    MarkerDef { pattern: FileName("pom.xml"), signals: &[("maven", 1.0), ("java", 0.8)] },
    MarkerDef { pattern: FileName("build.gradle"), signals: &[("gradle", 1.0), ("java", 0.6)] },
    MarkerDef {
        pattern: FileName("build.gradle.kts"),
        signals: &[("gradle", 1.0), ("kotlin", 0.8)],
    },
    MarkerDef { pattern: Extension("java"), signals: &[("java", 0.5)] },
    MarkerDef { pattern: Extension("kt"), signals: &[("kotlin", 0.5)] },
    // ── Scripting and web backends ──────────────────────────────────────
    MarkerDef { pattern: FileName("Gemfile"), signals: &[("ruby", 1.0)] },
    MarkerDef { pattern: Extension("rb"), signals: &[("ruby", 0.5)] },
    MarkerDef {
        pattern: ManifestContains { file: "Gemfile", needle: "rails" },
        signals: &[("rails", 1.0)],
    },
    MarkerDef { pattern: FileName("composer.json"), signals: &[("composer", 1.0), ("php", 0.8)] },
    MarkerDef { pattern: Extension("php"), signals: &[("php", 0.5)] },
    MarkerDef {
        pattern: ManifestContains { file: "composer.json", needle: "laravel/framework" },
        signals: &[("laravel", 1.0)],
    },
    MarkerDef { pattern: FileName("mix.exs"), signals: &[("elixir", 1.0)] },
    // ── Mobile and .NET ─────────────────────────────────────────────────
    MarkerDef { pattern: Extension("csproj"), signals: &[("dotnetcore", 1.0)] },
    MarkerDef { pattern: Extension("cs"), signals: &[("dotnetcore", 0.4)] },
    MarkerDef { pattern: FileName("Package.swift"), signals: &[("swift", 1.0)] },
    MarkerDef { pattern: Extension("swift"), signals: &[("swift", 0.5)] },
    MarkerDef { pattern: FileName("pubspec.yaml"), signals: &[("dart", 1.0)] },
    MarkerDef {
        pattern: ManifestContains { file: "pubspec.yaml", needle: "flutter:" },
        signals: &[("flutter", 1.0)],
    },
    // ── Infrastructure ──────────────────────────────────────────────────
    MarkerDef { pattern: Extension("tf"), signals: &[("terraform", 1.0)] },
    // ── Editors and operating systems ───────────────────────────────────
    MarkerDef { pattern: DirName(".idea"), signals: &[("jetbrains", 1.0)] },
    MarkerDef { pattern: DirName(".vscode"), signals: &[("visualstudiocode", 1.0)] },
    MarkerDef { pattern: FileName(".DS_Store"), signals: &[("macos", 1.0)] },
];

/// Directories whose contents the detector never traverses.
pub static IGNORED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    "dist",
    "build",
    ".idea",
    ".vscode",
    ".gradle",
    ".mypy_cache",
    ".pytest_cache",
    ".next",
    ".nuxt",
    ".cache",
    "vendor",
];

/// Whether the detector should descend into a directory with this name.
pub fn is_traversable(dir_name: &str) -> bool {
    !IGNORED_DIRS.contains(&dir_name)
}

/// Position of the first marker that mentions `technology`.
///
/// Unknown technologies sort after every known one.
pub fn declaration_rank(technology: &str) -> usize {
    MARKER_REGISTRY
        .iter()
        .position(|def| def.signals.iter().any(|(id, _)| *id == technology))
        .unwrap_or(usize::MAX)
}

/// Names of files whose content some marker needs to inspect.
pub fn manifest_files() -> impl Iterator<Item = &'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    MARKER_REGISTRY.iter().filter_map(move |def| match def.pattern {
        ManifestContains { file, .. } if !seen.contains(&file) => {
            seen.push(file);
            Some(file)
        }
        _ => None,
    })
}

/// Every technology id the registry can produce, in declaration order.
pub fn known_technologies() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = Vec::new();
    for def in MARKER_REGISTRY {
        for (id, _) in def.signals {
            if !ids.contains(id) {
                ids.push(id);
            }
        }
    }
    ids
}
