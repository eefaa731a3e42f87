//! Heuristic recommendations.
//!
//! A pure rule table over the detected technologies, the [`ProjectStats`]
//! snapshot and (optionally) the document that is about to be written.
//! Recommendations already satisfied by the document are not produced.

use serde::Serialize;

use crate::domain::entities::{MergedDocument, ProjectStats};
use crate::domain::value_objects::{Priority, TechnologyId};

/// Payload shared by every recommendation category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub reasoning: String,
    /// Ignore rules that would address the finding.
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Recommendation {
    Security(Advice),
    Performance(Advice),
    BestPractice(Advice),
    Technology(Advice),
}

impl Recommendation {
    pub fn advice(&self) -> &Advice {
        match self {
            Self::Security(a) | Self::Performance(a) | Self::BestPractice(a) | Self::Technology(a) => a,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Security(_) => "security",
            Self::Performance(_) => "performance",
            Self::BestPractice(_) => "best_practice",
            Self::Technology(_) => "technology",
        }
    }

    pub fn priority(&self) -> Priority {
        self.advice().priority
    }
}

/// Community patterns per technology.
static COMMUNITY_PATTERNS: &[(&str, &[&str])] = &[
    (
        "python",
        &[
            "*.pyc",
            "__pycache__/",
            ".pytest_cache/",
            ".coverage",
            "htmlcov/",
            ".tox/",
            ".venv/",
            "venv/",
            ".mypy_cache/",
        ],
    ),
    (
        "node",
        &[
            "node_modules/",
            "npm-debug.log*",
            "yarn-debug.log*",
            "yarn-error.log*",
            ".npm",
            ".eslintcache",
            ".next/",
            "out/",
            ".nuxt/",
        ],
    ),
    (
        "java",
        &[
            "target/",
            "*.class",
            "*.jar",
            ".gradle/",
            "build/",
            ".idea/",
            ".eclipse/",
            "*.iml",
        ],
    ),
    ("rust", &["target/", "**/*.rs.bk"]),
    ("go", &["*.exe", "*.test", "*.out", "vendor/"]),
];

/// Produce recommendations, most urgent first.
///
/// Sorted by priority, then confidence, both descending.
pub fn recommend(
    technologies: &[TechnologyId],
    stats: &ProjectStats,
    document: Option<&MergedDocument>,
) -> Vec<Recommendation> {
    let missing = |candidates: Vec<String>| -> Vec<String> {
        candidates
            .into_iter()
            .filter(|p| document.is_none_or(|doc| !doc.contains_rule(p)))
            .collect()
    };

    let mut out = Vec::new();

    // ── Security ────────────────────────────────────────────────────────
    let sensitive = missing(stats.sensitive_files.clone());
    if !sensitive.is_empty() {
        out.push(Recommendation::Security(Advice {
            title: "Sensitive Files Detected".into(),
            description: format!("Found {} potentially sensitive files", sensitive.len()),
            priority: Priority::Critical,
            confidence: 0.95,
            reasoning: "Sensitive files like .env, .key, .pem files should never be committed"
                .into(),
            patterns: sensitive,
        }));
    }

    let configs = missing(stats.config_files.clone());
    if !configs.is_empty() {
        out.push(Recommendation::Security(Advice {
            title: "Configuration Files".into(),
            description: "Configuration files detected that may contain sensitive data".into(),
            priority: Priority::High,
            confidence: 0.8,
            reasoning: "Configuration files often contain API keys, passwords, or other secrets"
                .into(),
            patterns: configs,
        }));
    }

    // ── Performance ─────────────────────────────────────────────────────
    let large = missing(stats.large_files.iter().map(|(p, _)| p.clone()).collect());
    if !large.is_empty() {
        out.push(Recommendation::Performance(Advice {
            title: "Large Files Detected".into(),
            description: format!("Found {} files larger than 10MB", large.len()),
            priority: Priority::High,
            confidence: 0.9,
            reasoning: "Large files slow down git operations and increase repository size".into(),
            patterns: large,
        }));
    }

    let caches = missing(stats.cache_dirs.iter().map(|d| format!("{d}/")).collect());
    if !caches.is_empty() {
        out.push(Recommendation::Performance(Advice {
            title: "Cache Directories".into(),
            description: format!("Found {} cache directories", caches.len()),
            priority: Priority::Medium,
            confidence: 0.85,
            reasoning: "Cache directories contain temporary files that should not be committed"
                .into(),
            patterns: caches,
        }));
    }

    // ── Best practice ───────────────────────────────────────────────────
    if !stats.log_files.is_empty() && !missing(vec!["*.log".into()]).is_empty() {
        out.push(Recommendation::BestPractice(Advice {
            title: "Log Files".into(),
            description: format!("Found {} log files", stats.log_files.len()),
            priority: Priority::Medium,
            confidence: 0.9,
            reasoning: "Log files contain runtime information and should not be committed".into(),
            patterns: vec!["*.log".into()],
        }));
    }

    let builds = missing(stats.build_dirs.iter().map(|d| format!("{d}/")).collect());
    if !builds.is_empty() {
        out.push(Recommendation::BestPractice(Advice {
            title: "Build Output Directories".into(),
            description: format!("Found {} build output directories", builds.len()),
            priority: Priority::High,
            confidence: 0.95,
            reasoning: "Build outputs are generated files that should not be committed".into(),
            patterns: builds,
        }));
    }

    // ── Technology ──────────────────────────────────────────────────────
    for tech in technologies {
        let Some((_, patterns)) = COMMUNITY_PATTERNS
            .iter()
            .find(|(id, _)| *id == tech.as_str())
        else {
            continue;
        };

        let absent = missing(patterns.iter().map(|p| (*p).to_owned()).collect());
        if absent.is_empty() {
            continue;
        }
        out.push(Recommendation::Technology(Advice {
            title: format!("{} Best Practices", title_case(tech.as_str())),
            description: format!(
                "Missing {} recommended patterns for {}",
                absent.len(),
                tech
            ),
            priority: Priority::High,
            confidence: 0.9,
            reasoning: format!("Community best practices for {tech} projects"),
            patterns: absent,
        }));
    }

    out.sort_by(|a, b| {
        b.priority()
            .cmp(&a.priority())
            .then_with(|| b.advice().confidence.total_cmp(&a.advice().confidence))
    });
    out
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
