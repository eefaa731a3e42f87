//! End-to-end generation over in-memory adapters.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use gign_adapters::{
    BundledTemplates, InMemoryTemplateCache, InMemoryTemplateStore, ManualClock, MemoryFilesystem,
};
use gign_core::application::{
    ApplicationError, CachePolicy, GenerateRequest, GenerateService, OutputWriter, RunWarning,
    TechnologyDetector, TemplateResolver, WriteOutcome,
    ports::{ProviderError, TemplateProvider, TemplateStore},
};
use gign_core::domain::TechnologyId;
use gign_core::error::GignError;

/// Serves a fixed set of templates; everything else is unknown.
struct StaticProvider(Vec<(&'static str, &'static str)>);

#[async_trait]
impl TemplateProvider for StaticProvider {
    fn name(&self) -> String {
        "static".into()
    }

    async fn fetch(&self, id: &TechnologyId) -> Result<String, ProviderError> {
        self.0
            .iter()
            .find(|(k, _)| *k == id.as_str())
            .map(|(_, v)| (*v).to_string())
            .ok_or(ProviderError::NotFound)
    }
}

struct Harness {
    fs: MemoryFilesystem,
    store: InMemoryTemplateStore,
    service: GenerateService,
}

fn harness(provider: Option<StaticProvider>) -> Harness {
    let fs = MemoryFilesystem::new();
    let store = InMemoryTemplateStore::new();
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 30, 0).unwrap(),
    ));

    let mut resolver = TemplateResolver::new(
        Arc::new(InMemoryTemplateCache::new()),
        Arc::new(BundledTemplates::new()),
        clock.clone(),
        CachePolicy::default(),
    )
    .with_store(Arc::new(store.clone()));
    if let Some(provider) = provider {
        resolver = resolver.with_provider(Arc::new(provider));
    }

    let service = GenerateService::new(
        Arc::new(fs.clone()),
        TechnologyDetector::new(Arc::new(fs.clone())),
        resolver,
        OutputWriter::new(Arc::new(fs.clone()), clock),
    );

    Harness { fs, store, service }
}

fn python_node_provider() -> StaticProvider {
    StaticProvider(vec![
        ("python", "*.pyc\n__pycache__/\n"),
        ("node", "node_modules/\n*.pyc\n"),
    ])
}

fn request(techs: &[&str]) -> GenerateRequest {
    GenerateRequest {
        root: "/repo".into(),
        technologies: techs.iter().map(|t| TechnologyId::parse(t).unwrap()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn explicit_python_and_node_merge_in_order() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_dir("/repo");

    let report = h.service.generate(&request(&["python", "node"])).await.unwrap();

    assert_eq!(
        h.fs.read_file("/repo/.gitignore").unwrap(),
        "# python\n*.pyc\n__pycache__/\n\n# node\nnode_modules/\n"
    );
    assert_eq!(report.rule_count, 3);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn second_run_is_byte_identical() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_dir("/repo");

    h.service.generate(&request(&["python", "node"])).await.unwrap();
    let first = h.fs.read_file("/repo/.gitignore").unwrap();

    h.service.generate(&request(&["python", "node"])).await.unwrap();
    let second = h.fs.read_file("/repo/.gitignore").unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn existing_user_lines_stay_first() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_file("/repo/.gitignore", "# mine\n*.pyc\nsecrets/\n");

    h.service.generate(&request(&["python"])).await.unwrap();

    assert_eq!(
        h.fs.read_file("/repo/.gitignore").unwrap(),
        "# mine\n*.pyc\nsecrets/\n\n# python\n__pycache__/\n"
    );
}

#[tokio::test]
async fn custom_store_template_beats_remote() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_dir("/repo");
    h.store
        .insert(&TechnologyId::parse("python").unwrap(), "our-python-rule/\n")
        .unwrap();

    h.service.generate(&request(&["python"])).await.unwrap();

    assert_eq!(
        h.fs.read_file("/repo/.gitignore").unwrap(),
        "# python\nour-python-rule/\n"
    );
}

#[tokio::test]
async fn detection_drives_generation_offline() {
    let h = harness(None);
    h.fs.add_file("/repo/package.json", "{}");

    let report = h.service.generate(&request(&[])).await.unwrap();

    assert_eq!(report.detections.len(), 1);
    assert_eq!(report.detections[0].technology.as_str(), "node");
    let text = h.fs.read_file("/repo/.gitignore").unwrap();
    assert!(text.starts_with("# node\n"));
    assert!(text.contains("\nnode_modules/\n"));
}

#[tokio::test]
async fn unknown_technology_is_a_warning_not_a_failure() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_dir("/repo");

    let report = h.service.generate(&request(&["python", "cobol"])).await.unwrap();

    assert!(matches!(
        report.warnings.as_slice(),
        [RunWarning::Resolution { id, .. }] if id.as_str() == "cobol"
    ));
    assert_eq!(
        h.fs.read_file("/repo/.gitignore").unwrap(),
        "# python\n*.pyc\n__pycache__/\n"
    );
}

#[tokio::test]
async fn failed_write_keeps_old_file() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_file("/repo/.gitignore", "old\n");
    h.fs.fail_writes(true);

    let err = h.service.generate(&request(&["node"])).await.unwrap_err();

    assert!(matches!(
        err,
        GignError::Application(ApplicationError::WriteFailure { .. })
    ));
    assert_eq!(h.fs.read_file("/repo/.gitignore").unwrap(), "old\n");
}

#[tokio::test]
async fn backup_is_timestamped_copy_of_previous_file() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_file("/repo/.gitignore", "old\n");

    let mut req = request(&["node"]);
    req.backup = true;
    let report = h.service.generate(&req).await.unwrap();

    let backup = Path::new("/repo/.gitignore.20260401T093000.bak");
    assert_eq!(h.fs.read_file(backup).unwrap(), "old\n");
    assert!(matches!(
        report.outcome,
        WriteOutcome::Written { backup: Some(ref b), .. } if b == backup
    ));
}

#[tokio::test]
async fn dry_run_touches_nothing() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_dir("/repo");

    let mut req = request(&["python"]);
    req.dry_run = true;
    let report = h.service.generate(&req).await.unwrap();

    assert_eq!(report.outcome, WriteOutcome::Skipped);
    assert_eq!(report.content, "# python\n*.pyc\n__pycache__/\n");
    assert!(h.fs.list_files().is_empty());
}

#[tokio::test]
async fn invalid_utf8_existing_file_is_fatal() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_file("/repo/.gitignore", [0xff, 0xfe, b'\n']);

    let err = h.service.generate(&request(&["python"])).await.unwrap_err();

    assert!(matches!(
        err,
        GignError::Application(ApplicationError::ExistingFileUnreadable { .. })
    ));
    assert_eq!(h.fs.list_files().len(), 1);
}

#[tokio::test]
async fn fresh_ignores_existing_content() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_file("/repo/.gitignore", "legacy/\n");

    let mut req = request(&["node"]);
    req.fresh = true;
    h.service.generate(&req).await.unwrap();

    assert_eq!(
        h.fs.read_file("/repo/.gitignore").unwrap(),
        "# node\nnode_modules/\n*.pyc\n"
    );
}

#[tokio::test]
async fn nothing_detected_and_no_file_is_an_error() {
    let h = harness(None);
    h.fs.add_file("/repo/README.md", "hi");

    let err = h.service.generate(&request(&[])).await.unwrap_err();
    assert!(matches!(
        err,
        GignError::Application(ApplicationError::NothingToGenerate { .. })
    ));
}

#[tokio::test]
async fn security_group_follows_detected_templates() {
    let h = harness(None);
    h.fs.add_file("/repo/package.json", "{}");

    let mut req = request(&[]);
    req.security = true;
    let report = h.service.generate(&req).await.unwrap();

    let ids: Vec<_> = report.technologies.iter().map(TechnologyId::as_str).collect();
    assert_eq!(ids, vec!["node", "security"]);
    let text = h.fs.read_file("/repo/.gitignore").unwrap();
    // Node already ignores `.env` and `.env.*`; its negation is repeated.
    assert!(text.contains("\n\n# security\n!.env.example\n*.key\n*.pem\n"));
}

#[tokio::test]
async fn security_group_sits_after_user_lines_and_skips_their_rules() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_file("/repo/.gitignore", ".env\n");

    let mut req = request(&["python"]);
    req.security = true;
    h.service.generate(&req).await.unwrap();

    let text = h.fs.read_file("/repo/.gitignore").unwrap();
    assert!(text.starts_with(".env\n\n# python\n*.pyc\n__pycache__/\n\n# security\n.env.*\n"));

    h.service.generate(&req).await.unwrap();
    assert_eq!(h.fs.read_file("/repo/.gitignore").unwrap(), text);
}

#[tokio::test]
async fn security_group_is_opt_in() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_dir("/repo");

    h.service.generate(&request(&["python"])).await.unwrap();

    assert!(!h.fs.read_file("/repo/.gitignore").unwrap().contains("# security"));
}

#[tokio::test]
async fn later_group_keeps_its_own_negation() {
    let h = harness(Some(StaticProvider(vec![
        ("logs", "*.log\n!keep.log\n"),
        ("app", "keep.log\n!keep.log\n"),
    ])));
    h.fs.add_dir("/repo");

    h.service.generate(&request(&["logs", "app"])).await.unwrap();
    let first = h.fs.read_file("/repo/.gitignore").unwrap();
    assert_eq!(first, "# logs\n*.log\n!keep.log\n\n# app\nkeep.log\n!keep.log\n");

    h.service.generate(&request(&["logs", "app"])).await.unwrap();
    assert_eq!(h.fs.read_file("/repo/.gitignore").unwrap(), first);
}

#[tokio::test]
async fn backups_within_one_second_keep_every_version() {
    let h = harness(Some(python_node_provider()));
    h.fs.add_file("/repo/.gitignore", "original\n");

    let mut req = request(&["node"]);
    req.backup = true;
    req.fresh = true;
    h.service.generate(&req).await.unwrap();
    let report = h.service.generate(&req).await.unwrap();

    assert_eq!(
        h.fs.read_file("/repo/.gitignore.20260401T093000.bak").unwrap(),
        "original\n"
    );
    let second = Path::new("/repo/.gitignore.20260401T093000.1.bak");
    assert_eq!(
        h.fs.read_file(second).unwrap(),
        "# node\nnode_modules/\n*.pyc\n"
    );
    assert!(matches!(
        report.outcome,
        WriteOutcome::Written { backup: Some(ref b), .. } if b == second
    ));
}
