//! Templates shipped inside the binary.
//!
//! The last resort of template resolution: used offline, or when the
//! remote service fails and nothing is cached. Every technology the
//! detector can report has an entry here.

use gign_core::{application::ports::FallbackCatalog, domain::TechnologyId};

static TEMPLATES: &[(&str, &str)] = &[
    ("angular", include_str!("../templates/angular.gitignore")),
    ("cmake", include_str!("../templates/cmake.gitignore")),
    ("composer", include_str!("../templates/composer.gitignore")),
    ("dart", include_str!("../templates/dart.gitignore")),
    ("django", include_str!("../templates/django.gitignore")),
    ("dotnetcore", include_str!("../templates/dotnetcore.gitignore")),
    ("elixir", include_str!("../templates/elixir.gitignore")),
    ("flask", include_str!("../templates/flask.gitignore")),
    ("flutter", include_str!("../templates/flutter.gitignore")),
    ("go", include_str!("../templates/go.gitignore")),
    ("gradle", include_str!("../templates/gradle.gitignore")),
    ("java", include_str!("../templates/java.gitignore")),
    ("jetbrains", include_str!("../templates/jetbrains.gitignore")),
    ("jupyternotebooks", include_str!("../templates/jupyternotebooks.gitignore")),
    ("kotlin", include_str!("../templates/kotlin.gitignore")),
    ("laravel", include_str!("../templates/laravel.gitignore")),
    ("linux", include_str!("../templates/linux.gitignore")),
    ("macos", include_str!("../templates/macos.gitignore")),
    ("maven", include_str!("../templates/maven.gitignore")),
    ("nextjs", include_str!("../templates/nextjs.gitignore")),
    ("node", include_str!("../templates/node.gitignore")),
    ("php", include_str!("../templates/php.gitignore")),
    ("python", include_str!("../templates/python.gitignore")),
    ("rails", include_str!("../templates/rails.gitignore")),
    ("react", include_str!("../templates/react.gitignore")),
    ("ruby", include_str!("../templates/ruby.gitignore")),
    ("rust", include_str!("../templates/rust.gitignore")),
    ("swift", include_str!("../templates/swift.gitignore")),
    ("terraform", include_str!("../templates/terraform.gitignore")),
    ("visualstudiocode", include_str!("../templates/visualstudiocode.gitignore")),
    ("vue", include_str!("../templates/vue.gitignore")),
    ("windows", include_str!("../templates/windows.gitignore")),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct BundledTemplates;

impl BundledTemplates {
    pub fn new() -> Self {
        Self
    }

    pub fn len(&self) -> usize {
        TEMPLATES.len()
    }

    pub fn is_empty(&self) -> bool {
        TEMPLATES.is_empty()
    }
}

impl FallbackCatalog for BundledTemplates {
    fn get(&self, id: &TechnologyId) -> Option<String> {
        TEMPLATES
            .iter()
            .find(|(name, _)| *name == id.as_str())
            .map(|(_, text)| (*text).to_owned())
    }

    fn ids(&self) -> Vec<TechnologyId> {
        TEMPLATES
            .iter()
            .filter_map(|(name, _)| TechnologyId::parse(name).ok())
            .collect()
    }
}
