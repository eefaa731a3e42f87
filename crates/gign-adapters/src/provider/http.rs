//! HTTP template provider for gitignore.io compatible APIs.
//!
//! `GET {api_url}/{name}` returns the template as plain text. Unknown names
//! answer 404, or 200 with an `ERROR: <name> is undefined` body on older
//! deployments; both are reported as [`ProviderError::NotFound`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use gign_core::{
    application::{
        ApplicationError,
        ports::{ProviderError, TemplateProvider},
    },
    domain::TechnologyId,
    error::GignResult,
};

pub const DEFAULT_API_URL: &str = "https://www.toptal.com/developers/gitignore/api";

/// Technology ids whose remote template goes by another name.
static REMOTE_ALIASES: &[(&str, &str)] = &[
    ("jupyter", "jupyternotebooks"),
    ("vscode", "visualstudiocode"),
    ("nodejs", "node"),
    ("golang", "go"),
    ("dotnet", "dotnetcore"),
    ("osx", "macos"),
    ("intellij", "jetbrains"),
    ("next", "nextjs"),
];

/// Lines the API wraps every response with.
const BANNER_PREFIXES: &[&str] = &["# Created by https://", "# Edit at https://", "# End of https://"];

#[derive(Debug, Clone)]
pub struct HttpTemplateProvider {
    client: Client,
    api_url: String,
}

impl HttpTemplateProvider {
    /// Build a provider with a client-level request timeout.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> GignResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gign/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApplicationError::ValidationFailed(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn url_for(&self, id: &TechnologyId) -> String {
        format!("{}/{}", self.api_url, remote_name(id))
    }
}

fn remote_name(id: &TechnologyId) -> &str {
    REMOTE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == id.as_str())
        .map(|(_, name)| *name)
        .unwrap_or(id.as_str())
}

/// Turn a response into template text.
pub(crate) fn interpret(status: u16, body: &str) -> Result<String, ProviderError> {
    if status == 404 {
        return Err(ProviderError::NotFound);
    }
    if !(200..300).contains(&status) {
        return Err(ProviderError::Status(status));
    }
    if body.contains("ERROR:") && body.contains("is undefined") {
        return Err(ProviderError::NotFound);
    }

    let mut text: String = body
        .lines()
        .filter(|line| !BANNER_PREFIXES.iter().any(|p| line.starts_with(p)))
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    Ok(text)
}

#[async_trait]
impl TemplateProvider for HttpTemplateProvider {
    fn name(&self) -> String {
        self.api_url.clone()
    }

    async fn fetch(&self, id: &TechnologyId) -> Result<String, ProviderError> {
        let url = self.url_for(id);
        debug!(%url, "Fetching template");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                warn!(%url, error = %e, "Template request failed");
                ProviderError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Transport(e.to_string())
            }
        })?;

        interpret(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(s: &str) -> TechnologyId {
        TechnologyId::parse(s).unwrap()
    }

    #[test]
    fn strips_api_banner() {
        let body = "# Created by https://www.toptal.com/developers/gitignore/api/rust\n\
                    # Edit at https://www.toptal.com/developers/gitignore?templates=rust\n\
                    \n\
                    ### Rust ###\n\
                    target/\n\
                    \n\
                    # End of https://www.toptal.com/developers/gitignore/api/rust\n";

        assert_eq!(interpret(200, body).unwrap(), "\n### Rust ###\ntarget/\n\n");
    }

    #[test]
    fn not_found_variants() {
        assert_eq!(interpret(404, "nope"), Err(ProviderError::NotFound));
        assert_eq!(
            interpret(200, "#!! ERROR: cobol is undefined. Use list command to see defined gitignore types !!#"),
            Err(ProviderError::NotFound)
        );
        assert_eq!(interpret(503, ""), Err(ProviderError::Status(503)));
    }

    #[test]
    fn aliases_map_to_remote_names() {
        let provider = HttpTemplateProvider::new("https://example.test/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(provider.url_for(&tid("vscode")), "https://example.test/api/visualstudiocode");
        assert_eq!(provider.url_for(&tid("rust")), "https://example.test/api/rust");
    }
}
