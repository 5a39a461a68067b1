use async_trait::async_trait;
use base64::Engine;
use reqwest::{header, Client, StatusCode};

use crate::error::Result;
use crate::models::{Repository, SearchResponse};

/// The seam the orchestrator consumes. Both operations degrade to empty
/// results on failure; callers never see a transport error.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// One page of search results, ranked by stars descending. Empty on any
    /// failure.
    async fn search(&self, query: &str, per_page: u32) -> Vec<Repository>;

    /// Decoded content of a single file, or an empty string if the file is
    /// missing or the payload cannot be decoded.
    async fn file_content(&self, owner: &str, repo: &str, path: &str) -> String;

    /// README text, trying the canonical filename before the lowercase
    /// variant. Callers must tolerate an empty result.
    async fn readme(&self, owner: &str, repo: &str) -> String {
        let content = self.file_content(owner, repo, "README.md").await;
        if !content.is_empty() {
            return content;
        }
        self.file_content(owner, repo, "readme.md").await
    }
}

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Builds the client. The token is optional: without one, requests go out
    /// unauthenticated and run under the lower anonymous rate limits.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("botindex/0.1"),
        );
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: "https://api.github.com".to_string(),
        })
    }

    /// Strips the embedded newlines the contents API puts in its base64
    /// payload, then decodes with lossy UTF-8. Any decode problem yields "".
    fn decode_content(raw: &str) -> String {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        match base64::engine::general_purpose::STANDARD.decode(compact) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::debug!("Ignoring undecodable file payload: {}", e);
                String::new()
            }
        }
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn search(&self, query: &str, per_page: u32) -> Vec<Repository> {
        let url = format!("{}/search/repositories", self.base_url);
        tracing::info!("Searching repositories: {:?}", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", &per_page.to_string()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Repository search failed: {}", e);
                return Vec::new();
            }
        };

        match response.status() {
            StatusCode::NOT_FOUND => return Vec::new(),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("Repository search returned {}: {}", status, body);
                return Vec::new();
            }
            _ => {}
        }

        match response.json::<SearchResponse>().await {
            Ok(parsed) => parsed.items,
            Err(e) => {
                tracing::warn!("Malformed search response: {}", e);
                Vec::new()
            }
        }
    }

    async fn file_content(&self, owner: &str, repo: &str, path: &str) -> String {
        let url = format!("{}/repos/{}/{}/contents/{}", self.base_url, owner, repo, path);
        tracing::debug!("Fetching file: {}/{}/{}", owner, repo, path);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("File fetch failed for {}/{}: {}", owner, repo, e);
                return String::new();
            }
        };

        match response.status() {
            StatusCode::NOT_FOUND => return String::new(),
            status if !status.is_success() => {
                tracing::warn!(
                    "File fetch for {}/{}/{} returned {}",
                    owner,
                    repo,
                    path,
                    status
                );
                return String::new();
            }
            _ => {}
        }

        #[derive(serde::Deserialize)]
        struct ContentsResponse {
            #[serde(default)]
            content: String,
        }

        match response.json::<ContentsResponse>().await {
            Ok(parsed) => Self::decode_content(&parsed.content),
            Err(e) => {
                tracing::warn!("Malformed contents response: {}", e);
                String::new()
            }
        }
    }
}
