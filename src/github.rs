use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{PortfolioError, Result};
use crate::models::RepositoryMetadata;

/// Maximum repositories requested from the listing endpoint (the GitHub
/// API per-page ceiling).
const REPOS_PER_PAGE: u32 = 100;

/// At most this many root-directory files are sampled per repository.
const MAX_SAMPLE_FILES: usize = 5;

/// Root-directory files with one of these extensions are considered
/// source samples.
const SOURCE_EXTENSIONS: &[&str] = &[".js", ".ts", ".jsx", ".tsx", ".py", ".java", ".cpp", ".go"];

const USER_AGENT: &str = "devfolio";

/// Read operations against a repository-hosting provider.
///
/// The concrete client is injected wherever repositories are consumed, so
/// tests can substitute a double without touching the network.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Lists up to 100 most-recently-updated public repositories for a
    /// user. Upstream failure is an error; the caller decides whether to
    /// abort or degrade.
    async fn list_public_repositories(&self, username: &str) -> Result<Vec<RepositoryMetadata>>;

    /// Fetches and decodes a repository's README. Absence and fetch
    /// failures both yield `None`; README text is optional enrichment,
    /// not a correctness requirement.
    async fn fetch_readme(&self, owner: &str, repo: &str) -> Option<String>;

    /// Downloads up to five non-hidden root-directory source files and
    /// returns the contents that downloaded successfully. Empty on any
    /// listing failure.
    async fn fetch_sample_source_files(&self, owner: &str, repo: &str) -> Vec<String>;
}

/// GitHub REST API client
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Repository record as the listing endpoint returns it; normalized into
/// [`RepositoryMetadata`] with safe defaults.
#[derive(Debug, Deserialize)]
struct RawRepo {
    id: u64,
    name: String,
    description: Option<String>,
    html_url: String,
    homepage: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    private: bool,
}

#[derive(Debug, Deserialize)]
struct ReadmePayload {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    download_url: Option<String>,
}

impl GitHubClient {
    /// Creates a client from the application configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.github_api_base.trim_end_matches('/').to_string(),
            token: config.github_token.clone(),
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn readme_request(&self, owner: &str, repo: &str) -> Result<String> {
        let response = self
            .get(&format!("/repos/{}/{}/readme", owner, repo))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PortfolioError::GitHubApi(format!(
                "README request failed: HTTP {}",
                response.status()
            )));
        }

        let payload: ReadmePayload = response.json().await?;
        decode_readme(&payload.content)
    }

    async fn list_root_entries(&self, owner: &str, repo: &str) -> Result<Vec<ContentEntry>> {
        let response = self
            .get(&format!("/repos/{}/{}/contents/", owner, repo))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PortfolioError::GitHubApi(format!(
                "Content listing failed: HTTP {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn download_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(PortfolioError::GitHubApi(format!(
                "File download failed: HTTP {}",
                response.status()
            )));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl RepositoryHost for GitHubClient {
    async fn list_public_repositories(&self, username: &str) -> Result<Vec<RepositoryMetadata>> {
        let per_page = REPOS_PER_PAGE.to_string();
        let response = self
            .get(&format!("/users/{}/repos", username))
            .query(&[
                ("sort", "updated"),
                ("direction", "desc"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PortfolioError::GitHubApi(format!(
                "Repository listing failed: HTTP {}",
                response.status()
            )));
        }

        let repos: Vec<RawRepo> = response.json().await?;
        let fetched_at = Utc::now();

        Ok(repos
            .into_iter()
            .filter(|repo| !repo.private)
            .map(|repo| normalize(repo, fetched_at))
            .collect())
    }

    async fn fetch_readme(&self, owner: &str, repo: &str) -> Option<String> {
        match self.readme_request(owner, repo).await {
            Ok(text) => Some(text),
            Err(error) => {
                warn!("No README for {}/{}: {}", owner, repo, error);
                None
            }
        }
    }

    async fn fetch_sample_source_files(&self, owner: &str, repo: &str) -> Vec<String> {
        let entries = match self.list_root_entries(owner, repo).await {
            Ok(entries) => entries,
            Err(error) => {
                warn!("Could not list files for {}/{}: {}", owner, repo, error);
                return Vec::new();
            }
        };

        let candidates: Vec<ContentEntry> = entries
            .into_iter()
            .filter(|entry| is_sample_candidate(&entry.name))
            .take(MAX_SAMPLE_FILES)
            .collect();

        debug!(
            "Sampling {} source files from {}/{}",
            candidates.len(),
            owner,
            repo
        );

        let downloads = candidates.iter().filter_map(|entry| {
            entry
                .download_url
                .as_deref()
                .map(|url| self.download_text(url))
        });

        join_all(downloads)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(text) => Some(text),
                Err(error) => {
                    warn!("Skipping sample file from {}/{}: {}", owner, repo, error);
                    None
                }
            })
            .collect()
    }
}

fn is_sample_candidate(name: &str) -> bool {
    !name.starts_with('.') && SOURCE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

fn normalize(repo: RawRepo, fetched_at: DateTime<Utc>) -> RepositoryMetadata {
    RepositoryMetadata {
        id: repo.id,
        name: repo.name,
        description: repo.description,
        html_url: repo.html_url,
        homepage: repo.homepage,
        topics: repo.topics,
        language: repo.language,
        stargazers_count: repo.stargazers_count,
        forks_count: repo.forks_count,
        created_at: repo.created_at.unwrap_or(fetched_at),
        updated_at: repo.updated_at.unwrap_or(fetched_at),
    }
}

/// GitHub serves README content base64-encoded with embedded newlines.
fn decode_readme(content: &str) -> Result<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact)
        .map_err(|e| PortfolioError::GitHubApi(format!("README decode failed: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| PortfolioError::GitHubApi(format!("README is not UTF-8: {}", e)))
}
