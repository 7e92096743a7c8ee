use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::Result;

/// Tags considered relevant enough to steer an image search. A project
/// tag joins the query only when its lowercase form appears here.
const RELEVANT_TAGS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "next.js",
    "python",
    "flask",
    "django",
    "node",
    "sql",
    "database",
    "frontend",
    "backend",
    "fullstack",
    "mobile",
    "web development",
    "ai",
    "machine learning",
    "data science",
    "game development",
    "mobile app",
];

/// Generic keywords appended to every query to encourage visually
/// interesting results.
const QUERY_SUFFIX: &str = "technology abstract creative";

const MAX_QUERY_CHARS: usize = 100;

/// An image is picked at random among the first few results for variety.
const MAX_PICK_POOL: usize = 5;

/// Chooses an index in `0..pool_size`. Injectable so tests can pin the
/// otherwise random selection.
pub type IndexPicker = Arc<dyn Fn(usize) -> usize + Send + Sync>;

/// Looks up one candidate illustration image for a query.
///
/// `None` is the universal "no image" signal; implementations never
/// error and the caller supplies its own fallback image.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Returns one candidate image URL, or `None` on any failure
    async fn find_image(&self, query: &str) -> Option<String>;
}

/// Unsplash search API client
pub struct UnsplashClient {
    client: Client,
    base_url: String,
    access_key: Option<String>,
    picker: IndexPicker,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    urls: ResultUrls,
}

#[derive(Debug, Deserialize)]
struct ResultUrls {
    regular: Option<String>,
}

impl UnsplashClient {
    /// Creates a client from the application configuration. A missing
    /// access key silently disables lookup rather than failing.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent("devfolio")
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.unsplash_api_base.trim_end_matches('/').to_string(),
            access_key: config.unsplash_access_key.clone(),
            picker: Arc::new(|pool_size| rand::thread_rng().gen_range(0..pool_size)),
        })
    }

    /// Replaces the random index picker, pinning result selection
    pub fn with_picker(mut self, picker: IndexPicker) -> Self {
        self.picker = picker;
        self
    }
}

#[async_trait]
impl ImageSource for UnsplashClient {
    async fn find_image(&self, query: &str) -> Option<String> {
        let access_key = match &self.access_key {
            Some(key) => key,
            None => {
                debug!("Image lookup disabled: no Unsplash access key configured");
                return None;
            }
        };
        if query.is_empty() {
            return None;
        }

        let response = match self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .query(&[("query", query), ("client_id", access_key.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!("Unsplash request failed: {}", error);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Unsplash API error: HTTP {}", response.status());
            return None;
        }

        let payload: SearchResponse = match response.json().await {
            Ok(payload) => payload,
            Err(error) => {
                warn!("Unsplash response was not valid JSON: {}", error);
                return None;
            }
        };

        let pool_size = payload.results.len().min(MAX_PICK_POOL);
        if pool_size == 0 {
            warn!("No Unsplash results for query: \"{}\"", query);
            return None;
        }

        let index = (self.picker)(pool_size);
        payload
            .results
            .get(index)
            .and_then(|result| result.urls.regular.clone())
    }
}

/// Builds an Unsplash search query from project metadata: the project
/// name, up to two relevant tags in tag order, and the fixed creative
/// suffix; hyphens become spaces and the result is capped at 100
/// characters.
pub fn build_image_query(name: &str, tags: &[String]) -> String {
    let mut query = name.to_string();

    let relevant = tags
        .iter()
        .filter(|tag| {
            let lowered = tag.to_lowercase();
            RELEVANT_TAGS.contains(&lowered.as_str())
        })
        .take(2);
    for tag in relevant {
        query.push(' ');
        query.push_str(tag);
    }

    query.push(' ');
    query.push_str(QUERY_SUFFIX);

    let query = query.replace('-', " ");
    query
        .chars()
        .take(MAX_QUERY_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}
