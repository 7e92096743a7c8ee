//! HTTP surface of the portfolio service.
//!
//! The router lives in the library so integration tests can drive it
//! directly; the server binary only binds and serves.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json as ResponseJson;
use axum::routing::{get, put};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::data::{seed_experience, seed_projects, social_links};
use crate::enrich::Enricher;
use crate::error::Result;
use crate::github::{GitHubClient, RepositoryHost};
use crate::models::{aggregate_tags, Experience, Project, SocialLinks};
use crate::store::FeaturedStore;
use crate::unsplash::{ImageSource, UnsplashClient};

/// Client-error body when the username parameter is missing.
pub const USERNAME_REQUIRED: &str = "Username is required";

/// Server-error body when the repository listing fails upstream.
pub const FETCH_FAILED: &str = "Failed to fetch repositories";

/// Header carrying the admin token for featured-status mutation.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Repository-hosting client
    pub host: Arc<dyn RepositoryHost>,
    /// Image-search client
    pub images: Arc<dyn ImageSource>,
    /// Featured-project registry
    pub featured: FeaturedStore,
    /// Service configuration
    pub config: Arc<Config>,
    /// Service start time for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Builds production state: real clients plus a featured store seeded
    /// from the sample projects.
    pub async fn new(config: Config) -> Result<Self> {
        let host = Arc::new(GitHubClient::new(&config)?);
        let images = Arc::new(UnsplashClient::new(&config)?);
        let featured = FeaturedStore::seeded_from(&seed_projects()).await;

        Ok(Self {
            host,
            images,
            featured,
            config: Arc::new(config),
            started_at: Utc::now(),
        })
    }
}

/// Query parameters of the projects read endpoint
#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    /// GitHub username whose repositories are listed
    pub username: Option<String>,
    /// `"true"` requests the enrichment-orchestrated list
    pub enhanced: Option<String>,
}

/// Body of the featured-status mutation endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct FeaturedUpdate {
    /// Desired featured flag
    pub featured: bool,
}

/// Fixed-message error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

/// Health check payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Current status
    pub status: String,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
    /// Service uptime in seconds
    pub uptime: u64,
}

/// Builds the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/sample", get(sample_projects))
        .route("/api/projects/:id/featured", put(set_featured))
        .route("/api/tags", get(list_tags))
        .route("/api/experience", get(list_experience))
        .route("/api/profile", get(profile))
        .route("/api/featured", get(featured_ids))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint: basic service information
async fn index() -> ResponseJson<Value> {
    ResponseJson(json!({
        "service": "devfolio",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "projects": "/api/projects?username={username}&enhanced={bool}",
            "sample": "/api/projects/sample",
            "experience": "/api/experience",
            "profile": "/api/profile"
        }
    }))
}

async fn health(State(state): State<AppState>) -> ResponseJson<HealthResponse> {
    let uptime = (Utc::now() - state.started_at).num_seconds().max(0) as u64;
    ResponseJson(HealthResponse {
        service: "devfolio".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "ok".to_string(),
        timestamp: Utc::now(),
        uptime,
    })
}

/// The projects read endpoint: the base list derived from the hosting
/// provider, or the enrichment-orchestrated list with `enhanced=true`.
async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectsQuery>,
) -> std::result::Result<ResponseJson<Vec<Project>>, (StatusCode, ResponseJson<ErrorBody>)> {
    let username = match query.username.as_deref().filter(|u| !u.is_empty()) {
        Some(username) => username,
        None => {
            return Err((
                StatusCode::BAD_REQUEST,
                ResponseJson(ErrorBody {
                    error: USERNAME_REQUIRED.to_string(),
                }),
            ));
        }
    };
    let enhanced = query.enhanced.as_deref() == Some("true");

    info!("Listing projects for {} (enhanced: {})", username, enhanced);

    let repos = match state.host.list_public_repositories(username).await {
        Ok(repos) => repos,
        Err(e) => {
            error!("Repository listing for {} failed: {}", username, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                ResponseJson(ErrorBody {
                    error: FETCH_FAILED.to_string(),
                }),
            ));
        }
    };

    let mut projects: Vec<Project> = repos.iter().map(Project::from_repository).collect();

    if enhanced {
        let enricher = Enricher::new(
            Arc::clone(&state.host),
            Arc::clone(&state.images),
            state.config.enrichment.max_concurrent,
        );
        projects = enricher.enrich_all(projects).await;
    }

    state.featured.apply(&mut projects).await;
    Ok(ResponseJson(projects))
}

/// The static sample projects, with featured overrides applied
async fn sample_projects(State(state): State<AppState>) -> ResponseJson<Vec<Project>> {
    let mut projects = seed_projects();
    state.featured.apply(&mut projects).await;
    ResponseJson(projects)
}

/// Filter-UI tag list: the sorted, deduplicated union of sample-project
/// tags, regardless of featured status
async fn list_tags() -> ResponseJson<Vec<String>> {
    ResponseJson(aggregate_tags(&seed_projects()))
}

async fn list_experience() -> ResponseJson<Vec<Experience>> {
    ResponseJson(seed_experience())
}

async fn profile() -> ResponseJson<SocialLinks> {
    ResponseJson(social_links())
}

async fn featured_ids(State(state): State<AppState>) -> ResponseJson<Vec<String>> {
    ResponseJson(state.featured.featured_ids().await)
}

/// Admin-gated featured-status mutation. 401 when no admin token is
/// configured or the header does not match; 204 on success.
async fn set_featured(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    axum::Json(update): axum::Json<FeaturedUpdate>,
) -> StatusCode {
    let configured = match &state.config.admin_token {
        Some(token) => token,
        None => return StatusCode::UNAUTHORIZED,
    };
    let presented = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented != Some(configured.as_str()) {
        return StatusCode::UNAUTHORIZED;
    }

    state.featured.set_featured(&id, update.featured).await;
    info!("Project {} featured set to {}", id, update.featured);
    StatusCode::NO_CONTENT
}
