#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! devfolio - portfolio backend service
//!
//! Lists a developer's public GitHub repositories, enriches them with
//! rule-derived summaries, key features, technology lists, a complexity
//! label and a candidate illustration image, and serves portfolio data
//! (projects, experience, contact links) over HTTP.

/// HTTP routes, handlers and shared application state
pub mod api;
/// Configuration loaded from environment and optional TOML file
pub mod config;
/// Static seed data: sample projects, experience, contact links
pub mod data;
/// Project enrichment orchestration
pub mod enrich;
/// Error handling types and utilities
pub mod error;
/// GitHub REST API client
pub mod github;
/// CLI logging configuration
pub mod logging;
/// Core data model
pub mod models;
/// Bounded fan-out-and-collect helper
pub mod parallel;
/// Server-side featured-project registry
pub mod store;
/// Rule-based project summarization
pub mod summary;
/// Unsplash image lookup client
pub mod unsplash;

// Re-export common types
pub use config::Config;
pub use enrich::Enricher;
pub use error::{PortfolioError, Result};
pub use github::{GitHubClient, RepositoryHost};
pub use models::{Complexity, EnrichedSummary, Experience, Project, RepositoryMetadata};
pub use store::FeaturedStore;
pub use unsplash::{ImageSource, UnsplashClient};
