use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed placeholder used until an image lookup supplies something better.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400.png";

/// Summary used when a repository carries no description.
pub const NO_DESCRIPTION_SUMMARY: &str = "No description provided.";

/// Metadata about a GitHub repository
///
/// Sourced verbatim from the hosting provider and immutable once fetched.
/// Missing optional fields are normalized by the repository client: empty
/// topic list, zero counts, fetch-time timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// Numeric repository identifier assigned by GitHub
    pub id: u64,
    /// Name of the repository
    pub name: String,
    /// Optional description of the repository
    pub description: Option<String>,
    /// Canonical browser URL of the repository
    pub html_url: String,
    /// Optional homepage / live-demo URL
    pub homepage: Option<String>,
    /// Topic strings attached to the repository
    pub topics: Vec<String>,
    /// Primary programming language, when GitHub reports one
    pub language: Option<String>,
    /// Number of GitHub stars
    pub stargazers_count: u64,
    /// Number of forks
    pub forks_count: u64,
    /// When the repository was created
    pub created_at: DateTime<Utc>,
    /// When the repository was last updated
    pub updated_at: DateTime<Utc>,
}

/// Three-level complexity label derived by the summary heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Small, low-engagement project
    Beginner,
    /// The common middle ground
    Intermediate,
    /// Popular, broadly-tagged project with a larger source tree
    Advanced,
}

/// Enriched summary derived from repository metadata, README text and
/// sampled source files. Recomputed per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedSummary {
    /// Prose summary assembled from the repository facts
    pub summary: String,
    /// Up to five feature strings parsed from the README
    pub key_features: Vec<String>,
    /// Deduplicated technology list (topics plus primary language)
    pub technologies: Vec<String>,
    /// Coarse complexity label
    pub complexity: Complexity,
}

/// A portfolio project entry
///
/// Created either from static seed data or derived from a
/// [`RepositoryMetadata`] record. The enrichment pipeline fills in the
/// optional summary fields; the featured flag is controlled server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier (stringified repository id, or a seed-data id)
    pub id: String,
    /// Project name
    pub name: String,
    /// Repository URL
    pub repo_url: String,
    /// Optional live-demo URL; absent when the upstream homepage is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// Summary text shown on the project card
    pub summary: String,
    /// Tag strings in insertion order
    pub tags: Vec<String>,
    /// Illustration image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether the project is featured on the portfolio front page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    /// Key features, present only on enriched records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_features: Option<Vec<String>>,
    /// Technology list, present only on enriched records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    /// Complexity label, present only on enriched records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
}

impl Project {
    /// Converts repository metadata into a base project record.
    ///
    /// Tags carry the topics in their original order followed by the
    /// primary language; duplicates are possible here and are only
    /// collapsed when tags are aggregated for filter UIs. An empty
    /// homepage string counts as absent, matching the upstream API
    /// which reports both `null` and `""`.
    pub fn from_repository(repo: &RepositoryMetadata) -> Self {
        let mut tags = repo.topics.clone();
        if let Some(language) = &repo.language {
            tags.push(language.clone());
        }

        Self {
            id: repo.id.to_string(),
            name: repo.name.clone(),
            repo_url: repo.html_url.clone(),
            live_url: repo
                .homepage
                .clone()
                .filter(|homepage| !homepage.is_empty()),
            summary: repo
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION_SUMMARY.to_string()),
            tags,
            image_url: Some(PLACEHOLDER_IMAGE_URL.to_string()),
            is_featured: Some(true),
            key_features: None,
            technologies: None,
            complexity: None,
        }
    }
}

/// A professional experience entry. Static seed data with no lifecycle
/// beyond initial load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Entry identifier
    pub id: String,
    /// Role title
    pub role: String,
    /// Employer name
    pub company: String,
    /// Optional employer website
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_url: Option<String>,
    /// Start of the engagement, e.g. "Jan 2021"
    pub start_date: String,
    /// End of the engagement; absent means ongoing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Description bullet strings, in display order
    pub description: Vec<String>,
    /// Skill strings, in display order
    pub skills: Vec<String>,
}

/// Contact links for the portfolio owner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    /// GitHub profile URL
    pub github: String,
    /// LinkedIn profile URL
    pub linkedin: String,
    /// Phone number in display form
    pub phone_number: String,
}

/// Sorted, deduplicated union of tags across a set of projects, used to
/// populate filter UIs.
pub fn aggregate_tags(projects: &[Project]) -> Vec<String> {
    let mut tags: Vec<String> = projects
        .iter()
        .flat_map(|project| project.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample_repo() -> RepositoryMetadata {
        RepositoryMetadata {
            id: 42,
            name: "weather-cli".into(),
            description: Some("A weather CLI".into()),
            html_url: "https://github.com/octocat/weather-cli".into(),
            homepage: None,
            topics: vec!["cli".into(), "weather".into()],
            language: Some("Rust".into()),
            stargazers_count: 12,
            forks_count: 3,
            created_at: Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_from_repository_maps_fields() {
        let project = Project::from_repository(&sample_repo());

        assert_eq!(project.id, "42");
        assert_eq!(project.name, "weather-cli");
        assert_eq!(project.repo_url, "https://github.com/octocat/weather-cli");
        assert_eq!(project.summary, "A weather CLI");
        assert_eq!(project.tags, vec!["cli", "weather", "Rust"]);
        assert_eq!(project.image_url.as_deref(), Some(PLACEHOLDER_IMAGE_URL));
        assert_eq!(project.is_featured, Some(true));
        assert!(project.key_features.is_none());
    }

    #[test]
    fn test_missing_homepage_is_absent_not_empty() {
        let project = Project::from_repository(&sample_repo());
        assert_eq!(project.live_url, None);

        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("liveUrl").is_none());
    }

    #[test]
    fn test_empty_homepage_counts_as_absent() {
        let mut repo = sample_repo();
        repo.homepage = Some(String::new());
        let project = Project::from_repository(&repo);
        assert_eq!(project.live_url, None);
    }

    #[test]
    fn test_missing_description_gets_fallback_summary() {
        let mut repo = sample_repo();
        repo.description = None;
        let project = Project::from_repository(&repo);
        assert_eq!(project.summary, NO_DESCRIPTION_SUMMARY);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let project = Project::from_repository(&sample_repo());
        let json = serde_json::to_value(&project).unwrap();

        assert!(json.get("repoUrl").is_some());
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("isFeatured").is_some());
    }

    #[test]
    fn test_aggregate_tags_sorted_unique() {
        let mut first = Project::from_repository(&sample_repo());
        first.tags = vec!["Rust".into(), "cli".into()];
        let mut second = first.clone();
        second.tags = vec!["cli".into(), "api".into()];

        assert_eq!(
            aggregate_tags(&[first, second]),
            vec!["Rust".to_string(), "api".into(), "cli".into()]
        );
    }

    #[test]
    fn test_complexity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Complexity::Advanced).unwrap(),
            "\"advanced\""
        );
    }
}
