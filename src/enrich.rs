use std::sync::Arc;

use log::{debug, info};
use url::Url;

use crate::error::{PortfolioError, Result};
use crate::github::RepositoryHost;
use crate::models::Project;
use crate::parallel::FanOut;
use crate::summary::{summarize, RepoFacts};
use crate::unsplash::{build_image_query, ImageSource};

/// Languages recognized when rebuilding repository facts from a project's
/// tag list: the first matching tag becomes the primary language, the
/// rest of the tags become topics.
const KNOWN_LANGUAGES: &[&str] = &["JavaScript", "TypeScript", "Python", "Java", "C++", "Go"];

/// Enriches base project records with summaries, key features,
/// technologies, complexity and an illustration image.
///
/// Every per-project pipeline is independent and failure-isolated: one
/// project failing drops that project from the output without affecting
/// the rest.
pub struct Enricher {
    host: Arc<dyn RepositoryHost>,
    images: Arc<dyn ImageSource>,
    fan_out: FanOut,
}

impl Enricher {
    /// Creates an enricher over the injected clients
    pub fn new(
        host: Arc<dyn RepositoryHost>,
        images: Arc<dyn ImageSource>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            host,
            images,
            fan_out: FanOut::new(max_concurrent),
        }
    }

    /// Enriches each project independently and returns the successful
    /// results; failed projects are logged and excluded.
    pub async fn enrich_all(&self, projects: Vec<Project>) -> Vec<Project> {
        let total = projects.len();
        let tasks: Vec<_> = projects
            .into_iter()
            .map(|project| enrich_one(Arc::clone(&self.host), Arc::clone(&self.images), project))
            .collect();

        let enriched = self.fan_out.collect_successes("enrichment", tasks).await;
        info!("Enriched {}/{} projects", enriched.len(), total);
        enriched
    }
}

async fn enrich_one(
    host: Arc<dyn RepositoryHost>,
    images: Arc<dyn ImageSource>,
    project: Project,
) -> Result<Project> {
    let (owner, repo) = parse_owner_repo(&project.repo_url)?;
    debug!("Enriching {}/{}", owner, repo);

    let (readme, code_files) = tokio::join!(
        host.fetch_readme(&owner, &repo),
        host.fetch_sample_source_files(&owner, &repo),
    );

    let facts = facts_from_project(&project);
    let code_files = if code_files.is_empty() {
        None
    } else {
        Some(code_files.as_slice())
    };
    let enriched = summarize(&facts, readme.as_deref(), code_files);

    let query = build_image_query(&project.name, &project.tags);
    let image_url = images.find_image(&query).await;

    let mut project = project;
    project.summary = enriched.summary;
    project.key_features = Some(enriched.key_features);
    project.technologies = Some(enriched.technologies);
    project.complexity = Some(enriched.complexity);
    if let Some(url) = image_url {
        project.image_url = Some(url);
    }
    Ok(project)
}

/// Extracts the `owner/repo` pair from a repository URL: the first two
/// path segments. Anything else is malformed and fails the project's
/// enrichment.
pub fn parse_owner_repo(repo_url: &str) -> Result<(String, String)> {
    let parsed = Url::parse(repo_url)
        .map_err(|_| PortfolioError::Enrichment(format!("invalid repository URL: {}", repo_url)))?;

    let mut segments = parsed
        .path_segments()
        .ok_or_else(|| {
            PortfolioError::Enrichment(format!("repository URL has no path: {}", repo_url))
        })?
        .filter(|segment| !segment.is_empty());

    match (segments.next(), segments.next()) {
        (Some(owner), Some(repo)) => Ok((owner.to_string(), repo.to_string())),
        _ => Err(PortfolioError::Enrichment(format!(
            "cannot parse owner/repo from: {}",
            repo_url
        ))),
    }
}

/// Rebuilds summarizer facts from a base project record: the first tag
/// that names a known language becomes the primary language, every
/// non-language tag becomes a topic, counts start at zero.
fn facts_from_project(project: &Project) -> RepoFacts {
    let language = project
        .tags
        .iter()
        .find(|tag| KNOWN_LANGUAGES.contains(&tag.as_str()))
        .cloned();
    let topics = project
        .tags
        .iter()
        .filter(|tag| !KNOWN_LANGUAGES.contains(&tag.as_str()))
        .cloned()
        .collect();

    RepoFacts {
        name: project.name.clone(),
        description: Some(project.summary.clone()),
        language,
        topics,
        stargazers_count: 0,
        forks_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Complexity;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct StubHost {
        readme: Option<String>,
        files: Vec<String>,
    }

    #[async_trait]
    impl RepositoryHost for StubHost {
        async fn list_public_repositories(
            &self,
            _username: &str,
        ) -> Result<Vec<crate::models::RepositoryMetadata>> {
            Ok(Vec::new())
        }

        async fn fetch_readme(&self, _owner: &str, _repo: &str) -> Option<String> {
            self.readme.clone()
        }

        async fn fetch_sample_source_files(&self, _owner: &str, _repo: &str) -> Vec<String> {
            self.files.clone()
        }
    }

    struct FixedImages(Option<String>);

    #[async_trait]
    impl ImageSource for FixedImages {
        async fn find_image(&self, _query: &str) -> Option<String> {
            self.0.clone()
        }
    }

    fn project(id: &str, repo_url: &str) -> Project {
        Project {
            id: id.into(),
            name: format!("project-{}", id),
            repo_url: repo_url.into(),
            live_url: None,
            summary: "A sample project.".into(),
            tags: vec!["api".into(), "TypeScript".into()],
            image_url: Some("https://placehold.co/600x400.png".into()),
            is_featured: Some(true),
            key_features: None,
            technologies: None,
            complexity: None,
        }
    }

    fn enricher(host: StubHost, images: FixedImages) -> Enricher {
        Enricher::new(Arc::new(host), Arc::new(images), 4)
    }

    #[test]
    fn test_parse_owner_repo() {
        let (owner, repo) = parse_owner_repo("https://github.com/octocat/hello-world").unwrap();
        assert_eq!(owner, "octocat");
        assert_eq!(repo, "hello-world");

        assert!(parse_owner_repo("https://github.com/justowner").is_err());
        assert!(parse_owner_repo("not a url").is_err());
    }

    #[test]
    fn test_facts_from_project_splits_language_and_topics() {
        let facts = facts_from_project(&project("1", "https://github.com/u/r"));
        assert_eq!(facts.language.as_deref(), Some("TypeScript"));
        assert_eq!(facts.topics, vec!["api".to_string()]);
        assert_eq!(facts.stargazers_count, 0);
    }

    #[tokio::test]
    async fn test_malformed_url_drops_only_that_project() {
        let enricher = enricher(
            StubHost {
                readme: None,
                files: Vec::new(),
            },
            FixedImages(None),
        );

        let projects = vec![
            project("1", "https://github.com/u/alpha"),
            project("2", "https://github.com/nowhere"),
            project("3", "https://github.com/u/gamma"),
        ];

        let enriched = enricher.enrich_all(projects).await;
        let ids: Vec<&str> = enriched.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_enrichment_fills_summary_fields() {
        let enricher = enricher(
            StubHost {
                readme: Some("## Features\n- Fast\n- Small\n".into()),
                files: vec!["fn main() {}".into()],
            },
            FixedImages(None),
        );

        let enriched = enricher
            .enrich_all(vec![project("1", "https://github.com/u/alpha")])
            .await;

        assert_eq!(enriched.len(), 1);
        let result = &enriched[0];
        assert_eq!(
            result.key_features.as_deref(),
            Some(&["Fast".to_string(), "Small".into()][..])
        );
        assert_eq!(
            result.technologies.as_deref(),
            Some(&["api".to_string(), "TypeScript".into()][..])
        );
        assert_eq!(result.complexity, Some(Complexity::Beginner));
    }

    #[tokio::test]
    async fn test_image_lookup_none_keeps_prior_image() {
        let enricher = enricher(
            StubHost {
                readme: None,
                files: Vec::new(),
            },
            FixedImages(None),
        );

        let enriched = enricher
            .enrich_all(vec![project("1", "https://github.com/u/alpha")])
            .await;
        assert_eq!(
            enriched[0].image_url.as_deref(),
            Some("https://placehold.co/600x400.png")
        );
    }

    #[tokio::test]
    async fn test_image_lookup_replaces_placeholder() {
        let enricher = enricher(
            StubHost {
                readme: None,
                files: Vec::new(),
            },
            FixedImages(Some("https://images.example/photo.jpg".into())),
        );

        let enriched = enricher
            .enrich_all(vec![project("1", "https://github.com/u/alpha")])
            .await;
        assert_eq!(
            enriched[0].image_url.as_deref(),
            Some("https://images.example/photo.jpg")
        );
    }
}
