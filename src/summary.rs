//! Rule-based project summarization.
//!
//! Derives a prose summary, key features, a technology list and a coarse
//! complexity label from repository facts, README text and sampled source
//! files. Fully deterministic: fixed thresholds, fixed sentences, no
//! model calls.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Complexity, EnrichedSummary, RepositoryMetadata};

/// Features shown when a README is absent or holds no recognizable
/// feature section.
pub const DEFAULT_KEY_FEATURES: [&str; 2] =
    ["Source code available on GitHub", "Open to contributions"];

/// Key-feature lists are truncated to this many items.
pub const MAX_KEY_FEATURES: usize = 5;

const README_PRESENT_SENTENCE: &str = "The project includes README documentation.";
const README_ABSENT_SENTENCE: &str = "No README documentation is available.";

const STAR_THRESHOLD: u64 = 100;
const TOPIC_THRESHOLD: usize = 5;
const SAMPLE_FILE_THRESHOLD: usize = 10;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").expect("heading pattern"));
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*]|\d+[.)])\s+(.*)$").expect("bullet pattern"));

/// The repository facts the summarizer consumes.
///
/// Either taken straight from [`RepositoryMetadata`] or rebuilt from a
/// project record by the enrichment orchestrator.
#[derive(Debug, Clone)]
pub struct RepoFacts {
    /// Repository name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Primary language, when known
    pub language: Option<String>,
    /// Topic strings
    pub topics: Vec<String>,
    /// Star count
    pub stargazers_count: u64,
    /// Fork count
    pub forks_count: u64,
}

impl From<&RepositoryMetadata> for RepoFacts {
    fn from(repo: &RepositoryMetadata) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            topics: repo.topics.clone(),
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
        }
    }
}

/// Derives an [`EnrichedSummary`] from repository facts, optional README
/// text and optional sampled source files.
pub fn summarize(
    facts: &RepoFacts,
    readme: Option<&str>,
    code_files: Option<&[String]>,
) -> EnrichedSummary {
    let technologies = technologies(facts);

    let mut fragments: Vec<String> = Vec::new();
    fragments.push(description_fragment(facts));
    fragments.push(
        if readme.is_some() {
            README_PRESENT_SENTENCE
        } else {
            README_ABSENT_SENTENCE
        }
        .to_string(),
    );
    if !technologies.is_empty() {
        fragments.push(format!("Built with {}.", technologies.join(", ")));
    }
    if facts.stargazers_count > 0 {
        fragments.push(format!(
            "It has earned {} stars on GitHub.",
            facts.stargazers_count
        ));
    }

    let summary = fragments
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    EnrichedSummary {
        summary,
        key_features: key_features(readme),
        complexity: complexity(
            facts.stargazers_count,
            facts.topics.len(),
            code_files.map(<[String]>::len),
        ),
        technologies,
    }
}

fn description_fragment(facts: &RepoFacts) -> String {
    match facts.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => description.to_string(),
        None => match &facts.language {
            Some(language) => format!("A {} project.", language),
            None => "A software project.".to_string(),
        },
    }
}

/// Union of topic tags and the primary language, deduplicated by first
/// occurrence.
pub fn technologies(facts: &RepoFacts) -> Vec<String> {
    let mut technologies: Vec<String> = Vec::new();
    for candidate in facts.topics.iter().chain(facts.language.as_ref()) {
        if !technologies.contains(candidate) {
            technologies.push(candidate.clone());
        }
    }
    technologies
}

/// Parses feature bullets from README sections headed (case-insensitively)
/// "Features" or "Key Features" at heading level 2 or 3. Falls back to the
/// fixed defaults; always at most [`MAX_KEY_FEATURES`] items.
pub fn key_features(readme: Option<&str>) -> Vec<String> {
    let mut features = readme.map(parse_feature_sections).unwrap_or_default();
    if features.is_empty() {
        features = DEFAULT_KEY_FEATURES.iter().map(|s| s.to_string()).collect();
    }
    features.truncate(MAX_KEY_FEATURES);
    features
}

fn parse_feature_sections(readme: &str) -> Vec<String> {
    let mut features = Vec::new();
    // Level of the feature section currently being captured, if any
    let mut capturing_level: Option<usize> = None;

    for line in readme.lines() {
        if let Some(caps) = HEADING_RE.captures(line) {
            let level = caps[1].len();
            if let Some(section_level) = capturing_level {
                // A heading of equal-or-higher level ends the section
                if level <= section_level {
                    capturing_level = None;
                }
            }
            if capturing_level.is_none() && is_feature_heading(level, &caps[2]) {
                capturing_level = Some(level);
            }
            continue;
        }

        if capturing_level.is_some() {
            if let Some(caps) = BULLET_RE.captures(line.trim_start()) {
                let item = caps[1].trim();
                if !item.is_empty() {
                    features.push(item.to_string());
                }
            }
        }
    }

    features
}

fn is_feature_heading(level: usize, title: &str) -> bool {
    if !(2..=3).contains(&level) {
        return false;
    }
    let title = title.trim().trim_end_matches('#').trim();
    title.eq_ignore_ascii_case("features") || title.eq_ignore_ascii_case("key features")
}

/// Scores complexity from three independent factors: stars over 100,
/// topics over 5, and sampled source files over 10 each contribute 2,
/// otherwise 1. Missing sample data counts as zero files.
pub fn complexity(stars: u64, topic_count: usize, sample_file_count: Option<usize>) -> Complexity {
    let files = sample_file_count.unwrap_or(0);

    let star_score = if stars > STAR_THRESHOLD { 2 } else { 1 };
    let topic_score = if topic_count > TOPIC_THRESHOLD { 2 } else { 1 };
    let file_score = if files > SAMPLE_FILE_THRESHOLD { 2 } else { 1 };

    match star_score + topic_score + file_score {
        score if score >= 5 => Complexity::Advanced,
        score if score > 3 => Complexity::Intermediate,
        _ => Complexity::Beginner,
    }
}
