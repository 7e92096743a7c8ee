//! Server-side featured-project registry.
//!
//! Featured status lives with the service rather than in each visitor's
//! browser, so every client sees the same curation and the read endpoints
//! can report it directly.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::Project;

/// Shared registry of explicit featured/unfeatured overrides keyed by
/// project id. Projects without an entry keep whatever flag they carried.
#[derive(Clone, Default)]
pub struct FeaturedStore {
    overrides: Arc<RwLock<HashMap<String, bool>>>,
}

impl FeaturedStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded from the flags already present on the given
    /// projects
    pub async fn seeded_from(projects: &[Project]) -> Self {
        let store = Self::new();
        {
            let mut overrides = store.overrides.write().await;
            for project in projects {
                if let Some(featured) = project.is_featured {
                    overrides.insert(project.id.clone(), featured);
                }
            }
        }
        store
    }

    /// Records an explicit featured flag for a project id
    pub async fn set_featured(&self, id: &str, featured: bool) {
        self.overrides.write().await.insert(id.to_string(), featured);
    }

    /// Ids currently marked featured, sorted for stable output
    pub async fn featured_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .overrides
            .read()
            .await
            .iter()
            .filter(|(_, featured)| **featured)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Applies stored overrides onto a project list
    pub async fn apply(&self, projects: &mut [Project]) {
        let overrides = self.overrides.read().await;
        for project in projects.iter_mut() {
            if let Some(featured) = overrides.get(&project.id) {
                project.is_featured = Some(*featured);
            }
        }
    }
}
