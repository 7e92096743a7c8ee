//! Static seed data: sample projects, experience entries and contact
//! links served when no live GitHub data is wanted.

use crate::models::{Experience, Project, SocialLinks, PLACEHOLDER_IMAGE_URL};

/// Sample projects shown before a GitHub username is configured.
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".into(),
            name: "E-commerce Platform".into(),
            repo_url: "https://github.com/camiloerazo/ecommerce-platform".into(),
            live_url: Some("https://ecommerce.example.com".into()),
            summary: "A full-featured e-commerce platform with product listings, cart \
                      functionality, and user authentication backed by PostgreSQL."
                .into(),
            tags: vec![
                "Next.js".into(),
                "React".into(),
                "TypeScript".into(),
                "Stripe".into(),
                "PostgreSQL".into(),
            ],
            image_url: Some(PLACEHOLDER_IMAGE_URL.into()),
            is_featured: Some(true),
            key_features: None,
            technologies: None,
            complexity: None,
        },
        Project {
            id: "2".into(),
            name: "Task Management App".into(),
            repo_url: "https://github.com/camiloerazo/task-manager".into(),
            live_url: None,
            summary: "A collaborative task manager with real-time updates, drag-and-drop \
                      boards and task assignments."
                .into(),
            tags: vec!["React".into(), "Firebase".into(), "JavaScript".into()],
            image_url: Some(PLACEHOLDER_IMAGE_URL.into()),
            is_featured: Some(true),
            key_features: None,
            technologies: None,
            complexity: None,
        },
        Project {
            id: "3".into(),
            name: "Personal Portfolio Website".into(),
            repo_url: "https://github.com/camiloerazo/portfolio-v2".into(),
            live_url: Some("https://portfolio.example.com".into()),
            summary: "This very portfolio, focused on a clean and modern UI with live \
                      GitHub project data."
                .into(),
            tags: vec!["Next.js".into(), "TypeScript".into(), "Tailwind CSS".into()],
            image_url: Some(PLACEHOLDER_IMAGE_URL.into()),
            is_featured: Some(false),
            key_features: None,
            technologies: None,
            complexity: None,
        },
        Project {
            id: "4".into(),
            name: "AI Powered Blog Summarizer".into(),
            repo_url: "https://github.com/camiloerazo/ai-blog-summarizer".into(),
            live_url: None,
            summary: "Generates concise summaries of blog posts from URLs using a \
                      third-party language-model API."
                .into(),
            tags: vec!["Python".into(), "Flask".into(), "AI".into(), "NLP".into()],
            image_url: Some(PLACEHOLDER_IMAGE_URL.into()),
            is_featured: Some(true),
            key_features: None,
            technologies: None,
            complexity: None,
        },
    ]
}

/// Professional experience entries for the experience section.
pub fn seed_experience() -> Vec<Experience> {
    vec![
        Experience {
            id: "1".into(),
            role: "Senior Frontend Developer".into(),
            company: "Tech Solutions Inc.".into(),
            company_url: Some("https://techsolutions.example.com".into()),
            start_date: "Jan 2021".into(),
            end_date: None,
            description: vec![
                "Led the development of a new client-facing dashboard, improving user \
                 engagement by 25%."
                    .into(),
                "Mentored junior developers and conducted code reviews.".into(),
                "Collaborated with designers and backend teams to deliver responsive web \
                 applications."
                    .into(),
            ],
            skills: vec![
                "React".into(),
                "TypeScript".into(),
                "Next.js".into(),
                "GraphQL".into(),
            ],
        },
        Experience {
            id: "2".into(),
            role: "Software Engineer".into(),
            company: "Innovatech Ltd.".into(),
            company_url: Some("https://innovatech.example.com".into()),
            start_date: "Jun 2018".into(),
            end_date: Some("Dec 2020".into()),
            description: vec![
                "Developed and maintained features for a SaaS product used by over 10,000 \
                 customers."
                    .into(),
                "Participated in the full development lifecycle, from requirements to \
                 deployment."
                    .into(),
                "Optimized application performance, reducing load times by 15%.".into(),
            ],
            skills: vec![
                "JavaScript".into(),
                "Vue.js".into(),
                "Node.js".into(),
                "MongoDB".into(),
            ],
        },
    ]
}

/// Contact links for the contact section.
pub fn social_links() -> SocialLinks {
    SocialLinks {
        github: "https://github.com/camiloerazo".into(),
        linkedin: "https://www.linkedin.com/in/camiloerazo1".into(),
        phone_number: "+57-312-216-55-33".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::aggregate_tags;

    #[test]
    fn test_seed_projects_have_unique_ids() {
        let projects = seed_projects();
        let mut ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), projects.len());
    }

    #[test]
    fn test_seed_tags_aggregate_without_duplicates() {
        let tags = aggregate_tags(&seed_projects());
        let mut deduped = tags.clone();
        deduped.dedup();
        assert_eq!(tags, deduped);
        assert!(tags.contains(&"TypeScript".to_string()));
    }

    #[test]
    fn test_ongoing_experience_has_no_end_date() {
        let experience = seed_experience();
        assert_eq!(experience[0].end_date, None);
        assert!(experience[1].end_date.is_some());
    }
}
