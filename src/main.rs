use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use devfolio::data::{seed_experience, seed_projects, social_links};
use devfolio::enrich::Enricher;
use devfolio::models::Project;
use devfolio::unsplash::ImageSource;
use devfolio::{Config, GitHubClient, RepositoryHost, UnsplashClient};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a user's public projects and print them as JSON
    Projects {
        /// GitHub username to list repositories for
        #[arg(short, long)]
        username: String,

        /// Run the enrichment pipeline (summaries, features, images)
        #[arg(short, long)]
        enhanced: bool,
    },
    /// Check the configured image-search credentials with a test query
    ProbeImage {
        /// Search query to probe with
        #[arg(short, long, default_value = "a computer")]
        query: String,
    },
    /// Print the static seed data as JSON
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    devfolio::logging::init(&cli.log_level)?;

    let config = Config::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    match cli.command {
        Command::Projects { username, enhanced } => {
            fetch_projects(&config, &username, enhanced).await?;
        }
        Command::ProbeImage { query } => {
            probe_image(&config, &query).await?;
        }
        Command::Seed => {
            let payload = serde_json::json!({
                "projects": seed_projects(),
                "experience": seed_experience(),
                "socialLinks": social_links(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

async fn fetch_projects(config: &Config, username: &str, enhanced: bool) -> anyhow::Result<()> {
    let spinner = make_spinner(&format!("Fetching repositories for {}...", username));

    let host = Arc::new(GitHubClient::new(config)?);
    let repos = host
        .list_public_repositories(username)
        .await
        .context("repository listing failed")?;
    let mut projects: Vec<Project> = repos.iter().map(Project::from_repository).collect();

    if enhanced {
        spinner.set_message(format!("Enriching {} projects...", projects.len()));
        let images = Arc::new(UnsplashClient::new(config)?);
        let enricher = Enricher::new(host, images, config.enrichment.max_concurrent);
        projects = enricher.enrich_all(projects).await;
    }

    spinner.finish_and_clear();
    eprintln!(
        "{} {} projects for {}",
        "Fetched".green().bold(),
        projects.len(),
        username.bold()
    );
    println!("{}", serde_json::to_string_pretty(&projects)?);
    Ok(())
}

async fn probe_image(config: &Config, query: &str) -> anyhow::Result<()> {
    if config.unsplash_access_key.is_none() {
        eprintln!(
            "{} UNSPLASH_ACCESS_KEY is not configured; image lookup is disabled",
            "warning:".yellow().bold()
        );
        return Ok(());
    }

    let spinner = make_spinner("Querying Unsplash...");
    let client = UnsplashClient::new(config)?;
    let result = client.find_image(query).await;
    spinner.finish_and_clear();

    match result {
        Some(url) => println!("{} {}", "Image found:".green().bold(), url),
        None => println!("{} no image for query \"{}\"", "No result:".yellow(), query),
    }
    Ok(())
}

fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}
