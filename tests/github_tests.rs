use devfolio::github::GitHubClient;
use devfolio::models::Project;
use devfolio::{PortfolioError, RepositoryHost};
use mockito::Matcher;
use pretty_assertions::assert_eq;

mod common;
use common::test_helpers::*;

fn repo_listing_body() -> String {
    serde_json::json!([
        {
            "id": 101,
            "name": "public-repo",
            "description": "A public repository",
            "html_url": "https://github.com/octocat/public-repo",
            "homepage": null,
            "topics": ["cli", "tools"],
            "language": "Rust",
            "stargazers_count": 42,
            "forks_count": 7,
            "created_at": "2023-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "private": false
        },
        {
            "id": 102,
            "name": "secret-repo",
            "html_url": "https://github.com/octocat/secret-repo",
            "private": true
        },
        {
            "id": 103,
            "name": "bare-repo",
            "html_url": "https://github.com/octocat/bare-repo",
            "homepage": "",
            "private": false
        }
    ])
    .to_string()
}

#[tokio::test]
async fn test_list_public_repositories_filters_and_defaults() {
    setup_test_logger();
    let mut server = setup_test_server().await;
    let mock = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repo_listing_body())
        .create_async()
        .await;

    let client = GitHubClient::new(&config_for(&server)).unwrap();
    let repos = client.list_public_repositories("octocat").await.unwrap();

    mock.assert_async().await;
    assert_eq!(repos.len(), 2, "private repositories are excluded");

    assert_eq!(repos[0].name, "public-repo");
    assert_eq!(repos[0].topics, vec!["cli".to_string(), "tools".into()]);
    assert_eq!(repos[0].stargazers_count, 42);

    // Missing fields get safe defaults
    assert_eq!(repos[1].name, "bare-repo");
    assert_eq!(repos[1].topics, Vec::<String>::new());
    assert_eq!(repos[1].stargazers_count, 0);
    assert_eq!(repos[1].language, None);
}

#[tokio::test]
async fn test_empty_homepage_converts_to_absent_live_url() {
    let mut server = setup_test_server().await;
    let _mock = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repo_listing_body())
        .create_async()
        .await;

    let client = GitHubClient::new(&config_for(&server)).unwrap();
    let repos = client.list_public_repositories("octocat").await.unwrap();

    let project = Project::from_repository(&repos[1]);
    assert_eq!(project.live_url, None);
    let json = serde_json::to_value(&project).unwrap();
    assert!(json.get("liveUrl").is_none());
}

#[tokio::test]
async fn test_listing_failure_is_an_error() {
    setup_test_logger();
    let mut server = setup_test_server().await;
    let _mock = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let client = GitHubClient::new(&config_for(&server)).unwrap();
    let result = client.list_public_repositories("octocat").await;
    assert!(matches!(result, Err(PortfolioError::GitHubApi(_))));
}

#[tokio::test]
async fn test_fetch_readme_decodes_base64() {
    let mut server = setup_test_server().await;
    // "# Hello\n" base64-encoded with the line wrapping GitHub applies
    let _mock = server
        .mock("GET", "/repos/octocat/public-repo/readme")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "content": "IyBI\nZWxs\nbwo=\n",
                "encoding": "base64"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = GitHubClient::new(&config_for(&server)).unwrap();
    let readme = client.fetch_readme("octocat", "public-repo").await;
    assert_eq!(readme.as_deref(), Some("# Hello\n"));
}

#[tokio::test]
async fn test_missing_readme_is_none_not_error() {
    setup_test_logger();
    let mut server = setup_test_server().await;
    let _mock = server
        .mock("GET", "/repos/octocat/no-readme/readme")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.fetch_readme("octocat", "no-readme").await, None);
}

#[tokio::test]
async fn test_fetch_sample_source_files() {
    setup_test_logger();
    let mut server = setup_test_server().await;
    let base = server.url();

    let _listing = server
        .mock("GET", "/repos/octocat/public-repo/contents/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!([
                {"name": "main.ts", "download_url": format!("{}/raw/main.ts", base)},
                {"name": ".eslintrc.js", "download_url": format!("{}/raw/eslintrc", base)},
                {"name": "README.md", "download_url": format!("{}/raw/readme", base)},
                {"name": "app.py", "download_url": format!("{}/raw/app.py", base)},
                {"name": "broken.go", "download_url": format!("{}/raw/broken.go", base)}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let _main_ts = server
        .mock("GET", "/raw/main.ts")
        .with_status(200)
        .with_body("console.log('hi');")
        .create_async()
        .await;
    let _app_py = server
        .mock("GET", "/raw/app.py")
        .with_status(200)
        .with_body("print('hi')")
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/raw/broken.go")
        .with_status(500)
        .create_async()
        .await;

    let client = GitHubClient::new(&config_for(&server)).unwrap();
    let files = client
        .fetch_sample_source_files("octocat", "public-repo")
        .await;

    // Hidden and non-source entries are skipped; the failed download is
    // dropped without failing the rest
    assert_eq!(
        files,
        vec!["console.log('hi');".to_string(), "print('hi')".into()]
    );
}

#[tokio::test]
async fn test_sample_files_empty_on_listing_failure() {
    setup_test_logger();
    let mut server = setup_test_server().await;
    let _mock = server
        .mock("GET", "/repos/octocat/public-repo/contents/")
        .with_status(403)
        .create_async()
        .await;

    let client = GitHubClient::new(&config_for(&server)).unwrap();
    let files = client
        .fetch_sample_source_files("octocat", "public-repo")
        .await;
    assert!(files.is_empty());
}
