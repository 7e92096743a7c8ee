use devfolio::api::{router, AppState};
use devfolio::Config;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::load()?;
    config.validate()?;

    let bind_address = config.bind_address.clone();
    let github_configured = config.github_token.is_some();
    let images_configured = config.unsplash_access_key.is_some();

    let state = AppState::new(config).await?;
    let app = router(state);

    info!("devfolio server starting");
    info!("GitHub token configured: {}", github_configured);
    info!("Image lookup enabled: {}", images_configured);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
