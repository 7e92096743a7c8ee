use devfolio::Config;

pub mod test_helpers {
    use super::*;

    /// Starts a mock HTTP server standing in for the upstream APIs
    pub async fn setup_test_server() -> mockito::ServerGuard {
        mockito::Server::new_async().await
    }

    /// A configuration with both upstream base URLs pointed at the mock
    /// server
    pub fn config_for(server: &mockito::ServerGuard) -> Config {
        let mut config = Config::default();
        config.github_api_base = server.url();
        config.unsplash_api_base = server.url();
        config
    }

    pub fn setup_test_logger() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }
}
