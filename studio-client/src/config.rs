use std::path::PathBuf;

/// Client configuration, read from the environment (or a .env file loaded
/// by the binary before this runs).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the studio API, including the `/api` prefix.
    pub api_url: String,
    /// Location of the persisted credential.
    pub token_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_url = std::env::var("STUDIO_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());

        let token_path = std::env::var("STUDIO_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".studio/token"));

        Self { api_url, token_path }
    }
}
