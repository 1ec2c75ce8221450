use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base url of the identity provider REST surface
    pub identity_api_base_url: String,
    /// Web API key passed to the identity provider on every call
    pub identity_api_key: String,
    /// Base url of the application backend
    pub backend_api_base_url: String,
}

impl Config {
    pub fn new() -> Self {
        let identity_api_base_url = env_or("IDENTITY_API_BASE_URL", "http://localhost:9099/v1");
        let identity_api_key = env_or("IDENTITY_API_KEY", "dev-api-key");
        let backend_api_base_url = env_or("BACKEND_API_BASE_URL", "http://localhost:5152/api");

        Self {
            identity_api_base_url,
            identity_api_key,
            backend_api_base_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_or(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(value) => value,
        Err(_) => {
            info!(
                "Did not find {} environment variable. Falling back to: {}",
                var, default
            );
            default.to_string()
        }
    }
}
