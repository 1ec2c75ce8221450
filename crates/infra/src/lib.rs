mod config;
mod providers;

pub use config::Config;
pub use providers::{
    CreateProfileRequest, CreateProfileResponse, IIdentityProvider, IProfileApi,
    InMemoryIdentityProvider, InMemoryProfileApi, Providers, RestIdentityProvider, RestProfileApi,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct GharbhadaContext {
    pub providers: Providers,
    pub config: Config,
}

impl GharbhadaContext {
    /// Context backed by the live REST collaborators, configured from
    /// the environment.
    pub fn create_rest() -> Self {
        let config = Config::new();
        Self {
            providers: Providers::create_rest(&config),
            config,
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            providers: Providers::create_inmemory(),
            config: Config::new(),
        }
    }

    /// Context over caller-supplied providers. Tests use this to keep a
    /// concrete handle on the fakes for counters and failure knobs.
    pub fn with_providers(
        identity: Arc<dyn IIdentityProvider>,
        backend: Arc<dyn IProfileApi>,
    ) -> Self {
        Self {
            providers: Providers { identity, backend },
            config: Config::new(),
        }
    }
}

/// Hermetic in-memory context. This is what tests run against.
pub async fn setup_context() -> GharbhadaContext {
    GharbhadaContext::create_inmemory()
}
