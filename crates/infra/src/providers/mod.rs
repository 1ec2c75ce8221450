mod backend;
mod identity;

use crate::Config;
pub use backend::{
    CreateProfileRequest, CreateProfileResponse, IProfileApi, InMemoryProfileApi, RestProfileApi,
};
pub use identity::{IIdentityProvider, InMemoryIdentityProvider, RestIdentityProvider};
use std::sync::Arc;

/// The two external collaborators the core talks to.
#[derive(Clone)]
pub struct Providers {
    pub identity: Arc<dyn IIdentityProvider>,
    pub backend: Arc<dyn IProfileApi>,
}

impl Providers {
    pub fn create_rest(config: &Config) -> Self {
        Self {
            identity: Arc::new(RestIdentityProvider::new(
                config.identity_api_base_url.clone(),
                config.identity_api_key.clone(),
            )),
            backend: Arc::new(RestProfileApi::new(config.backend_api_base_url.clone())),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            identity: Arc::new(InMemoryIdentityProvider::new()),
            backend: Arc::new(InMemoryProfileApi::new()),
        }
    }
}
