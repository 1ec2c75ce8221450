use crate::shared::usecase::UseCase;
use gharbhada_domain::ExternalIdentity;
use gharbhada_infra::GharbhadaContext;

/// Current-Identity Accessor: who is signed in right now. A single read
/// of the session the provider client already holds in memory; absence
/// is a value, not an error, and no network call is made.
#[derive(Debug)]
pub struct GetCurrentIdentityUseCase;

#[derive(Debug)]
pub struct UseCaseRes {
    pub identity: Option<ExternalIdentity>,
}

/// The accessor never fails.
#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCurrentIdentityUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetCurrentIdentity";

    async fn execute(&mut self, ctx: &GharbhadaContext) -> Result<Self::Response, Self::Error> {
        Ok(UseCaseRes {
            identity: ctx.providers.identity.current_session(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use gharbhada_infra::{InMemoryIdentityProvider, InMemoryProfileApi};
    use std::sync::Arc;

    #[tokio::test]
    async fn absence_is_a_value() {
        let ctx = gharbhada_infra::setup_context().await;
        let res = execute(GetCurrentIdentityUseCase, &ctx).await.unwrap();
        assert!(res.identity.is_none());
    }

    #[tokio::test]
    async fn reads_the_session_held_by_the_provider_client() {
        let identity = Arc::new(InMemoryIdentityProvider::new());
        let backend = Arc::new(InMemoryProfileApi::new());
        let ctx = GharbhadaContext::with_providers(identity.clone(), backend);

        identity.set_session(Some("uid-1".parse().unwrap()));
        let res = execute(GetCurrentIdentityUseCase, &ctx).await.unwrap();
        assert_eq!(res.identity.unwrap().as_str(), "uid-1");
    }

    #[tokio::test]
    async fn signup_signs_the_new_user_in() {
        let identity = Arc::new(InMemoryIdentityProvider::new());
        let backend = Arc::new(InMemoryProfileApi::new());
        let ctx = GharbhadaContext::with_providers(identity.clone(), backend);

        use gharbhada_infra::IIdentityProvider;
        identity.create_account("a@b.com", "secret1").await.unwrap();

        let res = execute(GetCurrentIdentityUseCase, &ctx).await.unwrap();
        assert_eq!(res.identity.unwrap().as_str(), "uid-1");
    }
}
