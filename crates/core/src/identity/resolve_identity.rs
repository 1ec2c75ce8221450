use crate::error::GharbhadaError;
use crate::shared::usecase::UseCase;
use gharbhada_domain::{ExternalIdentity, InternalUserId};
use gharbhada_infra::GharbhadaContext;

/// Identity Mapper: translates an external identity token into the
/// internal user id the backend understands. Pure read, exactly one
/// provider lookup.
#[derive(Debug)]
pub struct ResolveIdentityUseCase {
    pub external_identity: ExternalIdentity,
}

#[derive(Debug)]
pub struct UseCaseRes {
    /// `None` when no internal id has ever been linked to the token.
    /// That is an expected state (partner not yet synced to the
    /// backend), not a failure.
    pub internal_user_id: Option<InternalUserId>,
}

#[derive(Debug)]
pub enum UseCaseError {
    /// The lookup channel itself failed, distinct from a missing link.
    MapperUnavailable,
}

impl From<UseCaseError> for GharbhadaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MapperUnavailable => Self::MapperUnavailable,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ResolveIdentityUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "ResolveIdentity";

    async fn execute(&mut self, ctx: &GharbhadaContext) -> Result<Self::Response, Self::Error> {
        let link = ctx
            .providers
            .identity
            .find_identity_link(&self.external_identity)
            .await
            .map_err(|_| UseCaseError::MapperUnavailable)?;

        Ok(UseCaseRes {
            internal_user_id: link.map(|link| link.internal_user_id),
        })
    }
}
