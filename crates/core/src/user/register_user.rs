use crate::error::GharbhadaError;
use crate::shared::usecase::UseCase;
use gharbhada_domain::{IdentityDocument, InternalUserId, UserRole};
use gharbhada_infra::{CreateProfileRequest, GharbhadaContext};
use tracing::error;

/// `local@domain` shape check, nothing more. Deliverability is the
/// identity provider's problem.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|segment| !segment.is_empty())
}

/// Registration Coordinator: the ordered dual-write that creates a new
/// account across the identity provider and the application backend.
///
/// The sequence is fail-fast with no retries and no compensating
/// rollback: a failure after `CreateIdentity` leaves an identity without
/// a link (logged for operator reconciliation), exactly the
/// inconsistency window the design accepts.
#[derive(Debug)]
pub struct RegisterUserUseCase {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user_id: InternalUserId,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidInput(String),
    IdentityCreationFailed(String),
    LinkPersistenceFailed(String),
    ProfileCreationFailed(String),
    UnexpectedResponseShape,
}

impl From<UseCaseError> for GharbhadaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidInput(msg) => Self::InvalidInput(msg),
            UseCaseError::IdentityCreationFailed(reason) => Self::IdentityCreationFailed(reason),
            UseCaseError::LinkPersistenceFailed(reason) => Self::LinkPersistenceFailed(reason),
            UseCaseError::ProfileCreationFailed(reason) => Self::ProfileCreationFailed(reason),
            UseCaseError::UnexpectedResponseShape => Self::UnexpectedResponseShape,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "RegisterUser";

    async fn execute(&mut self, ctx: &GharbhadaContext) -> Result<Self::Response, Self::Error> {
        // ValidateInput: terminal, no external calls made
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err(UseCaseError::InvalidInput(
                "Please fill in all fields".into(),
            ));
        }
        if !is_valid_email(&self.email) {
            return Err(UseCaseError::InvalidInput(
                "Please enter a valid email".into(),
            ));
        }

        // CreateIdentity
        let identity = ctx
            .providers
            .identity
            .create_account(&self.email, &self.password)
            .await
            .map_err(|e| UseCaseError::IdentityCreationFailed(e.to_string()))?;

        // PersistIdentityLink: the document self-references the token;
        // the internal user id does not exist yet at this point
        let doc = IdentityDocument::new(identity.clone(), self.email.clone(), UserRole::Renter);
        if let Err(e) = ctx.providers.identity.write_identity_document(&doc).await {
            error!(
                "Identity {} was created but its document could not be persisted, leaving an unlinked identity behind. Error message: {:?}",
                identity, e
            );
            return Err(UseCaseError::LinkPersistenceFailed(e.to_string()));
        }

        // CreateBackendProfile
        // TODO: stop forwarding plaintext password material once the
        // backend accepts a client-side hash (tracked defect)
        let req = CreateProfileRequest {
            email: self.email.clone(),
            password_material: self.password.clone(),
            role: UserRole::Renter,
            external_id: identity.clone(),
        };
        let res = ctx
            .providers
            .backend
            .create_profile(&req)
            .await
            .map_err(|e| {
                error!(
                    "Identity {} was created but the backend profile was not. Error message: {:?}",
                    identity, e
                );
                UseCaseError::ProfileCreationFailed(e.to_string())
            })?;

        // A nominal success without a user id is a malformed response
        let user_id = res.user_id.ok_or(UseCaseError::UnexpectedResponseShape)?;

        Ok(UseCaseRes { user_id })
    }
}
