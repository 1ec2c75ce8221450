mod inmemory;
mod rest;

use gharbhada_domain::{ExternalIdentity, InternalUserId, ProfileRecord, UserRole};
pub use inmemory::InMemoryProfileApi;
pub use rest::RestProfileApi;

#[derive(Debug, Clone)]
pub struct CreateProfileRequest {
    pub email: String,
    /// Forwarded to the backend as received. Hashing is the backend's
    /// responsibility under the current contract; see DESIGN.md for why
    /// this flagged defect is carried rather than fixed here.
    pub password_material: String,
    pub role: UserRole,
    pub external_id: ExternalIdentity,
}

/// Validated shape of the backend's create response. The backend has
/// been observed to answer 2xx without a user id; callers must treat
/// `user_id: None` as a malformed response, not a success.
#[derive(Debug, Clone)]
pub struct CreateProfileResponse {
    pub user_id: Option<InternalUserId>,
}

/// The application backend owning canonical `ProfileRecord`s.
#[async_trait::async_trait]
pub trait IProfileApi: Send + Sync {
    async fn create_profile(
        &self,
        req: &CreateProfileRequest,
    ) -> anyhow::Result<CreateProfileResponse>;

    /// `Ok(None)` when no profile exists for the id.
    async fn find_profile(
        &self,
        user_id: &InternalUserId,
    ) -> anyhow::Result<Option<ProfileRecord>>;
}
