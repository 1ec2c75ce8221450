mod inmemory;
mod rest;

use gharbhada_domain::{ExternalIdentity, IdentityDocument, IdentityLink};
pub use inmemory::InMemoryIdentityProvider;
pub use rest::RestIdentityProvider;

/// The authentication / identity collaborator. Owns accounts, the
/// per-user document store and the association sets; the core only ever
/// reads the latter two, except for the document written at sign-up.
#[async_trait::async_trait]
pub trait IIdentityProvider: Send + Sync {
    /// Creates an account and returns the issued identity token.
    /// Errors carry the provider reason (duplicate email, weak
    /// password, outage).
    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<ExternalIdentity>;

    /// Writes the profile document keyed by the document's own
    /// external identity.
    async fn write_identity_document(&self, doc: &IdentityDocument) -> anyhow::Result<()>;

    /// Single lookup of the link record for a token. `Ok(None)` when no
    /// internal user id has ever been linked, which is an expected
    /// state and not a failure.
    async fn find_identity_link(
        &self,
        external_id: &ExternalIdentity,
    ) -> anyhow::Result<Option<IdentityLink>>;

    /// The identity tokens associated with the given user (prior chat
    /// partners). Owned and mutated outside the core.
    async fn read_association_set(
        &self,
        external_id: &ExternalIdentity,
    ) -> anyhow::Result<Vec<ExternalIdentity>>;

    /// Who is signed in right now, from the client session held in
    /// memory. No network call.
    fn current_session(&self) -> Option<ExternalIdentity>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use gharbhada_domain::{InternalUserId, UserRole};

    #[tokio::test]
    async fn link_lookup_is_idempotent() {
        let provider = InMemoryIdentityProvider::new();
        let uid: ExternalIdentity = "uid-1".parse().unwrap();
        let mut doc =
            IdentityDocument::new(uid.clone(), "a@b.com".into(), UserRole::Renter);
        doc.internal_user_id = Some(InternalUserId::new(7));
        provider.write_identity_document(&doc).await.unwrap();

        let first = provider.find_identity_link(&uid).await.unwrap();
        let second = provider.find_identity_link(&uid).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.unwrap().internal_user_id, InternalUserId::new(7));
    }

    #[tokio::test]
    async fn unlinked_document_resolves_to_none() {
        let provider = InMemoryIdentityProvider::new();
        let uid: ExternalIdentity = "uid-1".parse().unwrap();
        let doc = IdentityDocument::new(uid.clone(), "a@b.com".into(), UserRole::Renter);
        provider.write_identity_document(&doc).await.unwrap();

        assert!(provider.find_identity_link(&uid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn association_set_preserves_insertion_order() {
        let provider = InMemoryIdentityProvider::new();
        let me: ExternalIdentity = "uid-1".parse().unwrap();
        for partner in &["uid-5", "uid-3", "uid-9"] {
            provider.add_association(&me, &partner.parse().unwrap());
        }

        let set = provider.read_association_set(&me).await.unwrap();
        let tokens: Vec<_> = set.iter().map(|id| id.as_str().to_string()).collect();
        assert_eq!(tokens, vec!["uid-5", "uid-3", "uid-9"]);
    }
}
