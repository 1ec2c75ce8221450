use crate::shared::usecase::UseCase;
use futures::future::join_all;
use gharbhada_domain::{ContactEntry, ExternalIdentity};
use gharbhada_infra::GharbhadaContext;
use std::collections::HashSet;
use tracing::{error, warn};

/// Contact Resolution Aggregator: fans the current user's association
/// set out into fully resolved, displayable contacts.
///
/// Partial-failure tolerant by design: a contact that cannot be mapped
/// or fetched is dropped from the list (and logged), never surfaced to
/// the caller. A usable partial list beats an all-or-nothing failure on
/// the chat screen.
#[derive(Debug)]
pub struct ListContactsUseCase {
    /// Injected by the caller (from the current-identity accessor) so
    /// tests can run any principal without a real session.
    pub current_identity: Option<ExternalIdentity>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    /// Ordered by association-set iteration order, regardless of
    /// per-item completion timing. Uniqueness key is the external
    /// identity.
    pub contacts: Vec<ContactEntry>,
    /// The current user's own display name, for conversation labels
    /// downstream.
    pub current_display_name: String,
}

/// The aggregator never fails; it degrades by omission.
#[derive(Debug)]
pub enum UseCaseError {}

const UNKNOWN_RENTER: &str = "Unknown Renter";

#[async_trait::async_trait(?Send)]
impl UseCase for ListContactsUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "ListContacts";

    async fn execute(&mut self, ctx: &GharbhadaContext) -> Result<Self::Response, Self::Error> {
        let current = match &self.current_identity {
            Some(current) => current.clone(),
            // No signed-in principal: nothing to resolve and nobody to
            // ask the provider about
            None => {
                return Ok(UseCaseRes {
                    contacts: Vec::new(),
                    current_display_name: UNKNOWN_RENTER.into(),
                })
            }
        };

        let associated = match ctx.providers.identity.read_association_set(&current).await {
            Ok(associated) => associated,
            Err(e) => {
                error!(
                    "Failed to read association set for {}. Error message: {:?}",
                    current, e
                );
                Vec::new()
            }
        };

        // Dedup before fan-out so duplicates cost no lookups; first
        // occurrence keeps its position
        let mut seen = HashSet::new();
        let tokens: Vec<_> = associated
            .into_iter()
            .filter(|token| seen.insert(token.clone()))
            .collect();

        let total = tokens.len();
        let lookups = tokens
            .into_iter()
            .map(|token| resolve_contact(ctx, token));
        let contacts: Vec<ContactEntry> = join_all(lookups)
            .await
            .into_iter()
            .flatten()
            .collect();

        let dropped = total - contacts.len();
        if dropped > 0 {
            warn!(
                "Contact resolution for {} dropped {} of {} entries",
                current, dropped, total
            );
        }

        let current_display_name = resolve_contact(ctx, current)
            .await
            .map(|entry| entry.display_name)
            .unwrap_or_else(|| UNKNOWN_RENTER.into());

        Ok(UseCaseRes {
            contacts,
            current_display_name,
        })
    }
}

/// Maps one token to a displayable contact. Any failure along the
/// mapper -> profile path drops the entry with a logged cause.
async fn resolve_contact(
    ctx: &GharbhadaContext,
    token: ExternalIdentity,
) -> Option<ContactEntry> {
    let link = match ctx.providers.identity.find_identity_link(&token).await {
        Ok(Some(link)) => link,
        Ok(None) => {
            warn!("Dropping contact {}: no internal user id linked yet", token);
            return None;
        }
        Err(e) => {
            warn!(
                "Dropping contact {}: mapping channel failed. Error message: {:?}",
                token, e
            );
            return None;
        }
    };

    match ctx
        .providers
        .backend
        .find_profile(&link.internal_user_id)
        .await
    {
        Ok(Some(profile)) => Some(ContactEntry {
            external_identity: token,
            internal_user_id: link.internal_user_id,
            display_name: profile.display_name(),
        }),
        Ok(None) => {
            warn!(
                "Dropping contact {}: backend has no profile for user id {}",
                token, link.internal_user_id
            );
            None
        }
        Err(e) => {
            warn!(
                "Dropping contact {}: profile fetch failed. Error message: {:?}",
                token, e
            );
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use gharbhada_domain::{InternalUserId, ProfileRecord, UserRole};
    use gharbhada_infra::{InMemoryIdentityProvider, InMemoryProfileApi};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn context_with_fakes() -> (
        GharbhadaContext,
        Arc<InMemoryIdentityProvider>,
        Arc<InMemoryProfileApi>,
    ) {
        let identity = Arc::new(InMemoryIdentityProvider::new());
        let backend = Arc::new(InMemoryProfileApi::new());
        let ctx = GharbhadaContext::with_providers(identity.clone(), backend.clone());
        (ctx, identity, backend)
    }

    fn profile(id: i64, first: &str, last: &str) -> ProfileRecord {
        ProfileRecord {
            user_id: InternalUserId::new(id),
            first_name: first.into(),
            last_name: last.into(),
            role: UserRole::Renter,
            email: format!("user{}@b.com", id),
        }
    }

    fn uid(token: &str) -> ExternalIdentity {
        token.parse().unwrap()
    }

    async fn list(
        ctx: &GharbhadaContext,
        current: Option<ExternalIdentity>,
    ) -> UseCaseRes {
        execute(
            ListContactsUseCase {
                current_identity: current,
            },
            ctx,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn no_signed_in_principal_is_an_empty_list_without_provider_calls() {
        let (ctx, identity, backend) = context_with_fakes();

        let res = list(&ctx, None).await;
        assert!(res.contacts.is_empty());
        assert_eq!(res.current_display_name, "Unknown Renter");

        assert_eq!(identity.read_association_calls.load(Ordering::SeqCst), 0);
        assert_eq!(identity.find_link_calls.load(Ordering::SeqCst), 0);
        assert_eq!(backend.find_profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_association_set_is_an_empty_list() {
        let (ctx, _identity, _backend) = context_with_fakes();
        let res = list(&ctx, Some(uid("uid-1"))).await;
        assert!(res.contacts.is_empty());
    }

    #[tokio::test]
    async fn resolves_partners_and_omits_unlinked_ones() {
        let (ctx, identity, backend) = context_with_fakes();
        let me = uid("uid-1");
        identity.add_association(&me, &uid("uid-2"));
        identity.add_association(&me, &uid("uid-3"));
        identity.link(&uid("uid-2"), InternalUserId::new(7));
        backend.insert_profile(profile(7, "Jo", "Lee"));
        // uid-3 never got linked

        let res = list(&ctx, Some(me)).await;
        assert_eq!(res.contacts.len(), 1);
        assert_eq!(res.contacts[0].external_identity, uid("uid-2"));
        assert_eq!(res.contacts[0].internal_user_id, InternalUserId::new(7));
        assert_eq!(res.contacts[0].display_name, "Jo Lee");
    }

    #[tokio::test]
    async fn preserves_association_order_when_entries_drop_out() {
        let (ctx, identity, backend) = context_with_fakes();
        let me = uid("uid-0");

        // Seven partners; position 2 (uid-3) hits a mapping channel
        // outage and position 5 (uid-6) has no backend profile
        for i in 1..=7 {
            let partner = uid(&format!("uid-{}", i));
            identity.add_association(&me, &partner);
            identity.link(&partner, InternalUserId::new(i));
            if i != 6 {
                backend.insert_profile(profile(i, "User", &i.to_string()));
            }
        }
        identity.set_link_unavailable(&uid("uid-3"));

        let res = list(&ctx, Some(me)).await;
        let names: Vec<_> = res
            .contacts
            .iter()
            .map(|c| c.display_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["User 1", "User 2", "User 4", "User 5", "User 7"]
        );
    }

    #[tokio::test]
    async fn duplicate_tokens_resolve_once() {
        let (ctx, identity, backend) = context_with_fakes();
        let me = uid("uid-1");
        identity.add_association(&me, &uid("uid-2"));
        identity.add_association(&me, &uid("uid-2"));
        identity.link(&uid("uid-2"), InternalUserId::new(7));
        backend.insert_profile(profile(7, "Jo", "Lee"));

        let res = list(&ctx, Some(me)).await;
        assert_eq!(res.contacts.len(), 1);
        // One lookup for the deduped partner, one for the current user
        assert_eq!(identity.find_link_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn blank_profile_names_render_as_unknown_user() {
        let (ctx, identity, backend) = context_with_fakes();
        let me = uid("uid-1");
        identity.add_association(&me, &uid("uid-2"));
        identity.link(&uid("uid-2"), InternalUserId::new(7));
        backend.insert_profile(profile(7, "", ""));

        let res = list(&ctx, Some(me)).await;
        assert_eq!(res.contacts[0].display_name, "Unknown User");
    }

    #[tokio::test]
    async fn resolves_own_display_name() {
        let (ctx, identity, backend) = context_with_fakes();
        let me = uid("uid-1");
        identity.link(&me, InternalUserId::new(3));
        backend.insert_profile(profile(3, "Ana", "Shah"));

        let res = list(&ctx, Some(me)).await;
        assert_eq!(res.current_display_name, "Ana Shah");
    }

    #[tokio::test]
    async fn own_name_failure_falls_back_without_blocking_contacts() {
        let (ctx, identity, backend) = context_with_fakes();
        let me = uid("uid-1");
        identity.add_association(&me, &uid("uid-2"));
        identity.link(&uid("uid-2"), InternalUserId::new(7));
        backend.insert_profile(profile(7, "Jo", "Lee"));
        // The current user's own token was never linked

        let res = list(&ctx, Some(me)).await;
        assert_eq!(res.contacts.len(), 1);
        assert_eq!(res.current_display_name, "Unknown Renter");
    }

    #[tokio::test]
    async fn association_read_failure_degrades_to_an_empty_list() {
        let (ctx, identity, _backend) = context_with_fakes();
        identity.fail_read_associations("Provider outage");

        let res = list(&ctx, Some(uid("uid-1"))).await;
        assert!(res.contacts.is_empty());
    }
}
