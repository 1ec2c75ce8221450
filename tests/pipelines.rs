use gharbhada::{
    execute, ExternalIdentity, GetCurrentIdentityUseCase, GharbhadaContext, InternalUserId,
    ListContactsUseCase, ProfileRecord, RegisterUserUseCase, UserRole,
};
use gharbhada_infra::{InMemoryIdentityProvider, InMemoryProfileApi};
use std::sync::Arc;

fn spawn_app() -> (
    GharbhadaContext,
    Arc<InMemoryIdentityProvider>,
    Arc<InMemoryProfileApi>,
) {
    let identity = Arc::new(InMemoryIdentityProvider::new());
    let backend = Arc::new(InMemoryProfileApi::new());
    let ctx = GharbhadaContext::with_providers(identity.clone(), backend.clone());
    (ctx, identity, backend)
}

#[tokio::test]
async fn registration_end_to_end() {
    let (ctx, identity, backend) = spawn_app();
    backend.set_next_user_id(42);

    let registered = execute(
        RegisterUserUseCase {
            email: "a@b.com".into(),
            password: "secret1".into(),
        },
        &ctx,
    )
    .await
    .expect("Expected registration to succeed");

    assert_eq!(registered.user_id, InternalUserId::new(42));

    // Registration signed the new user in
    let session = execute(GetCurrentIdentityUseCase, &ctx).await.unwrap();
    assert_eq!(session.identity.unwrap().as_str(), "uid-1");

    // The provider-side document exists, self-referencing and unlinked
    let doc = identity
        .find_document(&"uid-1".parse().unwrap())
        .expect("Expected identity document to be written");
    assert_eq!(doc.email, "a@b.com");
    assert!(doc.internal_user_id.is_none());
}

#[tokio::test]
async fn chat_list_end_to_end() {
    let (ctx, identity, backend) = spawn_app();
    let me: ExternalIdentity = "uid-1".parse().unwrap();

    identity.add_association(&me, &"uid-2".parse().unwrap());
    identity.add_association(&me, &"uid-3".parse().unwrap());
    identity.link(&"uid-2".parse().unwrap(), InternalUserId::new(7));
    backend.insert_profile(ProfileRecord {
        user_id: InternalUserId::new(7),
        first_name: "Jo".into(),
        last_name: "Lee".into(),
        role: UserRole::Landlord,
        email: "jo@b.com".into(),
    });
    identity.set_session(Some(me));

    let session = execute(GetCurrentIdentityUseCase, &ctx).await.unwrap();
    let contacts = execute(
        ListContactsUseCase {
            current_identity: session.identity,
        },
        &ctx,
    )
    .await
    .unwrap();

    assert_eq!(contacts.contacts.len(), 1);
    let entry = &contacts.contacts[0];
    assert_eq!(entry.external_identity.as_str(), "uid-2");
    assert_eq!(entry.internal_user_id, InternalUserId::new(7));
    assert_eq!(entry.display_name, "Jo Lee");
}
