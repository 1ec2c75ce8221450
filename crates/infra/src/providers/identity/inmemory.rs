use super::IIdentityProvider;
use anyhow::anyhow;
use gharbhada_domain::{ExternalIdentity, IdentityDocument, IdentityLink, InternalUserId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory identity provider used by tests and local development.
///
/// Issues deterministic sequential tokens (`uid-1`, `uid-2`, ...) and
/// exposes mutators that stand in for the provider-side data layer the
/// core never writes to (linking, associations, session). Call counters
/// and failure knobs exist so tests can assert that a pipeline made no
/// external call, or degrade under a simulated outage.
pub struct InMemoryIdentityProvider {
    accounts: Mutex<Vec<(String, ExternalIdentity)>>,
    docs: Mutex<Vec<IdentityDocument>>,
    associations: Mutex<HashMap<ExternalIdentity, Vec<ExternalIdentity>>>,
    session: Mutex<Option<ExternalIdentity>>,
    next_account: AtomicUsize,
    fail_create_account: Mutex<Option<String>>,
    fail_write_document: Mutex<Option<String>>,
    fail_read_associations: Mutex<Option<String>>,
    unavailable_links: Mutex<HashSet<String>>,
    pub create_account_calls: AtomicUsize,
    pub write_document_calls: AtomicUsize,
    pub find_link_calls: AtomicUsize,
    pub read_association_calls: AtomicUsize,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            docs: Mutex::new(Vec::new()),
            associations: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
            next_account: AtomicUsize::new(1),
            fail_create_account: Mutex::new(None),
            fail_write_document: Mutex::new(None),
            fail_read_associations: Mutex::new(None),
            unavailable_links: Mutex::new(HashSet::new()),
            create_account_calls: AtomicUsize::new(0),
            write_document_calls: AtomicUsize::new(0),
            find_link_calls: AtomicUsize::new(0),
            read_association_calls: AtomicUsize::new(0),
        }
    }

    /// Completes the link for a token, as the provider-side data layer
    /// does once the backend profile exists. Creates a bare document if
    /// none was written yet.
    pub fn link(&self, external_id: &ExternalIdentity, internal_user_id: InternalUserId) {
        let mut docs = self.docs.lock().unwrap();
        for doc in docs.iter_mut() {
            if doc.external_id == *external_id {
                doc.internal_user_id = Some(internal_user_id);
                return;
            }
        }
        let mut doc = IdentityDocument::new(
            external_id.clone(),
            String::new(),
            Default::default(),
        );
        doc.internal_user_id = Some(internal_user_id);
        docs.push(doc);
    }

    pub fn add_association(&self, owner: &ExternalIdentity, partner: &ExternalIdentity) {
        self.associations
            .lock()
            .unwrap()
            .entry(owner.clone())
            .or_insert_with(Vec::new)
            .push(partner.clone());
    }

    pub fn set_session(&self, identity: Option<ExternalIdentity>) {
        *self.session.lock().unwrap() = identity;
    }

    /// Makes `find_identity_link` fail for this token, simulating a
    /// lookup-channel outage.
    pub fn set_link_unavailable(&self, external_id: &ExternalIdentity) {
        self.unavailable_links
            .lock()
            .unwrap()
            .insert(external_id.as_str().to_string());
    }

    pub fn fail_next_create_account(&self, reason: &str) {
        *self.fail_create_account.lock().unwrap() = Some(reason.to_string());
    }

    pub fn fail_next_write_document(&self, reason: &str) {
        *self.fail_write_document.lock().unwrap() = Some(reason.to_string());
    }

    pub fn fail_read_associations(&self, reason: &str) {
        *self.fail_read_associations.lock().unwrap() = Some(reason.to_string());
    }

    pub fn find_document(&self, external_id: &ExternalIdentity) -> Option<IdentityDocument> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .find(|doc| doc.external_id == *external_id)
            .cloned()
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IIdentityProvider for InMemoryIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<ExternalIdentity> {
        self.create_account_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.fail_create_account.lock().unwrap().take() {
            return Err(anyhow!(reason));
        }
        if password.len() < 6 {
            return Err(anyhow!("WEAK_PASSWORD"));
        }

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|(existing, _)| existing == email) {
            return Err(anyhow!("EMAIL_EXISTS"));
        }

        let n = self.next_account.fetch_add(1, Ordering::SeqCst);
        let identity: ExternalIdentity = format!("uid-{}", n)
            .parse()
            .expect("Sequential token to be non-empty");
        accounts.push((email.to_string(), identity.clone()));
        // Account creation signs the new user in, like the provider SDK
        *self.session.lock().unwrap() = Some(identity.clone());

        Ok(identity)
    }

    async fn write_identity_document(&self, doc: &IdentityDocument) -> anyhow::Result<()> {
        self.write_document_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.fail_write_document.lock().unwrap().take() {
            return Err(anyhow!(reason));
        }

        let mut docs = self.docs.lock().unwrap();
        for existing in docs.iter_mut() {
            if existing.external_id == doc.external_id {
                *existing = doc.clone();
                return Ok(());
            }
        }
        docs.push(doc.clone());
        Ok(())
    }

    async fn find_identity_link(
        &self,
        external_id: &ExternalIdentity,
    ) -> anyhow::Result<Option<IdentityLink>> {
        self.find_link_calls.fetch_add(1, Ordering::SeqCst);

        if self
            .unavailable_links
            .lock()
            .unwrap()
            .contains(external_id.as_str())
        {
            return Err(anyhow!("Identity provider unavailable"));
        }

        Ok(self
            .find_document(external_id)
            .and_then(|doc| doc.link()))
    }

    async fn read_association_set(
        &self,
        external_id: &ExternalIdentity,
    ) -> anyhow::Result<Vec<ExternalIdentity>> {
        self.read_association_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.fail_read_associations.lock().unwrap().take() {
            return Err(anyhow!(reason));
        }

        Ok(self
            .associations
            .lock()
            .unwrap()
            .get(external_id)
            .cloned()
            .unwrap_or_default())
    }

    fn current_session(&self) -> Option<ExternalIdentity> {
        self.session.lock().unwrap().clone()
    }
}
