use super::{CreateProfileRequest, CreateProfileResponse, IProfileApi};
use anyhow::anyhow;
use gharbhada_domain::{InternalUserId, ProfileRecord};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory application backend for tests and local development.
///
/// Assigns sequential user ids (seedable so scenario tests can pin the
/// expected id) and offers knobs for the two failure shapes the
/// registration coordinator must distinguish: an outright create
/// failure and a nominally successful response missing the user id.
pub struct InMemoryProfileApi {
    profiles: Mutex<Vec<ProfileRecord>>,
    next_user_id: AtomicI64,
    omit_created_id: AtomicBool,
    fail_create: Mutex<Option<String>>,
    pub create_profile_calls: AtomicUsize,
    pub find_profile_calls: AtomicUsize,
}

impl InMemoryProfileApi {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(Vec::new()),
            next_user_id: AtomicI64::new(1),
            omit_created_id: AtomicBool::new(false),
            fail_create: Mutex::new(None),
            create_profile_calls: AtomicUsize::new(0),
            find_profile_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_next_user_id(&self, id: i64) {
        self.next_user_id.store(id, Ordering::SeqCst);
    }

    /// Next create responds 2xx-shaped but without a user id.
    pub fn omit_created_id(&self) {
        self.omit_created_id.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_create(&self, reason: &str) {
        *self.fail_create.lock().unwrap() = Some(reason.to_string());
    }

    pub fn insert_profile(&self, profile: ProfileRecord) {
        self.profiles.lock().unwrap().push(profile);
    }
}

impl Default for InMemoryProfileApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IProfileApi for InMemoryProfileApi {
    async fn create_profile(
        &self,
        req: &CreateProfileRequest,
    ) -> anyhow::Result<CreateProfileResponse> {
        self.create_profile_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.fail_create.lock().unwrap().take() {
            return Err(anyhow!(reason));
        }
        if self.omit_created_id.swap(false, Ordering::SeqCst) {
            return Ok(CreateProfileResponse { user_id: None });
        }

        let user_id = InternalUserId::new(self.next_user_id.fetch_add(1, Ordering::SeqCst));
        // Name fields start blank; the user fills them in on the info
        // page after registration
        self.profiles.lock().unwrap().push(ProfileRecord {
            user_id,
            first_name: String::new(),
            last_name: String::new(),
            role: req.role,
            email: req.email.clone(),
        });

        Ok(CreateProfileResponse {
            user_id: Some(user_id),
        })
    }

    async fn find_profile(
        &self,
        user_id: &InternalUserId,
    ) -> anyhow::Result<Option<ProfileRecord>> {
        self.find_profile_calls.fetch_add(1, Ordering::SeqCst);

        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|profile| profile.user_id == *user_id)
            .cloned())
    }
}
