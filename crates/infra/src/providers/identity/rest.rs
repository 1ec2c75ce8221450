use super::IIdentityProvider;
use gharbhada_domain::{ExternalIdentity, IdentityDocument, IdentityLink, InternalUserId};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDocument {
    email: String,
    user_role: String,
    firebase_u_id: String,
    #[serde(default)]
    user_id: Option<i64>,
}

impl From<&IdentityDocument> for UserDocument {
    fn from(doc: &IdentityDocument) -> Self {
        Self {
            email: doc.email.clone(),
            user_role: doc.role.to_string(),
            firebase_u_id: doc.external_id.as_str().to_string(),
            user_id: doc.internal_user_id.map(InternalUserId::inner),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssociationsResponse {
    #[serde(default)]
    associations: Vec<String>,
}

/// REST client for the identity provider. Keeps the signed-in identity
/// cached in memory after a successful signup, which is all the session
/// state the core ever reads.
pub struct RestIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
    session: Mutex<Option<ExternalIdentity>>,
}

impl RestIdentityProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            session: Mutex::new(None),
        }
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        body: &impl Serialize,
        path: String,
    ) -> anyhow::Result<T> {
        match self
            .client
            .post(&format!("{}/{}?key={}", self.base_url, path, self.api_key))
            .json(body)
            .send()
            .await
        {
            Ok(res) => res.json::<T>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] Identity provider POST error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Identity provider POST error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    async fn patch<T: for<'de> Deserialize<'de>>(
        &self,
        body: &impl Serialize,
        path: String,
    ) -> anyhow::Result<T> {
        match self
            .client
            .patch(&format!("{}/{}?key={}", self.base_url, path, self.api_key))
            .json(body)
            .send()
            .await
        {
            Ok(res) => res.json::<T>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] Identity provider PATCH error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Identity provider PATCH error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    /// GET where a 404 means the document was never written.
    async fn get_optional<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
    ) -> anyhow::Result<Option<T>> {
        match self
            .client
            .get(&format!("{}/{}?key={}", self.base_url, path, self.api_key))
            .send()
            .await
        {
            Ok(res) if res.status() == StatusCode::NOT_FOUND => Ok(None),
            Ok(res) => res.json::<T>().await.map(Some).map_err(|e| {
                error!(
                    "[Unexpected Response] Identity provider GET error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Identity provider GET error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}

#[async_trait::async_trait]
impl IIdentityProvider for RestIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<ExternalIdentity> {
        let body = SignUpRequest {
            email,
            password,
            return_secure_token: true,
        };
        let res: SignUpResponse = self.post(&body, "accounts:signUp".into()).await?;
        let identity = res.local_id.parse::<ExternalIdentity>()?;
        *self.session.lock().unwrap() = Some(identity.clone());
        Ok(identity)
    }

    async fn write_identity_document(&self, doc: &IdentityDocument) -> anyhow::Result<()> {
        let body: UserDocument = doc.into();
        let _: serde_json::Value = self
            .patch(&body, format!("documents/users/{}", doc.external_id))
            .await?;
        Ok(())
    }

    async fn find_identity_link(
        &self,
        external_id: &ExternalIdentity,
    ) -> anyhow::Result<Option<IdentityLink>> {
        let doc: Option<UserDocument> = self
            .get_optional(format!("documents/users/{}", external_id))
            .await?;
        Ok(doc.and_then(|doc| {
            doc.user_id.map(|user_id| IdentityLink {
                external_id: external_id.clone(),
                internal_user_id: InternalUserId::new(user_id),
            })
        }))
    }

    async fn read_association_set(
        &self,
        external_id: &ExternalIdentity,
    ) -> anyhow::Result<Vec<ExternalIdentity>> {
        let res: Option<AssociationsResponse> = self
            .get_optional(format!("documents/users/{}/associations", external_id))
            .await?;
        let tokens = res.map(|res| res.associations).unwrap_or_default();
        Ok(tokens
            .iter()
            .filter_map(|token| token.parse::<ExternalIdentity>().ok())
            .collect())
    }

    fn current_session(&self) -> Option<ExternalIdentity> {
        self.session.lock().unwrap().clone()
    }
}
