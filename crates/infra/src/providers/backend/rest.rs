use super::{CreateProfileRequest, CreateProfileResponse, IProfileApi};
use gharbhada_domain::{InternalUserId, ProfileRecord, UserRole};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest<'a> {
    email: &'a str,
    // Wire name kept from the existing backend contract; the value is
    // the plaintext password material, see CreateProfileRequest
    password_hash: &'a str,
    user_role: String,
    firebase_u_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserResponse {
    #[serde(default)]
    user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDetailsResponse {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    user_role: Option<String>,
    #[serde(default)]
    email: String,
}

/// REST client for the application backend (`/Users`,
/// `/UserDetails/userId/{id}`).
pub struct RestProfileApi {
    client: Client,
    base_url: String,
}

impl RestProfileApi {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        body: &impl Serialize,
        path: String,
    ) -> anyhow::Result<T> {
        match self
            .client
            .post(&format!("{}/{}", self.base_url, path))
            .json(body)
            .send()
            .await
        {
            Ok(res) => res.json::<T>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] Backend API POST error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Backend API POST error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    async fn get_optional<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
    ) -> anyhow::Result<Option<T>> {
        match self
            .client
            .get(&format!("{}/{}", self.base_url, path))
            .send()
            .await
        {
            Ok(res) if res.status() == StatusCode::NOT_FOUND => Ok(None),
            Ok(res) => res.json::<T>().await.map(Some).map_err(|e| {
                error!(
                    "[Unexpected Response] Backend API GET error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Backend API GET error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}

fn parse_role(role: Option<&str>) -> UserRole {
    match role {
        Some("Landlord") => UserRole::Landlord,
        _ => UserRole::Renter,
    }
}

#[async_trait::async_trait]
impl IProfileApi for RestProfileApi {
    async fn create_profile(
        &self,
        req: &CreateProfileRequest,
    ) -> anyhow::Result<CreateProfileResponse> {
        let body = CreateUserRequest {
            email: &req.email,
            password_hash: &req.password_material,
            user_role: req.role.to_string(),
            firebase_u_id: req.external_id.as_str(),
        };
        let res: CreateUserResponse = self.post(&body, "Users".into()).await?;
        Ok(CreateProfileResponse {
            user_id: res.user_id.map(InternalUserId::new),
        })
    }

    async fn find_profile(
        &self,
        user_id: &InternalUserId,
    ) -> anyhow::Result<Option<ProfileRecord>> {
        let res: Option<UserDetailsResponse> = self
            .get_optional(format!("UserDetails/userId/{}", user_id))
            .await?;
        Ok(res.map(|details| ProfileRecord {
            user_id: *user_id,
            first_name: details.first_name,
            last_name: details.last_name,
            role: parse_role(details.user_role.as_deref()),
            email: details.email,
        }))
    }
}
