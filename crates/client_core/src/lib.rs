use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::Role,
    error::ApiErrorBody,
    protocol::{RegisterRequest, RoleRecord},
};
use tracing::{debug, warn};
use url::Url;

pub mod error;

pub use error::TransportError;

const ROLES_PATH: &str = "rol/";
const REGISTER_PATH: &str = "auth/register";

/// Network seam used by the registration form.
///
/// Retries and timeouts are the implementation's business; callers see one
/// classified result per call.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// `GET /rol/`, in server order.
    async fn list_roles(&self) -> Result<Vec<Role>, TransportError>;

    /// `POST /auth/register`. The success payload is returned as-is.
    async fn register(&self, request: &RegisterRequest)
        -> Result<serde_json::Value, TransportError>;
}

pub struct HttpRegistrationClient {
    http: Client,
    base_url: Url,
}

impl HttpRegistrationClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Unexpected(err.to_string()))?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        Ok(self.base_url.join(path)?)
    }
}

/// Makes relative joins append to the base path instead of replacing its
/// last segment.
fn normalize_base_url(mut base_url: Url) -> Url {
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url
}

async fn reject_non_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw = response.bytes().await.unwrap_or_default();
    let body = ApiErrorBody::parse(&raw);
    warn!(status = status.as_u16(), message = ?body.message(), "registration api returned error status");
    Err(TransportError::Rejected {
        status: status.as_u16(),
        message: body.message().map(str::to_string),
    })
}

#[async_trait]
impl RegistrationApi for HttpRegistrationClient {
    async fn list_roles(&self) -> Result<Vec<Role>, TransportError> {
        let url = self.endpoint(ROLES_PATH)?;
        debug!(%url, "fetching roles");
        let response = self.http.get(url).send().await?;
        let records: Vec<RoleRecord> = reject_non_success(response).await?.json().await?;
        debug!(count = records.len(), "roles fetched");
        Ok(records.into_iter().map(Role::from).collect())
    }

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<serde_json::Value, TransportError> {
        let url = self.endpoint(REGISTER_PATH)?;
        debug!(%url, username = %request.username, role_id = %request.role_id, "posting registration");
        let response = self.http.post(url).json(request).send().await?;
        let raw = match reject_non_success(response).await?.bytes().await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "registration accepted but response body was unreadable");
                return Ok(serde_json::Value::Null);
            }
        };
        if raw.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&raw)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&raw).into())))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
