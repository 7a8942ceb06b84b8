//! One-shot fetch of the assignable roles.

use std::sync::Arc;

use client_core::{RegistrationApi, TransportError};
use shared::domain::Role;
use tracing::{error, info};

use crate::host::FormHost;

pub const ROLE_LOAD_FAILED_MESSAGE: &str = "There was an error fetching the roles.";

pub struct RoleLoader {
    api: Arc<dyn RegistrationApi>,
}

impl RoleLoader {
    pub fn new(api: Arc<dyn RegistrationApi>) -> Self {
        Self { api }
    }

    /// Makes exactly one request. Failures are reported to the host and
    /// returned; nothing is retried.
    pub async fn load(&self, host: &dyn FormHost) -> Result<Vec<Role>, TransportError> {
        match self.api.list_roles().await {
            Ok(roles) => {
                info!(count = roles.len(), "roles loaded");
                Ok(roles)
            }
            Err(err) => {
                error!(error = %err, "failed to load roles");
                host.notify_error(ROLE_LOAD_FAILED_MESSAGE);
                Err(err)
            }
        }
    }
}
