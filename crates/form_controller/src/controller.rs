//! Submission state machine: validate, submit, interpret, report.

use std::sync::Arc;

use client_core::{RegistrationApi, TransportError};
use shared::domain::Role;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    field_store::{FieldNameError, FieldStore, FormField, RegistrationForm, RoleSelection},
    host::FormHost,
    modal::ModalLifecycle,
    role_loader::RoleLoader,
    validator::{ensure_role_offered, validated_request},
};

pub const REGISTER_SUCCESS_MESSAGE: &str = "User registered successfully.";
pub const SERVER_REJECTED_PREFIX: &str = "There was an error registering the user.";
pub const SERVER_REJECTED_FALLBACK: &str = "Internal server error.";
pub const NETWORK_UNREACHABLE_MESSAGE: &str = "Could not connect to the server. Please try again.";
pub const UNEXPECTED_PREFIX: &str = "An unexpected error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Server payload, otherwise unused.
    Success(serde_json::Value),
    ClientInvalid,
    NetworkUnreachable,
    ServerRejected(String),
    Unexpected(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    fn from_transport(err: TransportError) -> Self {
        match err {
            TransportError::NoResponse(_) => Self::NetworkUnreachable,
            TransportError::Rejected { message, .. } => Self::ServerRejected(
                message.unwrap_or_else(|| SERVER_REJECTED_FALLBACK.to_string()),
            ),
            TransportError::Unexpected(message) => Self::Unexpected(message),
        }
    }

    /// Alert text for failures that reached the network path.
    fn alert_text(&self) -> Option<String> {
        match self {
            Self::NetworkUnreachable => Some(NETWORK_UNREACHABLE_MESSAGE.to_string()),
            Self::ServerRejected(message) => Some(format!("{SERVER_REJECTED_PREFIX} {message}")),
            Self::Unexpected(message) => Some(format!("{UNEXPECTED_PREFIX} {message}")),
            Self::Success(_) | Self::ClientInvalid => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a registration is already being submitted")]
    AlreadySubmitting,
    #[error("the registration dialog is not open")]
    DialogClosed,
}

struct ControllerState {
    fields: FieldStore,
    modal: ModalLifecycle,
    roles: Vec<Role>,
    phase: SubmissionPhase,
    last_outcome: Option<SubmissionOutcome>,
}

impl ControllerState {
    fn transition(&mut self, to: SubmissionPhase) {
        debug!(from = ?self.phase, ?to, "submission phase");
        self.phase = to;
    }

    /// Records a terminal outcome and goes back to idle for the next attempt.
    fn finish(&mut self, outcome: SubmissionOutcome) {
        let terminal = if outcome.is_success() {
            SubmissionPhase::Succeeded
        } else {
            SubmissionPhase::Failed
        };
        self.transition(terminal);
        self.last_outcome = Some(outcome);
        self.transition(SubmissionPhase::Idle);
    }
}

pub struct FormController {
    api: Arc<dyn RegistrationApi>,
    host: Arc<dyn FormHost>,
    role_loader: RoleLoader,
    inner: Mutex<ControllerState>,
}

impl FormController {
    pub fn new(api: Arc<dyn RegistrationApi>, host: Arc<dyn FormHost>) -> Arc<Self> {
        Arc::new(Self {
            role_loader: RoleLoader::new(api.clone()),
            api,
            host,
            inner: Mutex::new(ControllerState {
                fields: FieldStore::new(),
                modal: ModalLifecycle::default(),
                roles: Vec::new(),
                phase: SubmissionPhase::Idle,
                last_outcome: None,
            }),
        })
    }

    /// Loads the role list for this activation, replacing any previous one.
    /// On failure the list is left empty and the host has been alerted.
    pub async fn activate(&self) -> Result<Vec<Role>, TransportError> {
        let loaded = self.role_loader.load(self.host.as_ref()).await;
        let mut state = self.inner.lock().await;
        match loaded {
            Ok(roles) => {
                state.roles = roles.clone();
                Ok(roles)
            }
            Err(err) => {
                state.roles.clear();
                Err(err)
            }
        }
    }

    pub async fn roles(&self) -> Vec<Role> {
        self.inner.lock().await.roles.clone()
    }

    pub async fn open_dialog(&self) {
        let mut state = self.inner.lock().await;
        let generation = state.modal.open();
        debug!(generation, "registration dialog opened");
    }

    /// User dismissal. Discards whatever was typed.
    pub async fn close_dialog(&self) {
        let mut state = self.inner.lock().await;
        if state.modal.close() {
            state.fields.reset();
            debug!(phase = ?state.phase, "registration dialog dismissed");
        }
    }

    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.modal.is_open()
    }

    pub async fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.inner.lock().await.fields.set_field(field, value);
    }

    pub async fn set_field_by_name(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FieldNameError> {
        let value: String = value.into();
        if name == FormField::ROLE_WIRE_NAME {
            self.set_role(&value).await;
            return Ok(());
        }
        let field = name.parse::<FormField>()?;
        self.set_field(field, value).await;
        Ok(())
    }

    pub async fn set_role(&self, raw: &str) -> RoleSelection {
        let mut state = self.inner.lock().await;
        let selection = state.fields.set_role(raw).clone();
        if let RoleSelection::Invalid(raw) = &selection {
            warn!(raw = %raw, "role selection is not a numeric id");
        }
        selection
    }

    pub async fn snapshot(&self) -> RegistrationForm {
        self.inner.lock().await.fields.snapshot()
    }

    /// Inline validation text currently shown under the form.
    pub async fn error_message(&self) -> Option<String> {
        self.inner.lock().await.fields.error().map(str::to_string)
    }

    pub async fn phase(&self) -> SubmissionPhase {
        self.inner.lock().await.phase
    }

    pub async fn last_outcome(&self) -> Option<SubmissionOutcome> {
        self.inner.lock().await.last_outcome.clone()
    }

    /// Runs one submission attempt.
    ///
    /// Rejected without side effects while another attempt is in flight.
    /// The network is only touched when the form is complete and the role is
    /// one of the loaded roles. The network leg runs on its own task, so
    /// dropping this future does not abandon the attempt halfway.
    pub async fn submit(self: &Arc<Self>) -> Result<SubmissionOutcome, SubmitError> {
        let (request, generation) = {
            let mut state = self.inner.lock().await;
            if state.phase == SubmissionPhase::Submitting {
                warn!("submit ignored: registration already in flight");
                return Err(SubmitError::AlreadySubmitting);
            }
            if !state.modal.is_open() {
                return Err(SubmitError::DialogClosed);
            }

            state.transition(SubmissionPhase::Validating);
            let checked = validated_request(state.fields.form()).and_then(|request| {
                ensure_role_offered(request.role_id, &state.roles).map(|()| request)
            });
            match checked {
                Ok(request) => {
                    state.transition(SubmissionPhase::Submitting);
                    (request, state.modal.generation())
                }
                Err(err) => {
                    info!(roles = state.roles.len(), "registration form incomplete");
                    state.fields.set_error(err.to_string());
                    state.finish(SubmissionOutcome::ClientInvalid);
                    return Ok(SubmissionOutcome::ClientInvalid);
                }
            }
        };

        info!(
            username = %request.username,
            email = %request.email,
            role_id = %request.role_id,
            "submitting registration"
        );
        let controller = Arc::clone(self);
        let attempt = tokio::spawn(async move {
            match controller.api.register(&request).await {
                Ok(payload) => {
                    info!(response = %payload, "registration accepted");
                    controller.apply_success(payload, generation).await
                }
                Err(err) => {
                    warn!(error = %err, "registration failed");
                    controller.apply_failure(err).await
                }
            }
        });

        match attempt.await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                error!(error = %err, "registration task did not complete");
                let outcome = SubmissionOutcome::Unexpected(err.to_string());
                self.inner.lock().await.finish(outcome.clone());
                Ok(outcome)
            }
        }
    }

    async fn apply_success(&self, payload: serde_json::Value, generation: u64) -> SubmissionOutcome {
        let outcome = SubmissionOutcome::Success(payload);
        self.host.notify_success(REGISTER_SUCCESS_MESSAGE);

        let still_showing = {
            let mut state = self.inner.lock().await;
            let still_showing = state.modal.is_current(generation);
            if still_showing {
                state.fields.reset();
            } else {
                info!("dialog was dismissed during submission; leaving current form alone");
            }
            state.finish(outcome.clone());
            still_showing
        };

        self.host.on_register_success();

        if still_showing {
            let closed = self.inner.lock().await.modal.close();
            if closed {
                self.host.request_close();
            }
        }
        outcome
    }

    async fn apply_failure(&self, err: TransportError) -> SubmissionOutcome {
        let outcome = SubmissionOutcome::from_transport(err);
        if let Some(text) = outcome.alert_text() {
            self.host.notify_error(&text);
        }
        self.inner.lock().await.finish(outcome.clone());
        outcome
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
