//! Queued host commands mapped onto the controller.

use std::sync::Arc;

use tracing::debug;

use crate::{
    controller::{FormController, SubmissionOutcome, SubmitError},
    field_store::{FieldNameError, FormField},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Activate,
    Open,
    Close,
    SetField { field: FormField, value: String },
    SetRole { raw: String },
    Submit,
}

impl FormCommand {
    /// Builds an edit command from a host control name, e.g. `Cedula_persona`.
    pub fn edit(name: &str, value: impl Into<String>) -> Result<Self, FieldNameError> {
        let value = value.into();
        if name == FormField::ROLE_WIRE_NAME {
            return Ok(Self::SetRole { raw: value });
        }
        Ok(Self::SetField {
            field: name.parse()?,
            value,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Open => "open",
            Self::Close => "close",
            Self::SetField { .. } => "set_field",
            Self::SetRole { .. } => "set_role",
            Self::Submit => "submit",
        }
    }
}

impl FormController {
    /// Applies one command. Only `Submit` yields an outcome; a failed role
    /// load has already been reported to the host and is not an error here.
    pub async fn dispatch(
        self: &Arc<Self>,
        cmd: FormCommand,
    ) -> Result<Option<SubmissionOutcome>, SubmitError> {
        debug!(command = cmd.name(), "dispatching form command");
        match cmd {
            FormCommand::Activate => match self.activate().await {
                Ok(roles) => debug!(count = roles.len(), "activate command loaded roles"),
                Err(err) => debug!(error = %err, "activate command left role list empty"),
            },
            FormCommand::Open => self.open_dialog().await,
            FormCommand::Close => self.close_dialog().await,
            FormCommand::SetField { field, value } => self.set_field(field, value).await,
            FormCommand::SetRole { raw } => {
                self.set_role(&raw).await;
            }
            FormCommand::Submit => return self.submit().await.map(Some),
        }
        Ok(None)
    }
}
