//! Required-field completeness check run before submission.

use shared::{
    domain::{Role, RoleId},
    protocol::RegisterRequest,
};
use thiserror::Error;

use crate::field_store::{FormField, RegistrationForm};

pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { missing_fields_present: bool },
}

impl ValidationOutcome {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

/// The form is incomplete. Deliberately carries no per-field detail.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{}", REQUIRED_FIELDS_MESSAGE)]
pub struct ValidationError;

pub fn validate(form: &RegistrationForm) -> ValidationOutcome {
    match validated_request(form) {
        Ok(_) => ValidationOutcome::Valid,
        Err(ValidationError) => ValidationOutcome::Invalid {
            missing_fields_present: true,
        },
    }
}

/// Builds the request body only from a complete form.
pub fn validated_request(form: &RegistrationForm) -> Result<RegisterRequest, ValidationError> {
    if FormField::ALL
        .into_iter()
        .any(|field| form.get(field).is_empty())
    {
        return Err(ValidationError);
    }
    let role_id = form.role.role_id().ok_or(ValidationError)?;

    Ok(RegisterRequest {
        username: form.username.clone(),
        email: form.email.clone(),
        national_id: form.national_id.clone(),
        age: form.age.clone(),
        phone: form.phone.clone(),
        role_id,
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        password: form.password.clone(),
    })
}

/// A role id only counts as selected when the loaded list offers it. An
/// empty list, as left by a failed load, accepts nothing.
pub fn ensure_role_offered(role_id: RoleId, roles: &[Role]) -> Result<(), ValidationError> {
    if roles.iter().any(|role| role.id == role_id) {
        Ok(())
    } else {
        Err(ValidationError)
    }
}
