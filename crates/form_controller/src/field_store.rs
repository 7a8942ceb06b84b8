//! Current values of the registration form fields.

use std::{fmt, str::FromStr};

use shared::domain::RoleId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown form field '{0}'")]
pub struct FieldNameError(pub String);

/// Free-text fields of the form. The role is set through
/// [`FieldStore::set_role`] because it is parsed on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Username,
    Email,
    NationalId,
    Age,
    Phone,
    FirstName,
    LastName,
    Password,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        Self::Username,
        Self::Email,
        Self::NationalId,
        Self::Age,
        Self::Phone,
        Self::FirstName,
        Self::LastName,
        Self::Password,
    ];

    pub const ROLE_WIRE_NAME: &'static str = "Rol_persona";

    /// Name used by the registration endpoint and by host input controls.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::NationalId => "Cedula_persona",
            Self::Age => "Edad_persona",
            Self::Phone => "Telefono_persona",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FormField {
    type Err = FieldNameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == name)
            .ok_or_else(|| FieldNameError(name.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleSelection {
    #[default]
    Unset,
    Selected(RoleId),
    /// Raw selector value that is not an integer.
    Invalid(String),
}

impl RoleSelection {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::Unset;
        }
        match raw.parse::<i64>() {
            Ok(id) => Self::Selected(RoleId(id)),
            Err(_) => Self::Invalid(raw.to_string()),
        }
    }

    /// The chosen role, if it is a usable foreign key. Zero counts as no
    /// selection.
    pub fn role_id(&self) -> Option<RoleId> {
        match self {
            Self::Selected(id) if id.0 != 0 => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub national_id: String,
    pub age: String,
    pub phone: String,
    pub role: RoleSelection,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::NationalId => &self.national_id,
            FormField::Age => &self.age,
            FormField::Phone => &self.phone,
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Password => &self.password,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::NationalId => &mut self.national_id,
            FormField::Age => &mut self.age,
            FormField::Phone => &mut self.phone,
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Password => &mut self.password,
        }
    }
}

/// Owns the form for one open dialog.
///
/// The inline validation message lives here too, since typing into a field
/// is what clears it.
#[derive(Debug, Default)]
pub struct FieldStore {
    form: RegistrationForm,
    error: Option<String>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces one field. A non-empty value also clears the displayed
    /// validation message; submit still re-validates everything.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.error = None;
        }
        *self.form.slot_mut(field) = value;
    }

    pub fn set_role(&mut self, raw: &str) -> &RoleSelection {
        self.form.role = RoleSelection::parse(raw);
        &self.form.role
    }

    pub fn snapshot(&self) -> RegistrationForm {
        self.form.clone()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn reset(&mut self) {
        self.form = RegistrationForm::default();
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}
