//! Registration form controller: field state, validation, role loading and
//! the submission workflow, independent of any widget toolkit.

pub mod controller;
pub mod events;
pub mod field_store;
pub mod host;
pub mod modal;
pub mod orchestration;
pub mod role_loader;
pub mod validator;

pub use controller::{FormController, SubmissionOutcome, SubmissionPhase, SubmitError};
pub use events::{Alert, AlertKind, UiEvent};
pub use field_store::{FieldNameError, FieldStore, FormField, RegistrationForm, RoleSelection};
pub use host::{ChannelFormHost, FormHost};
pub use orchestration::FormCommand;
pub use validator::{validate, ValidationOutcome};
