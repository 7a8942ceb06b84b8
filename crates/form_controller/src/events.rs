//! Events the form emits towards its host.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Alert(Alert),
    /// The parent list should reload its data.
    RegisterSucceeded,
    CloseRequested,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Alert(Alert {
                kind: AlertKind::Success,
                ..
            }) => "alert_success",
            Self::Alert(Alert {
                kind: AlertKind::Error,
                ..
            }) => "alert_error",
            Self::RegisterSucceeded => "register_succeeded",
            Self::CloseRequested => "close_requested",
        }
    }
}
