//! Collaborators the form drives: alerts, the parent view and the dialog.

use crossbeam_channel::{Sender, TrySendError};
use tracing::{debug, warn};

use crate::events::{Alert, UiEvent};

/// Everything the host must provide. All calls are fire-and-forget.
pub trait FormHost: Send + Sync {
    fn notify_success(&self, text: &str);
    fn notify_error(&self, text: &str);
    /// Called once per accepted registration, before the dialog closes.
    fn on_register_success(&self);
    fn request_close(&self);
}

/// Forwards every callback as a [`UiEvent`] on a bounded queue.
#[derive(Clone)]
pub struct ChannelFormHost {
    ui_tx: Sender<UiEvent>,
}

impl ChannelFormHost {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }

    fn emit(&self, event: UiEvent) {
        let event_name = event.name();
        match self.ui_tx.try_send(event) {
            Ok(()) => debug!(event = event_name, "queued form->ui event"),
            Err(TrySendError::Full(_)) => {
                warn!(event = event_name, "ui event queue is full; dropping event");
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(event = event_name, "ui event receiver disconnected; dropping event");
            }
        }
    }
}

impl FormHost for ChannelFormHost {
    fn notify_success(&self, text: &str) {
        self.emit(UiEvent::Alert(Alert::success(text)));
    }

    fn notify_error(&self, text: &str) {
        self.emit(UiEvent::Alert(Alert::error(text)));
    }

    fn on_register_success(&self) {
        self.emit(UiEvent::RegisterSucceeded);
    }

    fn request_close(&self) {
        self.emit(UiEvent::CloseRequested);
    }
}
