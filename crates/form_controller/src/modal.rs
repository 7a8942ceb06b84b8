//! Visibility of the dialog that hosts the form.

/// Open flag plus a generation that changes on every open and close, so a
/// submission can tell whether the dialog it started in is still showing.
#[derive(Debug, Default)]
pub struct ModalLifecycle {
    open: bool,
    generation: u64,
}

impl ModalLifecycle {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the dialog opened at `generation` is still showing.
    pub fn is_current(&self, generation: u64) -> bool {
        self.open && self.generation == generation
    }

    pub fn open(&mut self) -> u64 {
        if !self.open {
            self.open = true;
            self.generation += 1;
        }
        self.generation
    }

    /// Returns false when the dialog was already closed.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.generation += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_starts_a_new_generation() {
        let mut modal = ModalLifecycle::default();
        assert!(!modal.is_open());

        let first = modal.open();
        assert!(modal.is_current(first));
        assert_eq!(modal.open(), first);

        assert!(modal.close());
        assert!(!modal.close());
        assert!(!modal.is_current(first));

        let second = modal.open();
        assert_ne!(first, second);
        assert!(!modal.is_current(first));
        assert!(modal.is_current(second));
    }
}
