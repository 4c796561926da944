use serde::{Deserialize, Serialize};

use crate::scroll::ScrollController;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// The contact overlay. Opening freezes the shared scroll controller so the
/// page cannot move underneath; every close path (button, escape, submit)
/// resumes it. Open/close are idempotent so stop/start always stay balanced.
#[derive(Debug, Default)]
pub struct ContactModal {
    is_open: bool,
    pub form: ContactForm,
}

impl ContactModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self, scroll: &mut ScrollController) {
        if self.is_open {
            return;
        }
        self.is_open = true;
        scroll.stop();
        tracing::debug!("contact modal opened");
    }

    pub fn close(&mut self, scroll: &mut ScrollController) {
        if !self.is_open {
            return;
        }
        self.is_open = false;
        scroll.start();
        tracing::debug!("contact modal closed");
    }

    /// Escape only acts while open.
    pub fn escape_pressed(&mut self, scroll: &mut ScrollController) {
        if self.is_open {
            self.close(scroll);
        }
    }

    /// Submit hands back the filled form, resets the fields and closes.
    pub fn submit(&mut self, scroll: &mut ScrollController) -> ContactForm {
        let submitted = std::mem::take(&mut self.form);
        self.close(scroll);
        submitted
    }
}
