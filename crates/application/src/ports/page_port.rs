//! Page ports
//!
//! The core never touches a page directly: it reads dropdowns through
//! [`ControlSource`] and writes text through [`OutputSink`].

use domain::{DomainError, Page, SelectControl};

/// Read access to named dropdown controls
pub trait ControlSource {
    /// Look up a control by id
    fn control(&self, id: &str) -> Option<&SelectControl>;
}

/// Write access to named output elements
pub trait OutputSink {
    /// Replace the full text of an output element
    ///
    /// # Errors
    ///
    /// Returns `TargetNotFound` if the element does not exist.
    fn replace_text(&mut self, target_id: &str, text: String) -> Result<(), DomainError>;
}

impl ControlSource for Page {
    fn control(&self, id: &str) -> Option<&SelectControl> {
        Page::control(self, id)
    }
}

impl OutputSink for Page {
    fn replace_text(&mut self, target_id: &str, text: String) -> Result<(), DomainError> {
        self.set_output_text(target_id, text)
    }
}
