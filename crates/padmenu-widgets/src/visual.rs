#![forbid(unsafe_code)]

//! Seams to the engine's rendering layer.
//!
//! The menu constructs text and button visuals through a
//! [`VisualFactory`] and afterwards only ever calls the trait surface:
//! visual-state transitions, `render`, and a final `release`. What a
//! visual does with those calls (procedural shader parameters, glyph
//! atlases, instanced uniform buffers) is the engine's business.

use std::error::Error;
use std::fmt;

use padmenu_core::style::TextStyle;

/// Error from releasing an engine resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseError {
    /// What failed to release, for teardown logs.
    pub resource: String,
    /// Engine-side detail.
    pub message: String,
}

impl ReleaseError {
    /// Create a release error.
    #[must_use]
    pub fn new(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ReleaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to release {}: {}", self.resource, self.message)
    }
}

impl Error for ReleaseError {}

/// An engine object that must be released exactly once at teardown.
pub trait Resource {
    /// Release the underlying engine resources.
    fn release(&mut self) -> Result<(), ReleaseError>;
}

/// Interactive button visual with three mutually exclusive states.
pub trait ButtonVisual: Resource {
    /// Highlight as the focused entry of an active pane.
    fn set_state_focused(&mut self);
    /// Mark as the current selection.
    fn set_state_selected(&mut self);
    /// Clear selection/focus styling.
    fn set_state_unselected(&mut self);
    /// Submit this button's draw call.
    fn render(&mut self);
}

/// Rendered text label.
pub trait TextVisual: Resource {
    /// Submit this label's draw call.
    fn render(&mut self);
}

/// Engine-side constructor for menu visuals.
pub trait VisualFactory {
    /// Create a label for `text` in the given style.
    fn create_text(&mut self, text: &str, style: &TextStyle) -> Box<dyn TextVisual>;

    /// Create a button background visual.
    fn create_button(&mut self) -> Box<dyn ButtonVisual>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_error_display_names_the_resource() {
        let err = ReleaseError::new("menu_button", "shader still bound");
        assert_eq!(
            err.to_string(),
            "failed to release menu_button: shader still bound"
        );
    }
}
