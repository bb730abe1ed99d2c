//! Output renderers: terminal and JSON.

pub mod json;
pub mod terminal;

use crate::view::View;

pub use json::JsonRenderer;
pub use terminal::TerminalRenderer;

/// Trait for rendering a view to an output format.
pub trait ViewRenderer {
    /// Render the view to a string.
    fn render(&self, view: &View) -> String;
}
