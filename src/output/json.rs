//! JSON output renderer.
//!
//! Outputs the declarative view as-is: `{"blocks": [{"kind": ...}, ...]}`.

use crate::output::ViewRenderer;
use crate::view::View;

/// JSON output renderer.
pub struct JsonRenderer;

impl ViewRenderer for JsonRenderer {
    fn render(&self, view: &View) -> String {
        serde_json::to_string_pretty(view).unwrap_or_else(|_| "{}".to_string())
    }
}
