//! Request DTOs for the diagnostics API

use serde::Deserialize;

/// Request body for POST /invalidate
///
/// # Fields
/// - `pattern`: an exact key, or a fragment followed by `*`
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    pub pattern: String,
}

impl InvalidateRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.pattern.is_empty() {
            return Some("Pattern cannot be empty".to_string());
        }
        None
    }
}
