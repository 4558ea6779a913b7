//! Input validation utilities
//!
//! Refinement checks beyond request shape; all of them run before any store
//! access.

/// Validate a caption session name
pub fn validate_session_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Session name is required".to_string());
    }

    Ok(())
}

/// Validate caption text
pub fn validate_caption_text(text: &str) -> Result<(), String> {
    if text.is_empty() {
        return Err("Caption text is required".to_string());
    }

    Ok(())
}

/// Validate a template body
pub fn validate_template_body(body: &str) -> Result<(), String> {
    if body.is_empty() {
        return Err("Template body is required".to_string());
    }

    Ok(())
}
