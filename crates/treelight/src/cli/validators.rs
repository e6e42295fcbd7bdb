//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Validate a language name.
///
/// Delegates to the provider validator so the CLI accepts exactly the names
/// that can form artifact paths.
pub fn validate_language(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    crate::provider::validate_language_name(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Validate a class prefix.
pub fn validate_class_prefix(s: &str) -> Result<String, String> {
    crate::config::validate_class_prefix(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Validate a base URL for the remote source.
pub fn validate_base_url(s: &str) -> Result<String, String> {
    let url = url::Url::parse(s).map_err(|e| format!("Invalid URL '{s}': {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("URL must use http or https, got '{}'", url.scheme()));
    }
    Ok(s.to_string())
}

/// Validate a CSS scope selector.
///
/// Rejects characters that would end the selector or open a declaration
/// block.
pub fn validate_scope(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Scope selector cannot be empty".to_string());
    }
    if trimmed.contains(['{', '}', ';']) {
        return Err(format!("Scope selector '{trimmed}' may not contain '{{', '}}' or ';'"));
    }
    Ok(trimmed.to_string())
}
