//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Maximum label length accepted on the command line
pub const MAX_LABEL_LENGTH: usize = 200;

/// Validate a node ID.
///
/// Ids are opaque strings, but they must be non-empty and must not contain
/// whitespace so they survive shell quoting and text output.
pub fn validate_node_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Node ID cannot be empty".to_string());
    }

    if s.chars().any(char::is_whitespace) {
        return Err(format!("Invalid node ID '{s}': whitespace is not allowed"));
    }

    Ok(s.to_string())
}

/// Validate a node label.
pub fn validate_label(s: &str) -> Result<String, String> {
    if s.chars().count() > MAX_LABEL_LENGTH {
        return Err(format!(
            "Label cannot exceed {MAX_LABEL_LENGTH} characters"
        ));
    }
    Ok(s.to_string())
}

/// Validate a node type name.
///
/// Delegates to the config validator in `commands::init`.
pub fn validate_node_type(s: &str) -> Result<String, String> {
    use crate::commands::init;

    let trimmed = s.trim();
    init::validate_node_type(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Validate a canvas coordinate or pan offset (must be finite).
pub fn validate_coordinate(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid coordinate '{s}': expected a number"))?;
    if !value.is_finite() {
        return Err(format!("Invalid coordinate '{s}': must be a finite number"));
    }
    Ok(value)
}

/// Validate a zoom factor (finite and strictly positive).
pub fn validate_zoom(s: &str) -> Result<f64, String> {
    let zoom: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid zoom '{s}': expected a number"))?;
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(format!("Invalid zoom '{s}': must be greater than 0"));
    }
    Ok(zoom)
}
