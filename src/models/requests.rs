//! Request DTOs for the cache HTTP API

use serde::Deserialize;
use serde_json::Value;

/// Maximum allowed length of a category or key path segment, in bytes
pub const MAX_SEGMENT_LENGTH: usize = 256;

/// Request body for `PUT /cache/:category/:key`
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store, any JSON
    pub value: Value,
}

/// Checks a category or key taken from the URL path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_segment(name: &str, segment: &str) -> Option<String> {
    if segment.is_empty() {
        return Some(format!("{} cannot be empty", name));
    }
    if segment.len() > MAX_SEGMENT_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} bytes",
            name, MAX_SEGMENT_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let req: SetRequest = serde_json::from_str(r#"{"value": "white"}"#).unwrap();
        assert_eq!(req.value, json!("white"));
    }

    #[test]
    fn test_set_request_any_json_value() {
        let req: SetRequest = serde_json::from_str(r#"{"value": {"year": 2010}}"#).unwrap();
        assert_eq!(req.value["year"], 2010);
    }

    #[test]
    fn test_set_request_missing_value() {
        assert!(serde_json::from_str::<SetRequest>("{}").is_err());
    }

    #[test]
    fn test_validate_empty_segment() {
        assert!(validate_segment("Key", "").is_some());
    }

    #[test]
    fn test_validate_long_segment() {
        let long = "x".repeat(MAX_SEGMENT_LENGTH + 1);
        assert!(validate_segment("Category", &long).is_some());
    }

    #[test]
    fn test_validate_valid_segment() {
        assert!(validate_segment("Key", "color").is_none());
    }
}
