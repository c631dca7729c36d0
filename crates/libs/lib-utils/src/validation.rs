//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty or whitespace-only.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("jsmith", "username").is_ok());
        assert_eq!(
            validate_not_empty("   ", "username"),
            Err("username cannot be empty".to_string())
        );
    }
}
