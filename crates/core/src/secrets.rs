//! Secrets file parsing
//!
//! The secrets file is a flat TOML table, for example:
//!
//! ```toml
//! GEMINI_API_KEY = "AIza..."
//! ```

/// Name of the API key entry, both as environment variable and TOML key.
pub const API_KEY_NAME: &str = "GEMINI_API_KEY";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SecretsError {
    #[error("Secrets file is not valid TOML: {0}")]
    InvalidToml(String),

    #[error("Secrets entry '{0}' must be a string")]
    NotAString(String),
}

/// Read the API key out of secrets file contents.
///
/// Returns `Ok(None)` when the entry is absent or blank.
pub fn parse_api_key(contents: &str) -> Result<Option<String>, SecretsError> {
    let table: toml::Table =
        toml::from_str(contents).map_err(|e| SecretsError::InvalidToml(e.to_string()))?;

    match table.get(API_KEY_NAME) {
        None => Ok(None),
        Some(toml::Value::String(key)) => Ok(non_blank(key)),
        Some(_) => Err(SecretsError::NotAString(API_KEY_NAME.to_string())),
    }
}

/// Pick the API key: an explicit value wins over the secrets file.
///
/// Blank values count as absent.
pub fn resolve_api_key(explicit: Option<&str>, from_file: Option<String>) -> Option<String> {
    explicit
        .and_then(non_blank)
        .or_else(|| from_file.as_deref().and_then(non_blank))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_key_present() {
        let contents = "GEMINI_API_KEY = \"abc123\"\nOTHER = 1\n";
        assert_eq!(parse_api_key(contents).unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn test_parse_api_key_absent() {
        assert_eq!(parse_api_key("OTHER = \"x\"").unwrap(), None);
        assert_eq!(parse_api_key("").unwrap(), None);
    }

    #[test]
    fn test_parse_api_key_blank() {
        assert_eq!(parse_api_key("GEMINI_API_KEY = \"  \"").unwrap(), None);
    }

    #[test]
    fn test_parse_api_key_wrong_type() {
        assert_eq!(
            parse_api_key("GEMINI_API_KEY = 42").unwrap_err(),
            SecretsError::NotAString("GEMINI_API_KEY".to_string())
        );
    }

    #[test]
    fn test_parse_api_key_invalid_toml() {
        assert!(matches!(
            parse_api_key("GEMINI_API_KEY = ").unwrap_err(),
            SecretsError::InvalidToml(_)
        ));
    }

    #[test]
    fn test_resolve_prefers_explicit() {
        assert_eq!(
            resolve_api_key(Some("env-key"), Some("file-key".to_string())),
            Some("env-key".to_string())
        );
    }

    #[test]
    fn test_resolve_falls_back_to_file_when_explicit_blank() {
        assert_eq!(
            resolve_api_key(Some(""), Some("file-key".to_string())),
            Some("file-key".to_string())
        );
    }

    #[test]
    fn test_resolve_none() {
        assert_eq!(resolve_api_key(None, None), None);
        assert_eq!(resolve_api_key(Some(" "), Some(String::new())), None);
    }
}
