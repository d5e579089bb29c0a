//! Boundary validation for identity and banner inputs.
//!
//! Everything here runs before any store access; failures are always
//! [`CoreError::Validation`].

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Logins are restricted to ASCII letters and digits.
pub const LOGIN_PATTERN: &str = r"^[a-zA-Z0-9]+$";

pub const MAX_LOGIN_LENGTH: usize = 64;
pub const MAX_PASSWORD_LENGTH: usize = 256;

static LOGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LOGIN_PATTERN).expect("valid regex"));

/// Validate a login against the alphanumeric class.
pub fn validate_login(login: &str) -> Result<(), CoreError> {
    if login.len() > MAX_LOGIN_LENGTH || !LOGIN_RE.is_match(login) {
        return Err(CoreError::Validation(format!(
            "Login must be 1-{MAX_LOGIN_LENGTH} letters or digits"
        )));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.is_empty() || password.len() > MAX_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be 1-{MAX_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Validate a positive identifier such as `feature_id` or `tag_id`.
pub fn validate_positive_id(field: &str, value: i64) -> Result<(), CoreError> {
    if value <= 0 {
        return Err(CoreError::Validation(format!(
            "invalid or missing '{field}' parameter"
        )));
    }
    Ok(())
}

pub fn validate_limit(limit: i64) -> Result<(), CoreError> {
    if limit < 1 {
        return Err(CoreError::Validation(
            "Limit must be a positive number".into(),
        ));
    }
    Ok(())
}

pub fn validate_offset(offset: i64) -> Result<(), CoreError> {
    if offset < 0 {
        return Err(CoreError::Validation("Offset must be non-negative".into()));
    }
    Ok(())
}

/// Validate a tag set for a banner write and return it sorted and deduplicated.
pub fn normalize_tag_ids(tag_ids: &[i64]) -> Result<Vec<i64>, CoreError> {
    if tag_ids.is_empty() {
        return Err(CoreError::Validation(
            "A banner needs at least one tag".into(),
        ));
    }
    for &id in tag_ids {
        validate_positive_id("tag_id", id)?;
    }
    let mut tags = tag_ids.to_vec();
    tags.sort_unstable();
    tags.dedup();
    Ok(tags)
}

/// Banner content must be a JSON object.
pub fn validate_content(content: &serde_json::Value) -> Result<(), CoreError> {
    if !content.is_object() {
        return Err(CoreError::Validation(
            "Banner content must be a JSON object".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_alphanumeric_logins() {
        for login in ["alice", "Bob42", "X", "007"] {
            assert!(validate_login(login).is_ok(), "{login} should be valid");
        }
    }

    #[test]
    fn rejects_non_alphanumeric_logins() {
        for login in ["", "alice smith", "bob_1", "eve@mail", "ümlaut", "a-b"] {
            assert_matches!(validate_login(login), Err(CoreError::Validation(_)));
        }
    }

    #[test]
    fn rejects_overlong_login() {
        let login = "a".repeat(MAX_LOGIN_LENGTH + 1);
        assert_matches!(validate_login(&login), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_password_rejected() {
        assert_matches!(validate_password(""), Err(CoreError::Validation(_)));
        assert!(validate_password("pw1").is_ok());
    }

    #[test]
    fn boundary_ids_and_paging() {
        assert_matches!(validate_positive_id("tag_id", 0), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_positive_id("feature_id", -1),
            Err(CoreError::Validation(_))
        );
        assert!(validate_positive_id("tag_id", 1).is_ok());
        assert_matches!(validate_limit(0), Err(CoreError::Validation(_)));
        assert!(validate_limit(1).is_ok());
        assert_matches!(validate_offset(-1), Err(CoreError::Validation(_)));
        assert!(validate_offset(0).is_ok());
    }

    #[test]
    fn tag_ids_are_sorted_and_deduplicated() {
        assert_eq!(normalize_tag_ids(&[3, 1, 3, 2]).unwrap(), vec![1, 2, 3]);
        assert_matches!(normalize_tag_ids(&[]), Err(CoreError::Validation(_)));
        assert_matches!(normalize_tag_ids(&[1, 0]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn content_must_be_object() {
        assert!(validate_content(&serde_json::json!({"title": "x"})).is_ok());
        assert_matches!(
            validate_content(&serde_json::json!("text")),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_content(&serde_json::json!([1, 2])),
            Err(CoreError::Validation(_))
        );
    }
}
