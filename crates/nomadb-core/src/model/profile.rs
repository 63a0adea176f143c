// crates/nomadb-core/src/model/profile.rs
use crate::error::{NomadError, Result};
use serde::{Deserialize, Serialize};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;

/// A public user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Check a username: ASCII alphanumerics, underscore and hyphen only,
/// [`USERNAME_MIN_LEN`]..=[`USERNAME_MAX_LEN`] characters. Uniqueness is
/// checked separately against the backend.
pub fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(NomadError::Validation(format!(
            "username must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"
        )));
    }
    let ok = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !ok {
        return Err(NomadError::Validation(
            "username may contain only letters, digits, underscore and hyphen".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_username_is_rejected() {
        assert!(validate_username("ab").is_err());
    }

    #[test]
    fn mixed_separator_username_is_accepted() {
        assert!(validate_username("valid_user-1").is_ok());
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(20)).is_ok());
        assert!(validate_username(&"a".repeat(21)).is_err());
    }

    #[test]
    fn non_ascii_and_spaces_are_rejected() {
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("사용자이름").is_err());
        assert!(validate_username("em@il").is_err());
    }
}
