// crates/nomadb-core/src/error.rs

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, NomadError>;

/// Unified error type for the directory engine.
///
/// Every operation on the service traits returns this through [`Result`],
/// so callers pattern-match on the failure instead of null-checking. The
/// `Display` output is the user-facing message; no internal backend codes
/// leak through it.
#[derive(Debug, Error)]
pub enum NomadError {
    /// An entity (slug, city id, review, profile) does not exist.
    ///
    /// Surfaced distinctly from generic failures so frontends can render a
    /// not-found view instead of an error banner.
    #[error("not found: {0}")]
    NotFound(String),

    /// A mutation was attempted by an anonymous caller.
    #[error("login required")]
    LoginRequired,

    /// Input rejected before any backend write (rating bounds, username
    /// format, slug format).
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation (duplicate review, taken username, taken slug).
    #[error("{0}")]
    Conflict(String),

    /// Remote/backend failure normalized to a readable message.
    #[error("backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("dataset parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "remote")]
    #[error("dataset fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl NomadError {
    /// True for the not-found variant; convenience for frontends deciding
    /// between a 404-style view and a generic failure banner.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, NomadError::NotFound(_))
    }

    /// True for failures the user can fix by changing input or logging in.
    #[inline]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            NomadError::LoginRequired | NomadError::Validation(_) | NomadError::Conflict(_)
        )
    }
}
