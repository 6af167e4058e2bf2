//! User identifier validation.
//!
//! # Rules
//! - Non-empty
//! - ASCII decimal digits only (`0`-`9`)
//! - No length bound and no numeric range check; an out-of-range id is the
//!   upstream's problem, not ours
//!
//! # Design Decisions
//! - No regex: a byte scan is enough and cannot backtrack
//! - `UserId` keeps the original text (leading zeros included)

use std::fmt;

use thiserror::Error;

/// Returned when a route parameter is not a valid user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid user ID. Must be a positive integer.")]
pub struct InvalidUserId;

/// Returns true if `id` is a non-empty string of ASCII digits.
pub fn is_valid_user_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// A validated user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Validate `raw` and wrap it.
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidUserId> {
        let raw = raw.into();
        if is_valid_user_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(InvalidUserId)
        }
    }

    /// The identifier exactly as it appeared in the route.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
