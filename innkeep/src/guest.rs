//! Guest entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier for a guest row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(i64);

impl GuestId {
    /// Creates a guest id from a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input for creating a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGuest {
    /// Guest name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl NewGuest {
    /// Creates guest input from name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Requires name and email to be non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation {
                field: "name".to_string(),
                message: "must be non-empty".to_string(),
            });
        }
        if self.email.trim().is_empty() {
            return Err(Error::Validation {
                field: "email".to_string(),
                message: "must be non-empty".to_string(),
            });
        }
        Ok(())
    }
}

/// A stored guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    id: GuestId,
    name: String,
    email: String,
    number_of_reservations: i64,
}

impl Guest {
    /// Assembles a guest from stored fields.
    #[must_use]
    pub const fn new(id: GuestId, name: String, email: String, number_of_reservations: i64) -> Self {
        Self {
            id,
            name,
            email,
            number_of_reservations,
        }
    }

    /// The guest's row id.
    #[must_use]
    pub const fn id(&self) -> GuestId {
        self.id
    }

    /// Guest name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// How many reservations this guest holds or has held.
    #[must_use]
    pub const fn number_of_reservations(&self) -> i64 {
        self.number_of_reservations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_guest() {
        assert!(NewGuest::new("Ada Lovelace", "ada@example.com").validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = NewGuest::new("   ", "ada@example.com").validate().unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "name"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_email_rejected() {
        let err = NewGuest::new("Ada Lovelace", "").validate().unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "email"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
