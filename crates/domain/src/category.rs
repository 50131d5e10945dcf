//! Category: classifies listings as either rooms or experiences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RoomHubError, ValidationError};
use crate::id::CategoryId;
use crate::time::{Timestamp, now};

pub const NAME_MAX: usize = 50;

/// Which kind of listing a category applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Rooms,
    Experiences,
}

impl CategoryKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rooms => "rooms",
            Self::Experiences => "experiences",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown category kind string.
#[derive(Debug, thiserror::Error)]
#[error("unknown category kind: {0}")]
pub struct UnknownCategoryKind(String);

impl FromStr for CategoryKind {
    type Err = UnknownCategoryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rooms" => Ok(Self::Rooms),
            "experiences" => Ok(Self::Experiences),
            other => Err(UnknownCategoryKind(other.to_string())),
        }
    }
}

/// A named classification that rooms (or experiences) are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub kind: CategoryKind,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    /// Create a new category with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when `name` is blank or too long.
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Result<Self, RoomHubError> {
        let created_at = now();
        let category = Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
            created_at,
            updated_at: created_at,
        };
        category.validate()?;
        Ok(category)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when `name` is blank or too long.
    pub fn validate(&self) -> Result<(), RoomHubError> {
        ValidationError::check_required("name", &self.name, NAME_MAX)?;
        Ok(())
    }

    /// Whether rooms may be filed under this category.
    #[must_use]
    pub fn accepts_rooms(&self) -> bool {
        self.kind == CategoryKind::Rooms
    }
}
