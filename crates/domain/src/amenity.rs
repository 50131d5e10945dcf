//! Amenity: a feature a room can offer (wifi, kitchen, parking, …).

use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, RoomHubError, ValidationError};
use crate::id::AmenityId;
use crate::time::{Timestamp, now};

pub const NAME_MAX: usize = 150;
pub const DESCRIPTION_MAX: usize = 150;

/// A feature that can be attached to any number of rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: AmenityId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Amenity {
    /// Create a builder for constructing an [`Amenity`].
    #[must_use]
    pub fn builder() -> AmenityBuilder {
        AmenityBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when `name` is blank or either
    /// text field is too long.
    pub fn validate(&self) -> Result<(), RoomHubError> {
        let mut errors = FieldErrors::default();
        errors.check(ValidationError::check_required("name", &self.name, NAME_MAX));
        if let Some(description) = &self.description {
            errors.check(ValidationError::check_max(
                "description",
                description,
                DESCRIPTION_MAX,
            ));
        }
        errors.into_result()?;
        Ok(())
    }

    /// Merge the supplied fields into this amenity and re-validate.
    ///
    /// Fields left as `None` in the patch are untouched. `updated_at` is
    /// bumped on success.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] if the merged amenity is invalid;
    /// `self` is left unchanged in that case.
    pub fn apply(&mut self, patch: AmenityPatch) -> Result<(), RoomHubError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        next.validate()?;
        next.updated_at = now();
        *self = next;
        Ok(())
    }
}

/// Partial update for an [`Amenity`].
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmenityPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

/// Step-by-step builder for [`Amenity`].
#[derive(Debug, Default)]
pub struct AmenityBuilder {
    id: Option<AmenityId>,
    name: Option<String>,
    description: Option<String>,
}

impl AmenityBuilder {
    #[must_use]
    pub fn id(mut self, id: AmenityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Consume the builder, validate, and return an [`Amenity`].
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] if `name` is missing or a field
    /// is too long.
    pub fn build(self) -> Result<Amenity, RoomHubError> {
        let created_at = now();
        let amenity = Amenity {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            created_at,
            updated_at: created_at,
        };
        amenity.validate()?;
        Ok(amenity)
    }
}
