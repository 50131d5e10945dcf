//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RoomHubError`] via `#[from]`. The HTTP adapter maps every variant to a
//! status code, so adding a variant here means deciding how it is rendered.

use std::collections::BTreeMap;
use std::fmt;

use crate::id::AmenityId;

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum RoomHubError {
    /// A field failed validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The request was well-formed JSON but semantically unusable.
    #[error("parse error")]
    Parse(#[from] ParseError),

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The operation requires an authenticated caller.
    #[error("Authentication credentials were not provided.")]
    NotAuthenticated,

    /// The caller is authenticated but does not own the resource.
    #[error("You do not have permission to perform this action.")]
    PermissionDenied,

    /// A persistence adapter failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No API token could be issued (the OS random source failed).
    #[error("credential error")]
    Credential(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was not supplied.
    #[error("{field}: this field is required")]
    Missing { field: &'static str },

    /// A required text field is missing or empty.
    #[error("{field}: this field may not be blank")]
    Blank { field: &'static str },

    /// A text field exceeds its maximum length (in characters).
    #[error("{field}: ensure this field has no more than {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Another user already registered this username.
    #[error("username: a user with that username already exists")]
    UsernameTaken,

    /// Several fields failed at once.
    #[error("{0}")]
    Fields(FieldErrors),
}

impl ValidationError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } | Self::Blank { field } | Self::TooLong { field, .. } => field,
            Self::UsernameTaken => "username",
            Self::Fields(_) => "fields",
        }
    }

    /// The message without its field prefix.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Missing { .. } => "this field is required".to_string(),
            Self::Blank { .. } => "this field may not be blank".to_string(),
            Self::TooLong { max, .. } => {
                format!("ensure this field has no more than {max} characters")
            }
            Self::UsernameTaken => "a user with that username already exists".to_string(),
            Self::Fields(errors) => errors.to_string(),
        }
    }

    /// Every `(field, message)` pair carried by this error.
    #[must_use]
    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<String>> {
        match self {
            Self::Fields(errors) => errors
                .0
                .iter()
                .map(|(field, errs)| (*field, errs.iter().map(Self::detail).collect()))
                .collect(),
            other => BTreeMap::from([(other.field(), vec![other.detail()])]),
        }
    }

    /// Reject an empty string or one longer than `max` characters.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] or [`ValidationError::TooLong`].
    pub fn check_required(field: &'static str, value: &str, max: usize) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(Self::Blank { field });
        }
        Self::check_max(field, value, max)
    }

    /// Reject a string longer than `max` characters.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooLong`].
    pub fn check_max(field: &'static str, value: &str, max: usize) -> Result<(), Self> {
        if value.chars().count() > max {
            return Err(Self::TooLong { field, max });
        }
        Ok(())
    }
}

/// Collects field failures so a payload reports all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<ValidationError>>);

impl FieldErrors {
    /// Record the failure of `result`, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            self.push(err);
        }
    }

    pub fn push(&mut self, err: ValidationError) {
        match err {
            ValidationError::Fields(inner) => {
                for (field, errs) in inner.0 {
                    self.0.entry(field).or_default().extend(errs);
                }
            }
            leaf => self.0.entry(leaf.field()).or_default().push(leaf),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok` when nothing was recorded, the lone error when there is one,
    /// [`ValidationError::Fields`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns the recorded failures.
    pub fn into_result(mut self) -> Result<(), ValidationError> {
        let count: usize = self.0.values().map(Vec::len).sum();
        match count {
            0 => Ok(()),
            1 => match self.0.pop_first() {
                Some((_, mut errs)) => Err(errs.remove(0)),
                None => Ok(()),
            },
            _ => Err(ValidationError::Fields(self)),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in self.0.values().flatten() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Semantic input errors on room payloads and identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Category is required")]
    CategoryRequired,

    #[error("Category not found")]
    CategoryNotFound,

    #[error("The category kind should be 'rooms'")]
    CategoryKindNotRooms,

    #[error("Amenity with id {0} not found")]
    AmenityNotFound(AmenityId),

    /// A string could not be parsed as the identifier of `resource`.
    #[error("invalid {resource} id: {value}")]
    InvalidId {
        resource: &'static str,
        value: String,
    },
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
