//! Amenity service: use-cases for managing amenities.

use roomhub_domain::amenity::{Amenity, AmenityPatch};
use roomhub_domain::error::{NotFoundError, RoomHubError};
use roomhub_domain::id::AmenityId;

use crate::ports::AmenityRepository;

/// Application service for amenity CRUD operations.
pub struct AmenityService<R> {
    repo: R,
}

impl<R: AmenityRepository> AmenityService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new amenity after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, amenity), fields(amenity_name = %amenity.name))]
    pub async fn create_amenity(&self, amenity: Amenity) -> Result<Amenity, RoomHubError> {
        amenity.validate()?;
        self.repo.create(amenity).await
    }

    /// Look up an amenity by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotFound`] when no amenity with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_amenity(&self, id: AmenityId) -> Result<Amenity, RoomHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Amenity",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all amenities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_amenities(&self) -> Result<Vec<Amenity>, RoomHubError> {
        self.repo.get_all().await
    }

    /// Merge `patch` into the stored amenity and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotFound`] when the amenity is missing,
    /// [`RoomHubError::Validation`] if the merged amenity is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_amenity(
        &self,
        id: AmenityId,
        patch: AmenityPatch,
    ) -> Result<Amenity, RoomHubError> {
        let mut amenity = self.get_amenity(id).await?;
        amenity.apply(patch)?;
        self.repo.update(amenity).await
    }

    /// Delete an amenity by id.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotFound`] when the amenity is missing, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_amenity(&self, id: AmenityId) -> Result<(), RoomHubError> {
        self.get_amenity(id).await?;
        self.repo.delete(id).await
    }
}
