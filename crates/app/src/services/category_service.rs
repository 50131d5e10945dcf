//! Category service: use-cases for reading and creating categories.

use roomhub_domain::category::Category;
use roomhub_domain::error::{NotFoundError, RoomHubError};
use roomhub_domain::id::CategoryId;

use crate::ports::CategoryRepository;

/// Application service for categories.
pub struct CategoryService<R> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new category after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, category), fields(category_name = %category.name, kind = %category.kind))]
    pub async fn create_category(&self, category: Category) -> Result<Category, RoomHubError> {
        category.validate()?;
        self.repo.create(category).await
    }

    /// Look up a category by id.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotFound`] when no category with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, RoomHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Category",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RoomHubError> {
        self.repo.get_all().await
    }
}
