//! Shared application state for axum handlers.

use std::sync::Arc;

use roomhub_app::ports::{
    AmenityRepository, CategoryRepository, RoomRepository, UserRepository,
};
use roomhub_app::services::amenity_service::AmenityService;
use roomhub_app::services::category_service::CategoryService;
use roomhub_app::services::room_service::RoomService;
use roomhub_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types. `Clone` only clones the `Arc`
/// wrappers, so the repositories themselves need not be `Clone`.
pub struct AppState<AR, CR, RR, UR> {
    /// Amenity CRUD service.
    pub amenity_service: Arc<AmenityService<AR>>,
    /// Category service.
    pub category_service: Arc<CategoryService<CR>>,
    /// Room service, which also reads categories, amenities, and owners.
    pub room_service: Arc<RoomService<RR, CR, AR, UR>>,
    /// Registration and token authentication.
    pub user_service: Arc<UserService<UR>>,
}

impl<AR, CR, RR, UR> Clone for AppState<AR, CR, RR, UR> {
    fn clone(&self) -> Self {
        Self {
            amenity_service: Arc::clone(&self.amenity_service),
            category_service: Arc::clone(&self.category_service),
            room_service: Arc::clone(&self.room_service),
            user_service: Arc::clone(&self.user_service),
        }
    }
}

impl<AR, CR, RR, UR> AppState<AR, CR, RR, UR>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        amenity_service: AmenityService<AR>,
        category_service: CategoryService<CR>,
        room_service: RoomService<RR, CR, AR, UR>,
        user_service: UserService<UR>,
    ) -> Self {
        Self {
            amenity_service: Arc::new(amenity_service),
            category_service: Arc::new(category_service),
            room_service: Arc::new(room_service),
            user_service: Arc::new(user_service),
        }
    }
}
