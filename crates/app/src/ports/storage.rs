//! Storage port: repository traits for persistence.

use std::future::Future;

use roomhub_domain::amenity::Amenity;
use roomhub_domain::category::Category;
use roomhub_domain::error::RoomHubError;
use roomhub_domain::id::{AmenityId, CategoryId, RoomId, UserId};
use roomhub_domain::room::Room;
use roomhub_domain::user::User;

/// Repository for [`Amenity`] records.
pub trait AmenityRepository {
    /// Persist a new amenity.
    fn create(&self, amenity: Amenity)
    -> impl Future<Output = Result<Amenity, RoomHubError>> + Send;

    /// Get an amenity by id.
    fn get_by_id(
        &self,
        id: AmenityId,
    ) -> impl Future<Output = Result<Option<Amenity>, RoomHubError>> + Send;

    /// List every amenity.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Amenity>, RoomHubError>> + Send;

    /// Overwrite an existing amenity.
    fn update(&self, amenity: Amenity)
    -> impl Future<Output = Result<Amenity, RoomHubError>> + Send;

    /// Delete an amenity, detaching it from every room.
    fn delete(&self, id: AmenityId) -> impl Future<Output = Result<(), RoomHubError>> + Send;
}

/// Repository for [`Category`] records.
pub trait CategoryRepository {
    /// Persist a new category.
    fn create(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Category, RoomHubError>> + Send;

    /// Get a category by id.
    fn get_by_id(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Option<Category>, RoomHubError>> + Send;

    /// List every category.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Category>, RoomHubError>> + Send;
}

/// Repository for [`Room`] records and their amenity links.
///
/// `create` and `update` must persist the room row and its full amenity list
/// atomically: either everything is written or nothing is.
pub trait RoomRepository {
    /// Persist a new room together with its amenity links.
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, RoomHubError>> + Send;

    /// Get a room by id, with `amenity_ids` in attachment order.
    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, RoomHubError>> + Send;

    /// List every room.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, RoomHubError>> + Send;

    /// Overwrite an existing room and replace its amenity links.
    fn update(&self, room: Room) -> impl Future<Output = Result<Room, RoomHubError>> + Send;

    /// Delete a room and its amenity links.
    fn delete(&self, id: RoomId) -> impl Future<Output = Result<(), RoomHubError>> + Send;
}

/// Repository for [`User`] accounts.
pub trait UserRepository {
    /// Persist a new user.
    fn create(&self, user: User) -> impl Future<Output = Result<User, RoomHubError>> + Send;

    /// Get a user by id.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, RoomHubError>> + Send;

    /// Find the user whose API token hashes to `token_hash`.
    fn find_by_token_hash(
        &self,
        token_hash: &[u8],
    ) -> impl Future<Output = Result<Option<User>, RoomHubError>> + Send;

    /// Find a user by exact username.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, RoomHubError>> + Send;
}
