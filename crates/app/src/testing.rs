//! In-memory repositories shared by the service tests.
//!
//! Each repository is `Clone` and shares its map, so the same store can be
//! handed to several services the way a connection pool is in production.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use roomhub_domain::amenity::Amenity;
use roomhub_domain::category::Category;
use roomhub_domain::error::RoomHubError;
use roomhub_domain::id::{AmenityId, CategoryId, RoomId, UserId};
use roomhub_domain::room::Room;
use roomhub_domain::user::User;

use crate::ports::{AmenityRepository, CategoryRepository, RoomRepository, UserRepository};

#[derive(Clone, Default)]
pub struct InMemoryAmenityRepo {
    pub store: Arc<Mutex<HashMap<AmenityId, Amenity>>>,
}

impl AmenityRepository for InMemoryAmenityRepo {
    fn create(
        &self,
        amenity: Amenity,
    ) -> impl Future<Output = Result<Amenity, RoomHubError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(amenity.id, amenity.clone());
        async { Ok(amenity) }
    }

    fn get_by_id(
        &self,
        id: AmenityId,
    ) -> impl Future<Output = Result<Option<Amenity>, RoomHubError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Amenity>, RoomHubError>> + Send {
        let result: Vec<Amenity> = self.store.lock().unwrap().values().cloned().collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        amenity: Amenity,
    ) -> impl Future<Output = Result<Amenity, RoomHubError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(amenity.id, amenity.clone());
        async { Ok(amenity) }
    }

    fn delete(&self, id: AmenityId) -> impl Future<Output = Result<(), RoomHubError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCategoryRepo {
    pub store: Arc<Mutex<HashMap<CategoryId, Category>>>,
}

impl CategoryRepository for InMemoryCategoryRepo {
    fn create(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Category, RoomHubError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(category.id, category.clone());
        async { Ok(category) }
    }

    fn get_by_id(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Option<Category>, RoomHubError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Category>, RoomHubError>> + Send {
        let result: Vec<Category> = self.store.lock().unwrap().values().cloned().collect();
        async { Ok(result) }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRoomRepo {
    pub store: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl RoomRepository for InMemoryRoomRepo {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, RoomHubError>> + Send {
        self.store.lock().unwrap().insert(room.id, room.clone());
        async { Ok(room) }
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, RoomHubError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, RoomHubError>> + Send {
        let result: Vec<Room> = self.store.lock().unwrap().values().cloned().collect();
        async { Ok(result) }
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, RoomHubError>> + Send {
        self.store.lock().unwrap().insert(room.id, room.clone());
        async { Ok(room) }
    }

    fn delete(&self, id: RoomId) -> impl Future<Output = Result<(), RoomHubError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepo {
    pub store: Arc<Mutex<HashMap<UserId, User>>>,
}

impl UserRepository for InMemoryUserRepo {
    fn create(&self, user: User) -> impl Future<Output = Result<User, RoomHubError>> + Send {
        self.store.lock().unwrap().insert(user.id, user.clone());
        async { Ok(user) }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, RoomHubError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn find_by_token_hash(
        &self,
        token_hash: &[u8],
    ) -> impl Future<Output = Result<Option<User>, RoomHubError>> + Send {
        let result = self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|user| user.token_hash == token_hash)
            .cloned();
        async { Ok(result) }
    }

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, RoomHubError>> + Send {
        let result = self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|user| user.username == username)
            .cloned();
        async { Ok(result) }
    }
}
