//! `SQLite` implementation of [`RoomRepository`].
//!
//! Amenity links live in `room_amenities` with an explicit `position` so the
//! attachment order survives a round-trip. Room writes run in a transaction
//! covering both tables.

use std::collections::HashMap;
use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, Transaction};

use roomhub_app::ports::RoomRepository;
use roomhub_domain::error::RoomHubError;
use roomhub_domain::id::{AmenityId, RoomId};
use roomhub_domain::room::Room;

use crate::decode;
use crate::error::StorageError;

/// Room row without its amenity links.
struct Wrapper(Room);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Room {
            id: decode::parsed(row, "id")?,
            owner_id: decode::parsed(row, "owner_id")?,
            category_id: decode::parsed(row, "category_id")?,
            amenity_ids: Vec::new(),
            name: row.try_get("name")?,
            country: row.try_get("country")?,
            city: row.try_get("city")?,
            price: row.try_get("price")?,
            rooms: row.try_get("rooms")?,
            toilets: row.try_get("toilets")?,
            description: row.try_get("description")?,
            address: row.try_get("address")?,
            pet_friendly: row.try_get("pet_friendly")?,
            kind: decode::parsed(row, "kind")?,
            created_at: decode::timestamp(row, "created_at")?,
            updated_at: decode::timestamp(row, "updated_at")?,
        }))
    }
}

/// One `room_amenities` row.
struct Link {
    room_id: RoomId,
    amenity_id: AmenityId,
}

impl<'r> FromRow<'r, SqliteRow> for Link {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            room_id: decode::parsed(row, "room_id")?,
            amenity_id: decode::parsed(row, "amenity_id")?,
        })
    }
}

const INSERT: &str = r"
    INSERT INTO rooms (
        id, owner_id, category_id, name, country, city, price, rooms, toilets,
        description, address, pet_friendly, kind, created_at, updated_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM rooms WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM rooms ORDER BY created_at, id";
const UPDATE: &str = r"
    UPDATE rooms
    SET category_id = ?, name = ?, country = ?, city = ?, price = ?, rooms = ?,
        toilets = ?, description = ?, address = ?, pet_friendly = ?, kind = ?,
        updated_at = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM rooms WHERE id = ?";

const INSERT_LINK: &str =
    "INSERT INTO room_amenities (room_id, amenity_id, position) VALUES (?, ?, ?)";
const DELETE_LINKS: &str = "DELETE FROM room_amenities WHERE room_id = ?";
const SELECT_LINKS_BY_ROOM: &str =
    "SELECT room_id, amenity_id FROM room_amenities WHERE room_id = ? ORDER BY position";
const SELECT_ALL_LINKS: &str =
    "SELECT room_id, amenity_id FROM room_amenities ORDER BY room_id, position";

/// `SQLite`-backed room repository.
pub struct SqliteRoomRepository {
    pool: SqlitePool,
}

impl SqliteRoomRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_links(
    tx: &mut Transaction<'_, Sqlite>,
    room: &Room,
) -> Result<(), StorageError> {
    for (position, amenity_id) in (0_i64..).zip(&room.amenity_ids) {
        sqlx::query(INSERT_LINK)
            .bind(room.id.to_string())
            .bind(amenity_id.to_string())
            .bind(position)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

impl RoomRepository for SqliteRoomRepository {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, RoomHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            sqlx::query(INSERT)
                .bind(room.id.to_string())
                .bind(room.owner_id.to_string())
                .bind(room.category_id.to_string())
                .bind(&room.name)
                .bind(&room.country)
                .bind(&room.city)
                .bind(room.price)
                .bind(room.rooms)
                .bind(room.toilets)
                .bind(&room.description)
                .bind(&room.address)
                .bind(room.pet_friendly)
                .bind(room.kind.as_str())
                .bind(room.created_at.to_rfc3339())
                .bind(room.updated_at.to_rfc3339())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            insert_links(&mut tx, &room).await?;
            tx.commit().await.map_err(StorageError::from)?;

            Ok(room)
        }
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, RoomHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            let Some(Wrapper(mut room)) = row else {
                return Ok(None);
            };

            let links: Vec<Link> = sqlx::query_as(SELECT_LINKS_BY_ROOM)
                .bind(id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;
            room.amenity_ids = links.into_iter().map(|link| link.amenity_id).collect();

            Ok(Some(room))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, RoomHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;
            let links: Vec<Link> = sqlx::query_as(SELECT_ALL_LINKS)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let mut by_room: HashMap<RoomId, Vec<AmenityId>> = HashMap::new();
            for link in links {
                by_room.entry(link.room_id).or_default().push(link.amenity_id);
            }

            Ok(rows
                .into_iter()
                .map(|Wrapper(mut room)| {
                    room.amenity_ids = by_room.remove(&room.id).unwrap_or_default();
                    room
                })
                .collect())
        }
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, RoomHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            sqlx::query(UPDATE)
                .bind(room.category_id.to_string())
                .bind(&room.name)
                .bind(&room.country)
                .bind(&room.city)
                .bind(room.price)
                .bind(room.rooms)
                .bind(room.toilets)
                .bind(&room.description)
                .bind(&room.address)
                .bind(room.pet_friendly)
                .bind(room.kind.as_str())
                .bind(room.updated_at.to_rfc3339())
                .bind(room.id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            sqlx::query(DELETE_LINKS)
                .bind(room.id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            insert_links(&mut tx, &room).await?;

            tx.commit().await.map_err(StorageError::from)?;

            Ok(room)
        }
    }

    fn delete(&self, id: RoomId) -> impl Future<Output = Result<(), RoomHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use crate::{SqliteAmenityRepository, SqliteCategoryRepository, SqliteUserRepository};
    use roomhub_app::ports::{AmenityRepository, CategoryRepository, UserRepository};
    use roomhub_domain::amenity::Amenity;
    use roomhub_domain::category::{Category, CategoryKind};
    use roomhub_domain::room::{RoomFields, RoomKind};
    use roomhub_domain::user::User;

    struct Setup {
        pool: SqlitePool,
        repo: SqliteRoomRepository,
        amenities: SqliteAmenityRepository,
        owner: User,
        category: Category,
    }

    async fn setup() -> Setup {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();

        let owner = User::register("host").unwrap().user;
        SqliteUserRepository::new(pool.clone())
            .create(owner.clone())
            .await
            .unwrap();
        let category = Category::new("Cabins", CategoryKind::Rooms).unwrap();
        SqliteCategoryRepository::new(pool.clone())
            .create(category.clone())
            .await
            .unwrap();

        Setup {
            repo: SqliteRoomRepository::new(pool.clone()),
            amenities: SqliteAmenityRepository::new(pool.clone()),
            pool,
            owner,
            category,
        }
    }

    async fn amenity(s: &Setup, name: &str) -> AmenityId {
        let amenity = Amenity::builder().name(name).build().unwrap();
        let id = amenity.id;
        s.amenities.create(amenity).await.unwrap();
        id
    }

    fn test_room(s: &Setup) -> Room {
        Room::new(
            s.owner.id,
            s.category.id,
            RoomFields {
                name: Some("Hanok stay".to_string()),
                price: Some(120),
                rooms: Some(2),
                toilets: Some(1),
                description: Some("Traditional house".to_string()),
                address: Some("Bukchon-ro 11".to_string()),
                kind: Some(RoomKind::PrivateRoom),
                ..RoomFields::default()
            },
        )
        .unwrap()
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap();
        n
    }

    #[tokio::test]
    async fn should_keep_amenity_order_through_roundtrip() {
        let s = setup().await;
        let pool_id = amenity(&s, "Pool").await;
        let wifi_id = amenity(&s, "Wifi").await;
        let mut room = test_room(&s);
        room.set_amenities([wifi_id, pool_id]);

        s.repo.create(room.clone()).await.unwrap();

        let fetched = s.repo.get_by_id(room.id).await.unwrap().unwrap();
        assert_eq!(fetched, room);
        assert_eq!(fetched.amenity_ids, vec![wifi_id, pool_id]);
    }

    #[tokio::test]
    async fn should_roll_back_room_when_amenity_link_fails() {
        let s = setup().await;
        let wifi_id = amenity(&s, "Wifi").await;
        let mut room = test_room(&s);
        room.set_amenities([wifi_id, AmenityId::new()]);

        let result = s.repo.create(room.clone()).await;

        assert!(matches!(result, Err(RoomHubError::Storage(_))));
        assert!(s.repo.get_by_id(room.id).await.unwrap().is_none());
        assert_eq!(count(&s.pool, "room_amenities").await, 0);
    }

    #[tokio::test]
    async fn should_list_rooms_with_their_amenities() {
        let s = setup().await;
        let wifi_id = amenity(&s, "Wifi").await;
        let mut with_wifi = test_room(&s);
        with_wifi.set_amenities([wifi_id]);
        let bare = test_room(&s);
        s.repo.create(with_wifi.clone()).await.unwrap();
        s.repo.create(bare.clone()).await.unwrap();

        let all = s.repo.get_all().await.unwrap();

        assert_eq!(all.len(), 2);
        let find = |id| all.iter().find(|room| room.id == id).unwrap();
        assert_eq!(find(with_wifi.id).amenity_ids, vec![wifi_id]);
        assert!(find(bare.id).amenity_ids.is_empty());
    }

    #[tokio::test]
    async fn should_replace_amenities_and_fields_on_update() {
        let s = setup().await;
        let wifi_id = amenity(&s, "Wifi").await;
        let pool_id = amenity(&s, "Pool").await;
        let mut room = test_room(&s);
        room.set_amenities([wifi_id]);
        s.repo.create(room.clone()).await.unwrap();

        room.price = 75;
        room.set_amenities([pool_id]);
        s.repo.update(room.clone()).await.unwrap();

        let fetched = s.repo.get_by_id(room.id).await.unwrap().unwrap();
        assert_eq!(fetched.price, 75);
        assert_eq!(fetched.amenity_ids, vec![pool_id]);
    }

    #[tokio::test]
    async fn should_cascade_links_when_room_deleted() {
        let s = setup().await;
        let wifi_id = amenity(&s, "Wifi").await;
        let mut room = test_room(&s);
        room.set_amenities([wifi_id]);
        s.repo.create(room.clone()).await.unwrap();

        s.repo.delete(room.id).await.unwrap();

        assert!(s.repo.get_by_id(room.id).await.unwrap().is_none());
        assert_eq!(count(&s.pool, "room_amenities").await, 0);
        assert!(s.amenities.get_by_id(wifi_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn should_detach_amenity_from_rooms_when_amenity_deleted() {
        let s = setup().await;
        let wifi_id = amenity(&s, "Wifi").await;
        let pool_id = amenity(&s, "Pool").await;
        let mut room = test_room(&s);
        room.set_amenities([wifi_id, pool_id]);
        s.repo.create(room.clone()).await.unwrap();

        s.amenities.delete(wifi_id).await.unwrap();

        let fetched = s.repo.get_by_id(room.id).await.unwrap().unwrap();
        assert_eq!(fetched.amenity_ids, vec![pool_id]);
    }
}
