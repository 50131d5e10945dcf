//! Room service: use-cases for listing, creating, updating, and deleting rooms.
//!
//! Writes require an authenticated caller; updates and deletes additionally
//! require the caller to own the room. Every referenced category and amenity
//! is resolved before anything is written, and the repository persists the
//! room with its amenity links in a single atomic step, so a rejected request
//! never leaves a partial room behind.

use roomhub_domain::amenity::Amenity;
use roomhub_domain::category::Category;
use roomhub_domain::error::{NotFoundError, ParseError, RoomHubError};
use roomhub_domain::id::{AmenityId, CategoryId, RoomId};
use roomhub_domain::room::{Room, RoomDetail, RoomFields, RoomSummary};
use roomhub_domain::user::User;

use crate::ports::{AmenityRepository, CategoryRepository, RoomRepository, UserRepository};

/// Input for [`RoomService::create_room`].
#[derive(Debug, Clone, Default)]
pub struct RoomDraft {
    /// Required; absence is reported as [`ParseError::CategoryRequired`].
    pub category: Option<CategoryId>,
    /// Attached in this order; duplicates are ignored.
    pub amenities: Vec<AmenityId>,
    pub fields: RoomFields,
}

/// Input for [`RoomService::update_room`]. `None` leaves a reference as is.
#[derive(Debug, Clone, Default)]
pub struct RoomChanges {
    pub category: Option<CategoryId>,
    /// Replaces the whole amenity set when present.
    pub amenities: Option<Vec<AmenityId>>,
    pub fields: RoomFields,
}

/// Application service for rooms.
pub struct RoomService<R, C, A, U> {
    rooms: R,
    categories: C,
    amenities: A,
    users: U,
}

impl<R, C, A, U> RoomService<R, C, A, U>
where
    R: RoomRepository,
    C: CategoryRepository,
    A: AmenityRepository,
    U: UserRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(rooms: R, categories: C, amenities: A, users: U) -> Self {
        Self {
            rooms,
            categories,
            amenities,
            users,
        }
    }

    /// List all rooms in summary form.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rooms(&self) -> Result<Vec<RoomSummary>, RoomHubError> {
        let rooms = self.rooms.get_all().await?;
        Ok(rooms.into_iter().map(RoomSummary::from).collect())
    }

    /// Look up a room by id in detail form.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotFound`] when no room with `id` exists, or a
    /// storage error from a repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_room(&self, id: RoomId) -> Result<RoomDetail, RoomHubError> {
        let room = self.find_room(id).await?;
        self.expand(room).await
    }

    /// Create a room owned by `caller`.
    ///
    /// Checks run in this order: caller, descriptive fields, category,
    /// amenities.
    ///
    /// # Errors
    ///
    /// - [`RoomHubError::NotAuthenticated`] without a caller
    /// - [`RoomHubError::Validation`] when a descriptive field is invalid
    /// - [`RoomHubError::Parse`] when the category is missing, unknown, or not
    ///   a rooms category, or when an amenity id is unknown
    /// - a storage error from a repository
    #[tracing::instrument(skip(self, caller, draft), fields(caller_id = ?caller.map(|u| u.id)))]
    pub async fn create_room(
        &self,
        caller: Option<&User>,
        draft: RoomDraft,
    ) -> Result<RoomDetail, RoomHubError> {
        let owner = caller.ok_or(RoomHubError::NotAuthenticated)?;
        draft.fields.validate_new()?;
        let category_id = draft.category.ok_or(ParseError::CategoryRequired)?;
        let category = self.resolve_category(category_id).await?;

        let mut room = Room::new(owner.id, category.id, draft.fields)?;
        let amenities = self.resolve_amenities(&draft.amenities).await?;
        room.set_amenities(amenities.iter().map(|amenity| amenity.id));

        let room = self.rooms.create(room).await?;
        tracing::info!(room_id = %room.id, amenities = room.amenity_ids.len(), "room created");
        Ok(RoomDetail::new(room, owner.clone(), category, amenities))
    }

    /// Update a room owned by `caller`.
    ///
    /// Descriptive fields are merged; a supplied category is re-checked like
    /// on creation; a supplied amenity list replaces the current one.
    ///
    /// # Errors
    ///
    /// - [`RoomHubError::NotFound`] when the room does not exist
    /// - [`RoomHubError::NotAuthenticated`] without a caller
    /// - [`RoomHubError::PermissionDenied`] when the caller is not the owner
    /// - [`RoomHubError::Parse`] / [`RoomHubError::Validation`] on bad input
    /// - a storage error from a repository
    #[tracing::instrument(skip(self, caller, changes), fields(caller_id = ?caller.map(|u| u.id)))]
    pub async fn update_room(
        &self,
        caller: Option<&User>,
        id: RoomId,
        changes: RoomChanges,
    ) -> Result<RoomDetail, RoomHubError> {
        let mut room = self.find_room(id).await?;
        Self::authorize_owner(caller, &room)?;

        if let Some(category_id) = changes.category {
            room.category_id = self.resolve_category(category_id).await?.id;
        }
        if let Some(ids) = changes.amenities {
            let amenities = self.resolve_amenities(&ids).await?;
            room.set_amenities(amenities.iter().map(|amenity| amenity.id));
        }
        room.apply(changes.fields)?;

        let room = self.rooms.update(room).await?;
        self.expand(room).await
    }

    /// Delete a room owned by `caller`.
    ///
    /// # Errors
    ///
    /// - [`RoomHubError::NotFound`] when the room does not exist
    /// - [`RoomHubError::NotAuthenticated`] without a caller
    /// - [`RoomHubError::PermissionDenied`] when the caller is not the owner
    /// - a storage error from the repository
    #[tracing::instrument(skip(self, caller), fields(caller_id = ?caller.map(|u| u.id)))]
    pub async fn delete_room(&self, caller: Option<&User>, id: RoomId) -> Result<(), RoomHubError> {
        let room = self.find_room(id).await?;
        Self::authorize_owner(caller, &room)?;
        self.rooms.delete(id).await
    }

    async fn find_room(&self, id: RoomId) -> Result<Room, RoomHubError> {
        self.rooms.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Room",
                id: id.to_string(),
            }
            .into()
        })
    }

    fn authorize_owner(caller: Option<&User>, room: &Room) -> Result<(), RoomHubError> {
        let caller = caller.ok_or(RoomHubError::NotAuthenticated)?;
        if !room.is_owned_by(caller) {
            tracing::warn!(room_id = %room.id, caller = %caller.id, "caller does not own room");
            return Err(RoomHubError::PermissionDenied);
        }
        Ok(())
    }

    async fn resolve_category(&self, id: CategoryId) -> Result<Category, RoomHubError> {
        let category = self
            .categories
            .get_by_id(id)
            .await?
            .ok_or(ParseError::CategoryNotFound)?;
        if !category.accepts_rooms() {
            return Err(ParseError::CategoryKindNotRooms.into());
        }
        Ok(category)
    }

    /// Load every amenity in input order, skipping repeated ids.
    async fn resolve_amenities(&self, ids: &[AmenityId]) -> Result<Vec<Amenity>, RoomHubError> {
        let mut amenities: Vec<Amenity> = Vec::with_capacity(ids.len());
        for &id in ids {
            if amenities.iter().any(|amenity| amenity.id == id) {
                continue;
            }
            let amenity = self
                .amenities
                .get_by_id(id)
                .await?
                .ok_or(ParseError::AmenityNotFound(id))?;
            amenities.push(amenity);
        }
        Ok(amenities)
    }

    async fn expand(&self, room: Room) -> Result<RoomDetail, RoomHubError> {
        let owner = self.users.get_by_id(room.owner_id).await?.ok_or_else(|| {
            RoomHubError::from(NotFoundError {
                entity: "User",
                id: room.owner_id.to_string(),
            })
        })?;
        let category = self
            .categories
            .get_by_id(room.category_id)
            .await?
            .ok_or_else(|| {
                RoomHubError::from(NotFoundError {
                    entity: "Category",
                    id: room.category_id.to_string(),
                })
            })?;

        let mut amenities = Vec::with_capacity(room.amenity_ids.len());
        for &id in &room.amenity_ids {
            if let Some(amenity) = self.amenities.get_by_id(id).await? {
                amenities.push(amenity);
            }
        }

        Ok(RoomDetail::new(room, owner, category, amenities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        InMemoryAmenityRepo, InMemoryCategoryRepo, InMemoryRoomRepo, InMemoryUserRepo,
    };
    use roomhub_domain::category::CategoryKind;
    use roomhub_domain::error::ValidationError;
    use roomhub_domain::room::RoomKind;

    type Service =
        RoomService<InMemoryRoomRepo, InMemoryCategoryRepo, InMemoryAmenityRepo, InMemoryUserRepo>;

    struct Fixture {
        svc: Service,
        rooms: InMemoryRoomRepo,
        owner: User,
        stranger: User,
        rooms_category: Category,
        experiences_category: Category,
        wifi: Amenity,
        kitchen: Amenity,
    }

    fn fixture() -> Fixture {
        let rooms = InMemoryRoomRepo::default();
        let categories = InMemoryCategoryRepo::default();
        let amenities = InMemoryAmenityRepo::default();
        let users = InMemoryUserRepo::default();

        let owner = User::register("host").unwrap().user;
        let stranger = User::register("guest").unwrap().user;
        for user in [&owner, &stranger] {
            users.store.lock().unwrap().insert(user.id, user.clone());
        }

        let rooms_category = Category::new("Cabins", CategoryKind::Rooms).unwrap();
        let experiences_category = Category::new("Tours", CategoryKind::Experiences).unwrap();
        for category in [&rooms_category, &experiences_category] {
            categories
                .store
                .lock()
                .unwrap()
                .insert(category.id, category.clone());
        }

        let wifi = Amenity::builder().name("Wifi").build().unwrap();
        let kitchen = Amenity::builder().name("Kitchen").build().unwrap();
        for amenity in [&wifi, &kitchen] {
            amenities
                .store
                .lock()
                .unwrap()
                .insert(amenity.id, amenity.clone());
        }

        Fixture {
            svc: RoomService::new(rooms.clone(), categories, amenities, users),
            rooms,
            owner,
            stranger,
            rooms_category,
            experiences_category,
            wifi,
            kitchen,
        }
    }

    fn fields() -> RoomFields {
        RoomFields {
            name: Some("Hanok stay".to_string()),
            price: Some(120),
            rooms: Some(2),
            toilets: Some(1),
            description: Some("Traditional house".to_string()),
            address: Some("Bukchon-ro 11".to_string()),
            kind: Some(RoomKind::EntirePlace),
            ..RoomFields::default()
        }
    }

    fn draft(f: &Fixture) -> RoomDraft {
        RoomDraft {
            category: Some(f.rooms_category.id),
            amenities: vec![f.kitchen.id, f.wifi.id],
            fields: fields(),
        }
    }

    fn stored_rooms(f: &Fixture) -> usize {
        f.rooms.store.lock().unwrap().len()
    }

    #[tokio::test]
    async fn should_create_room_owned_by_caller_with_amenities_in_input_order() {
        let f = fixture();

        let detail = f.svc.create_room(Some(&f.owner), draft(&f)).await.unwrap();

        assert_eq!(detail.owner.id, f.owner.id);
        assert_eq!(detail.category.id, f.rooms_category.id);
        let names: Vec<&str> = detail.amenities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Kitchen", "Wifi"]);

        let fetched = f.svc.get_room(detail.id).await.unwrap();
        assert_eq!(fetched, detail);
    }

    #[tokio::test]
    async fn should_reject_create_when_unauthenticated() {
        let f = fixture();

        let result = f.svc.create_room(None, draft(&f)).await;

        assert!(matches!(result, Err(RoomHubError::NotAuthenticated)));
        assert_eq!(stored_rooms(&f), 0);
    }

    #[tokio::test]
    async fn should_reject_create_when_category_missing() {
        let f = fixture();
        let draft = RoomDraft {
            category: None,
            ..draft(&f)
        };

        let result = f.svc.create_room(Some(&f.owner), draft).await;

        assert!(matches!(
            result,
            Err(RoomHubError::Parse(ParseError::CategoryRequired))
        ));
    }

    #[tokio::test]
    async fn should_reject_create_when_category_unknown() {
        let f = fixture();
        let draft = RoomDraft {
            category: Some(CategoryId::new()),
            ..draft(&f)
        };

        let result = f.svc.create_room(Some(&f.owner), draft).await;

        assert!(matches!(
            result,
            Err(RoomHubError::Parse(ParseError::CategoryNotFound))
        ));
    }

    #[tokio::test]
    async fn should_reject_create_when_category_is_for_experiences() {
        let f = fixture();
        let draft = RoomDraft {
            category: Some(f.experiences_category.id),
            ..draft(&f)
        };

        let result = f.svc.create_room(Some(&f.owner), draft).await;

        assert!(matches!(
            result,
            Err(RoomHubError::Parse(ParseError::CategoryKindNotRooms))
        ));
        assert_eq!(stored_rooms(&f), 0);
    }

    #[tokio::test]
    async fn should_reject_create_without_persisting_when_amenity_unknown() {
        let f = fixture();
        let missing = AmenityId::new();
        let draft = RoomDraft {
            amenities: vec![f.wifi.id, missing, f.kitchen.id],
            ..draft(&f)
        };

        let result = f.svc.create_room(Some(&f.owner), draft).await;

        match result {
            Err(RoomHubError::Parse(ParseError::AmenityNotFound(id))) => assert_eq!(id, missing),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(stored_rooms(&f), 0);
    }

    #[tokio::test]
    async fn should_reject_create_when_required_field_missing() {
        let f = fixture();
        let mut draft = draft(&f);
        draft.fields.address = None;

        let result = f.svc.create_room(Some(&f.owner), draft).await;

        assert!(matches!(
            result,
            Err(RoomHubError::Validation(ValidationError::Missing { field: "address" }))
        ));
        assert_eq!(stored_rooms(&f), 0);
    }

    #[tokio::test]
    async fn should_report_field_errors_before_category_kind() {
        let f = fixture();
        let mut draft = RoomDraft {
            category: Some(f.experiences_category.id),
            ..draft(&f)
        };
        draft.fields.name = None;

        let result = f.svc.create_room(Some(&f.owner), draft).await;

        assert!(matches!(
            result,
            Err(RoomHubError::Validation(ValidationError::Missing { field: "name" }))
        ));
        assert_eq!(stored_rooms(&f), 0);
    }

    #[tokio::test]
    async fn should_report_field_errors_before_missing_category() {
        let f = fixture();
        let mut draft = RoomDraft {
            category: None,
            ..draft(&f)
        };
        draft.fields.price = None;

        let result = f.svc.create_room(Some(&f.owner), draft).await;

        assert!(matches!(
            result,
            Err(RoomHubError::Validation(ValidationError::Missing { field: "price" }))
        ));
    }

    #[tokio::test]
    async fn should_ignore_repeated_amenity_ids() {
        let f = fixture();
        let draft = RoomDraft {
            amenities: vec![f.wifi.id, f.wifi.id],
            ..draft(&f)
        };

        let detail = f.svc.create_room(Some(&f.owner), draft).await.unwrap();

        assert_eq!(detail.amenities.len(), 1);
    }

    #[tokio::test]
    async fn should_list_rooms_in_summary_form() {
        let f = fixture();
        f.svc.create_room(Some(&f.owner), draft(&f)).await.unwrap();

        let all = f.svc.list_rooms().await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Hanok stay");
    }

    #[tokio::test]
    async fn should_return_not_found_when_room_missing() {
        let f = fixture();
        let result = f.svc.get_room(RoomId::new()).await;
        assert!(matches!(result, Err(RoomHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_deny_delete_when_caller_is_not_owner() {
        let f = fixture();
        let room = f.svc.create_room(Some(&f.owner), draft(&f)).await.unwrap();

        let result = f.svc.delete_room(Some(&f.stranger), room.id).await;

        assert!(matches!(result, Err(RoomHubError::PermissionDenied)));
        assert!(f.svc.get_room(room.id).await.is_ok());
    }

    #[tokio::test]
    async fn should_require_authentication_when_deleting() {
        let f = fixture();
        let room = f.svc.create_room(Some(&f.owner), draft(&f)).await.unwrap();

        let result = f.svc.delete_room(None, room.id).await;

        assert!(matches!(result, Err(RoomHubError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn should_return_not_found_before_checking_caller_when_deleting_missing_room() {
        let f = fixture();
        let result = f.svc.delete_room(None, RoomId::new()).await;
        assert!(matches!(result, Err(RoomHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_room_when_caller_is_owner() {
        let f = fixture();
        let room = f.svc.create_room(Some(&f.owner), draft(&f)).await.unwrap();

        f.svc.delete_room(Some(&f.owner), room.id).await.unwrap();

        let result = f.svc.get_room(room.id).await;
        assert!(matches!(result, Err(RoomHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_update_fields_and_replace_amenities_when_owner() {
        let f = fixture();
        let room = f.svc.create_room(Some(&f.owner), draft(&f)).await.unwrap();

        let updated = f
            .svc
            .update_room(
                Some(&f.owner),
                room.id,
                RoomChanges {
                    amenities: Some(vec![f.wifi.id]),
                    fields: RoomFields {
                        price: Some(80),
                        ..RoomFields::default()
                    },
                    ..RoomChanges::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 80);
        assert_eq!(updated.name, "Hanok stay");
        assert_eq!(updated.amenities.len(), 1);
        assert_eq!(updated.amenities[0].id, f.wifi.id);
    }

    #[tokio::test]
    async fn should_deny_update_when_caller_is_not_owner() {
        let f = fixture();
        let room = f.svc.create_room(Some(&f.owner), draft(&f)).await.unwrap();

        let result = f
            .svc
            .update_room(Some(&f.stranger), room.id, RoomChanges::default())
            .await;

        assert!(matches!(result, Err(RoomHubError::PermissionDenied)));
    }

    #[tokio::test]
    async fn should_leave_room_untouched_when_update_names_unknown_amenity() {
        let f = fixture();
        let room = f.svc.create_room(Some(&f.owner), draft(&f)).await.unwrap();

        let result = f
            .svc
            .update_room(
                Some(&f.owner),
                room.id,
                RoomChanges {
                    amenities: Some(vec![AmenityId::new()]),
                    fields: RoomFields {
                        price: Some(1),
                        ..RoomFields::default()
                    },
                    ..RoomChanges::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(RoomHubError::Parse(ParseError::AmenityNotFound(_)))
        ));
        let fetched = f.svc.get_room(room.id).await.unwrap();
        assert_eq!(fetched.price, 120);
        assert_eq!(fetched.amenities.len(), 2);
    }

    #[tokio::test]
    async fn should_reject_update_moving_room_to_experiences_category() {
        let f = fixture();
        let room = f.svc.create_room(Some(&f.owner), draft(&f)).await.unwrap();

        let result = f
            .svc
            .update_room(
                Some(&f.owner),
                room.id,
                RoomChanges {
                    category: Some(f.experiences_category.id),
                    ..RoomChanges::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(RoomHubError::Parse(ParseError::CategoryKindNotRooms))
        ));
    }
}
