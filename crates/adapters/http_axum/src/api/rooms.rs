//! JSON REST handlers for rooms.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use roomhub_app::ports::{
    AmenityRepository, CategoryRepository, RoomRepository, UserRepository,
};
use roomhub_app::services::room_service::{RoomChanges, RoomDraft};
use roomhub_domain::error::RoomHubError;
use roomhub_domain::id::{AmenityId, CategoryId, RoomId};
use roomhub_domain::room::{RoomDetail, RoomFields, RoomKind, RoomSummary};

use crate::caller::Caller;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body shared by room creation and update.
///
/// Every field is optional at this level: on creation the service reports
/// what is missing, on update absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoomRequest {
    pub name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub price: Option<u32>,
    pub rooms: Option<u32>,
    pub toilets: Option<u32>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub pet_friendly: Option<bool>,
    pub kind: Option<RoomKind>,
    pub category: Option<String>,
    pub amenities: Option<Vec<String>>,
}

type ParsedRoomRequest = (Option<CategoryId>, Option<Vec<AmenityId>>, RoomFields);

impl RoomRequest {
    fn parse(self) -> Result<ParsedRoomRequest, ApiError> {
        let category = self
            .category
            .as_deref()
            .map(|raw| super::body_id("category", raw))
            .transpose()?;
        let amenities = self
            .amenities
            .map(|ids| {
                ids.iter()
                    .map(|raw| super::body_id("amenity", raw))
                    .collect::<Result<Vec<AmenityId>, _>>()
            })
            .transpose()?;
        let fields = RoomFields {
            name: self.name,
            country: self.country,
            city: self.city,
            price: self.price,
            rooms: self.rooms,
            toilets: self.toilets,
            description: self.description,
            address: self.address,
            pet_friendly: self.pet_friendly,
            kind: self.kind,
        };
        Ok((category, amenities, fields))
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<RoomSummary>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<RoomDetail>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<RoomDetail>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/rooms`
pub async fn list<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
) -> Result<ListResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let rooms = state.room_service.list_rooms().await?;
    Ok(ListResponse::Ok(Json(rooms)))
}

/// `GET /api/rooms/:id`
pub async fn get<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let room_id: RoomId = super::path_id("Room", &id)?;
    let room = state.room_service.get_room(room_id).await?;
    Ok(GetResponse::Ok(Json(room)))
}

/// `POST /api/rooms`: requires an authenticated caller, who becomes the owner.
pub async fn create<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
    caller: Caller,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    if caller.user().is_none() {
        return Err(RoomHubError::NotAuthenticated.into());
    }
    let Json(req) = payload?;
    let (category, amenities, fields) = req.parse()?;
    let draft = RoomDraft {
        category,
        amenities: amenities.unwrap_or_default(),
        fields,
    };
    let room = state
        .room_service
        .create_room(caller.user(), draft)
        .await?;
    Ok(CreateResponse::Created(Json(room)))
}

/// `PUT /api/rooms/:id`: partial update, owner only.
pub async fn update<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
    caller: Caller,
    Path(id): Path<String>,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let room_id: RoomId = super::path_id("Room", &id)?;
    let Json(req) = payload?;
    let (category, amenities, fields) = req.parse()?;
    let changes = RoomChanges {
        category,
        amenities,
        fields,
    };
    let room = state
        .room_service
        .update_room(caller.user(), room_id, changes)
        .await?;
    Ok(GetResponse::Ok(Json(room)))
}

/// `DELETE /api/rooms/:id`: owner only.
pub async fn delete<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let room_id: RoomId = super::path_id("Room", &id)?;
    state
        .room_service
        .delete_room(caller.user(), room_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
