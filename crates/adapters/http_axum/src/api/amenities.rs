//! JSON REST handlers for amenities.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer};

use roomhub_app::ports::{
    AmenityRepository, CategoryRepository, RoomRepository, UserRepository,
};
use roomhub_domain::amenity::{Amenity, AmenityPatch};
use roomhub_domain::id::AmenityId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an amenity.
#[derive(Deserialize)]
pub struct CreateAmenityRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Request body for a partial amenity update.
///
/// An absent field is left as is; `"description": null` clears it.
#[derive(Deserialize)]
pub struct UpdateAmenityRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

/// Distinguish an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Amenity>>),
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
    Ok(Json<Amenity>),
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
    Created(Json<Amenity>),
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

/// `GET /api/amenities`
pub async fn list<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
) -> Result<ListResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let amenities = state.amenity_service.list_amenities().await?;
    Ok(ListResponse::Ok(Json(amenities)))
}

/// `GET /api/amenities/:id`
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
    let amenity_id: AmenityId = super::path_id("Amenity", &id)?;
    let amenity = state.amenity_service.get_amenity(amenity_id).await?;
    Ok(GetResponse::Ok(Json(amenity)))
}

/// `POST /api/amenities`
pub async fn create<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
    payload: Result<Json<CreateAmenityRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let mut builder = Amenity::builder();
    if let Some(name) = req.name {
        builder = builder.name(name);
    }
    if let Some(description) = req.description {
        builder = builder.description(description);
    }

    let amenity = builder.build()?;
    let created = state.amenity_service.create_amenity(amenity).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/amenities/:id`: partial update.
pub async fn update<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAmenityRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let amenity_id: AmenityId = super::path_id("Amenity", &id)?;
    let Json(req) = payload?;
    let patch = AmenityPatch {
        name: req.name,
        description: req.description,
    };
    let amenity = state
        .amenity_service
        .update_amenity(amenity_id, patch)
        .await?;
    Ok(GetResponse::Ok(Json(amenity)))
}

/// `DELETE /api/amenities/:id`
pub async fn delete<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let amenity_id: AmenityId = super::path_id("Amenity", &id)?;
    state.amenity_service.delete_amenity(amenity_id).await?;
    Ok(DeleteResponse::NoContent)
}
