//! JSON REST handlers for categories.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use roomhub_app::ports::{
    AmenityRepository, CategoryRepository, RoomRepository, UserRepository,
};
use roomhub_domain::category::{Category, CategoryKind};
use roomhub_domain::id::CategoryId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a category.
#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
    pub kind: CategoryKind,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Category>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Category>),
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
    Created(Json<Category>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/categories`
pub async fn list<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
) -> Result<ListResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let categories = state.category_service.list_categories().await?;
    Ok(ListResponse::Ok(Json(categories)))
}

/// `GET /api/categories/:id`
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
    let category_id: CategoryId = super::path_id("Category", &id)?;
    let category = state.category_service.get_category(category_id).await?;
    Ok(GetResponse::Ok(Json(category)))
}

/// `POST /api/categories`
pub async fn create<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let category = Category::new(req.name, req.kind)?;
    let created = state.category_service.create_category(category).await?;
    Ok(CreateResponse::Created(Json(created)))
}
