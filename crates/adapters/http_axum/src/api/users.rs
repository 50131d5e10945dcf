//! JSON REST handler for user registration.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use roomhub_app::ports::{
    AmenityRepository, CategoryRepository, RoomRepository, UserRepository,
};
use roomhub_domain::id::UserId;
use roomhub_domain::user::Registration;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a user.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
}

/// The only response that ever carries a user's API token.
#[derive(Serialize)]
pub struct RegisteredUser {
    pub id: UserId,
    pub username: String,
    pub token: String,
}

impl From<Registration> for RegisteredUser {
    fn from(Registration { user, token }: Registration) -> Self {
        Self {
            id: user.id,
            username: user.username,
            token,
        }
    }
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    Created(Json<RegisteredUser>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `POST /api/users`
pub async fn register<AR, CR, RR, UR>(
    State(state): State<AppState<AR, CR, RR, UR>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<RegisterResponse, ApiError>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let registration = state.user_service.register(&req.username).await?;
    Ok(RegisterResponse::Created(Json(registration.into())))
}
