//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod amenities;
#[allow(clippy::missing_errors_doc)]
pub mod categories;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post};

use roomhub_app::ports::{
    AmenityRepository, CategoryRepository, RoomRepository, UserRepository,
};
use roomhub_domain::error::{NotFoundError, ParseError, RoomHubError};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<AR, CR, RR, UR>() -> Router<AppState<AR, CR, RR, UR>>
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    Router::new()
        // Amenities
        .route(
            "/amenities",
            get(amenities::list::<AR, CR, RR, UR>).post(amenities::create::<AR, CR, RR, UR>),
        )
        .route(
            "/amenities/{id}",
            get(amenities::get::<AR, CR, RR, UR>)
                .put(amenities::update::<AR, CR, RR, UR>)
                .delete(amenities::delete::<AR, CR, RR, UR>),
        )
        // Rooms
        .route(
            "/rooms",
            get(rooms::list::<AR, CR, RR, UR>).post(rooms::create::<AR, CR, RR, UR>),
        )
        .route(
            "/rooms/{id}",
            get(rooms::get::<AR, CR, RR, UR>)
                .put(rooms::update::<AR, CR, RR, UR>)
                .delete(rooms::delete::<AR, CR, RR, UR>),
        )
        // Categories
        .route(
            "/categories",
            get(categories::list::<AR, CR, RR, UR>).post(categories::create::<AR, CR, RR, UR>),
        )
        .route("/categories/{id}", get(categories::get::<AR, CR, RR, UR>))
        // Users
        .route("/users", post(users::register::<AR, CR, RR, UR>))
}

/// Parse an id taken from the URL path.
///
/// A path that does not hold a valid id cannot name an existing resource,
/// so it is reported as not found.
fn path_id<T: FromStr>(entity: &'static str, raw: &str) -> Result<T, ApiError> {
    T::from_str(raw).map_err(|_| {
        ApiError::from(RoomHubError::from(NotFoundError {
            entity,
            id: raw.to_string(),
        }))
    })
}

/// Parse an id taken from a request body.
fn body_id<T: FromStr>(resource: &'static str, raw: &str) -> Result<T, ApiError> {
    T::from_str(raw).map_err(|_| {
        ApiError::from(RoomHubError::from(ParseError::InvalidId {
            resource,
            value: raw.to_string(),
        }))
    })
}
