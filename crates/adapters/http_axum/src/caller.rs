//! Caller resolution from the `Authorization` header.
//!
//! Anonymous requests are allowed through as `Caller(None)`; whether an
//! operation needs a user is decided by the application services. A header
//! that is present but malformed, or names an unknown token, is rejected.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use roomhub_app::ports::{
    AmenityRepository, CategoryRepository, RoomRepository, UserRepository,
};
use roomhub_domain::error::RoomHubError;
use roomhub_domain::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The resolved identity of whoever sent the request.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<User>);

impl Caller {
    /// Borrow the authenticated user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, RoomHubError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(Some)
        .ok_or(RoomHubError::NotAuthenticated)
}

impl<AR, CR, RR, UR> FromRequestParts<AppState<AR, CR, RR, UR>> for Caller
where
    AR: AmenityRepository + Send + Sync + 'static,
    CR: CategoryRepository + Send + Sync + 'static,
    RR: RoomRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<AR, CR, RR, UR>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts)? else {
            return Ok(Self(None));
        };
        let user = state.user_service.authenticate(token).await?;
        Ok(Self(Some(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn should_treat_missing_header_as_anonymous() {
        assert_eq!(bearer_token(&parts(None)).unwrap(), None);
    }

    #[test]
    fn should_extract_bearer_token() {
        assert_eq!(
            bearer_token(&parts(Some("Bearer abc123"))).unwrap(),
            Some("abc123")
        );
    }

    #[test]
    fn should_reject_non_bearer_scheme() {
        let parts = parts(Some("Basic dXNlcjpwYXNz"));
        let result = bearer_token(&parts);
        assert!(matches!(result, Err(RoomHubError::NotAuthenticated)));
    }

    #[test]
    fn should_reject_empty_token() {
        let parts = parts(Some("Bearer   "));
        let result = bearer_token(&parts);
        assert!(matches!(result, Err(RoomHubError::NotAuthenticated)));
    }
}
