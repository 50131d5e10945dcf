//! User service: registration and token authentication.

use roomhub_domain::error::{RoomHubError, ValidationError};
use roomhub_domain::user::{Registration, User, token_digest};

use crate::ports::UserRepository;

/// Application service for user accounts.
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new user and issue their API token.
    ///
    /// The plaintext token only exists in the returned [`Registration`];
    /// the repository stores its digest.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when the username is invalid or
    /// already taken, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn register(&self, username: &str) -> Result<Registration, RoomHubError> {
        let Registration { user, token } = User::register(username)?;
        if self.repo.find_by_username(&user.username).await?.is_some() {
            return Err(ValidationError::UsernameTaken.into());
        }
        let user = self.repo.create(user).await?;
        tracing::info!(user_id = %user.id, "registered user");
        Ok(Registration { user, token })
    }

    /// Resolve the user holding `token`.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotAuthenticated`] when no user holds the
    /// token, or a storage error from the repository.
    pub async fn authenticate(&self, token: &str) -> Result<User, RoomHubError> {
        match self.repo.find_by_token_hash(&token_digest(token)).await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!("rejected unknown API token");
                Err(RoomHubError::NotAuthenticated)
            }
        }
    }
}
