//! # roomhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `roomhub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Write a room and its amenity links inside one transaction
//!
//! ## Dependency rule
//! Depends on `roomhub-app` (for port traits) and `roomhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod amenity_repo;
mod category_repo;
mod decode;
mod error;
mod pool;
mod room_repo;
mod user_repo;

pub use amenity_repo::SqliteAmenityRepository;
pub use category_repo::SqliteCategoryRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use room_repo::SqliteRoomRepository;
pub use user_repo::SqliteUserRepository;
