//! # roomhub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `AmenityRepository`: CRUD for amenities
//!   - `CategoryRepository`: create and read categories
//!   - `RoomRepository`: CRUD for rooms, atomic with their amenity links
//!   - `UserRepository`: accounts and token-hash lookup
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AmenityService`: list, create, get, partial update, delete
//!   - `CategoryService`: list, create, get
//!   - `RoomService`: list, create, get, update, delete with ownership rules
//!   - `UserService`: register, authenticate
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `roomhub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
