//! # roomhub-domain
//!
//! Pure domain model for the roomhub room-listing service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Amenities** (features a room can offer: wifi, kitchen, …)
//! - Define **Categories** (classification of listings, either rooms or experiences)
//! - Define **Users** (room owners and authenticated callers)
//! - Define **Rooms** (listings owned by a user, tagged with a category and amenities)
//! - Contain all invariant enforcement and field validation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod amenity;
pub mod category;
pub mod room;
pub mod user;
