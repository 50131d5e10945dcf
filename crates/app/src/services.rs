//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//! Operations that depend on who is calling take the resolved caller as an
//! explicit `Option<&User>` argument.

pub mod amenity_service;
pub mod category_service;
pub mod room_service;
pub mod user_service;
