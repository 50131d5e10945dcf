//! # roomhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** under `/api`:
//!   `/api/amenities`, `/api/rooms`, `/api/categories`, `/api/users`
//! - Resolve the caller from an `Authorization: Bearer <token>` header and
//!   hand it to the application services explicitly
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `roomhub-app` (for port traits and services) and `roomhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod caller;
pub mod error;
pub mod router;
pub mod state;
