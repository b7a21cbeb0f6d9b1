//! API Module
//!
//! HTTP surface over the cache engine.
//!
//! # Endpoints
//! - `PUT /cache/:category/:key` - Store a JSON value
//! - `GET /cache/:category/:key` - Retrieve a value
//! - `DELETE /cache/:category/:key` - Delete a key (idempotent)
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
