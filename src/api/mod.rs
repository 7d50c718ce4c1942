//! API Module
//!
//! HTTP handlers and routing that expose a cache registry over REST.
//!
//! # Endpoints
//! - `PUT /cache/:namespace` - Store a key-value pair
//! - `GET /cache/:namespace/:key` - Retrieve a value by key
//! - `DELETE /cache/:namespace/:key` - Delete a key
//! - `GET /cache/:namespace/:key/exists` - Check for a live key
//! - `POST /clear` - Clear the default namespace
//! - `GET /stats` - Per-namespace statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
