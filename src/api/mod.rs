//! API Module
//!
//! HTTP handlers and routing for the proxy REST API.
//!
//! # Endpoints
//! - `GET /api/movies/{search,searchAll,details}` - Cached movie lookups
//! - `GET /api/series/{search,searchall,details,season,episode}` - Cached series lookups
//! - `GET /cache/stats` - Per-region cache statistics
//! - `DELETE /cache/:region[/:key]` - Clear a region or evict one key
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
