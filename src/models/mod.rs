//! Request and Response models for the cache HTTP API
//!
//! DTOs serialized to and from JSON bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_segment, SetRequest, MAX_SEGMENT_LENGTH};
pub use responses::{
    DeleteResponse, ErrorResponse, GetResponse, HealthResponse, SetResponse, StatsResponse,
};
