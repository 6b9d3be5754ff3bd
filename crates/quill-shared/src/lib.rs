//! # Quill Shared
//!
//! Wire types of the gateway's HTTP API, shared with clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
