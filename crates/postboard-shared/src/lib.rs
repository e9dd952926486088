//! # Postboard Shared
//!
//! Wire types shared by the HTML and JSON surfaces of the blog server.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
