//! Shared response body types for API handlers.
//!
//! Resources are returned as bare JSON objects and arrays; only
//! acknowledgements without a resource use [`MessageResponse`].

use serde::Serialize;

/// `{ "message": "..." }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
