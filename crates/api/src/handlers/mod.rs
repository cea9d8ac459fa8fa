//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `reqdesk_db` and
//! map errors via [`AppError`](crate::error::AppError).

pub mod approval;
pub mod auth;
pub mod mindmap;
pub mod requisition;
