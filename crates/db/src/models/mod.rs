//! Row structs and DTOs, one module per table group.

pub mod approval;
pub mod mindmap;
pub mod requisition;
pub mod user;
