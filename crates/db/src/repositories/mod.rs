//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod approval_repo;
pub mod mindmap_connection_repo;
pub mod mindmap_node_repo;
pub mod requisition_repo;
pub mod user_repo;

pub use approval_repo::ApprovalRepo;
pub use mindmap_connection_repo::MindMapConnectionRepo;
pub use mindmap_node_repo::MindMapNodeRepo;
pub use requisition_repo::RequisitionRepo;
pub use user_repo::UserRepo;
