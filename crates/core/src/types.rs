//! Primitive type aliases shared by every crate in the workspace.

/// Database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Timestamps are always UTC (`TIMESTAMPTZ` columns).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
