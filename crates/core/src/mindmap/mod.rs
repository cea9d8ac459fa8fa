//! Mind-map defaults, field validation, and child auto-placement.
//!
//! - [`graph`] -- in-memory arena used to build the forest view.

pub mod graph;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

/// Color applied to nodes created without one (navy).
pub const DEFAULT_NODE_COLOR: &str = "#1E3A8A";

/// Connection type used when the client does not send one.
pub const DEFAULT_CONNECTION_TYPE: &str = "related";

/// Connection type for parent -> child edges created alongside a child node.
pub const CHILD_CONNECTION_TYPE: &str = "child";

/// Maximum length of a node title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of a connection type tag.
pub const MAX_CONNECTION_TYPE_LENGTH: usize = 50;

/// Horizontal distance between an auto-placed child and its parent.
pub const CHILD_OFFSET_X: f64 = 220.0;

/// Vertical distance between an auto-placed first child and its parent.
pub const CHILD_OFFSET_Y: f64 = 100.0;

/// Vertical spacing between consecutive auto-placed siblings.
pub const SIBLING_SPACING_Y: f64 = 80.0;

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid regex")
});

/// A point on the mind-map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };
}

/// Validate a node title: non-blank and at most [`MAX_TITLE_LENGTH`] chars.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title must not exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Resolve the color to persist: the default when absent or blank,
/// otherwise the given value if it is a `#RGB` / `#RRGGBB` hex color.
pub fn resolve_color(color: Option<&str>) -> Result<String, CoreError> {
    match color.map(str::trim) {
        None | Some("") => Ok(DEFAULT_NODE_COLOR.to_string()),
        Some(c) if HEX_COLOR_RE.is_match(c) => Ok(c.to_string()),
        Some(c) => Err(CoreError::Validation(format!(
            "Invalid color '{c}'. Expected a hex color such as {DEFAULT_NODE_COLOR}"
        ))),
    }
}

/// Resolve the connection type to persist, applying [`DEFAULT_CONNECTION_TYPE`]
/// when absent or blank.
pub fn resolve_connection_type(connection_type: Option<&str>) -> Result<String, CoreError> {
    match connection_type.map(str::trim) {
        None | Some("") => Ok(DEFAULT_CONNECTION_TYPE.to_string()),
        Some(t) if t.chars().count() > MAX_CONNECTION_TYPE_LENGTH => {
            Err(CoreError::Validation(format!(
                "connection_type must not exceed {MAX_CONNECTION_TYPE_LENGTH} characters"
            )))
        }
        Some(t) => Ok(t.to_string()),
    }
}

/// Position for a new child node placed automatically next to its parent.
///
/// Children go to the right of the parent and fan out downwards, one
/// [`SIBLING_SPACING_Y`] step per existing sibling.
pub fn child_position(parent: Position, existing_children: usize) -> Position {
    Position {
        x: parent.x + CHILD_OFFSET_X,
        y: parent.y + CHILD_OFFSET_Y + SIBLING_SPACING_Y * existing_children as f64,
    }
}
