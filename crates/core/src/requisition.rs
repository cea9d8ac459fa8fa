//! Requisition origins and the combined newest-first listing.
//!
//! Requisitions live in three parallel tables with the same shape. The table
//! identifier used in SQL is only ever obtained from [`RequisitionOrigin`],
//! never from request input.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Timestamp;

/// The source table a requisition comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequisitionOrigin {
    Tic,
    Logistica,
    Compras,
}

impl RequisitionOrigin {
    /// All origins, in the order the combined listing concatenates them.
    pub const ALL: [Self; 3] = [Self::Tic, Self::Logistica, Self::Compras];

    /// SQL table identifier. Safe to interpolate into query text.
    pub const fn table(self) -> &'static str {
        match self {
            Self::Tic => "requisiciones_tic",
            Self::Logistica => "requisiciones_logistica",
            Self::Compras => "requisiciones_compras",
        }
    }

    /// Path segment used by the HTTP routes.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Tic => "tic",
            Self::Logistica => "logistica",
            Self::Compras => "compras",
        }
    }

    /// Human-readable label attached to rows in the combined listing.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tic => "TIC",
            Self::Logistica => "Logística",
            Self::Compras => "Compras",
        }
    }

    /// Resolve an origin from either its slug or its table identifier
    /// (case-insensitive). Ledger rows store the table identifier, request
    /// paths use the slug.
    pub fn lookup(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|origin| {
            origin.slug().eq_ignore_ascii_case(value) || origin.table().eq_ignore_ascii_case(value)
        })
    }
}

impl FromStr for RequisitionOrigin {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown requisition origin '{s}'. Must be one of: tic, logistica, compras"
            ))
        })
    }
}

impl fmt::Display for RequisitionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Concatenate per-origin batches and sort the union newest first.
///
/// Batches are concatenated in the order given and then stable-sorted by
/// `submitted_at` descending, so rows with equal timestamps keep their input
/// order (origin order first, then each batch's own order). The output
/// always has exactly as many rows as the inputs combined.
pub fn merge_newest_first<T, F>(
    batches: Vec<(RequisitionOrigin, Vec<T>)>,
    submitted_at: F,
) -> Vec<(RequisitionOrigin, T)>
where
    F: Fn(&T) -> Timestamp,
{
    let total = batches.iter().map(|(_, rows)| rows.len()).sum();
    let mut merged: Vec<(RequisitionOrigin, T)> = Vec::with_capacity(total);

    for (origin, rows) in batches {
        merged.extend(rows.into_iter().map(|row| (origin, row)));
    }

    merged.sort_by(|(_, a), (_, b)| submitted_at(b).cmp(&submitted_at(a)));
    merged
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 5, 4, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_lookup_accepts_slug_and_table() {
        assert_eq!(RequisitionOrigin::lookup("tic"), Some(RequisitionOrigin::Tic));
        assert_eq!(
            RequisitionOrigin::lookup("REQUISICIONES_COMPRAS"),
            Some(RequisitionOrigin::Compras)
        );
        assert_eq!(
            RequisitionOrigin::lookup(" logistica "),
            Some(RequisitionOrigin::Logistica)
        );
    }

    #[test]
    fn test_unknown_origin_is_rejected() {
        assert_eq!(RequisitionOrigin::lookup("users"), None);
        assert_eq!(RequisitionOrigin::lookup("tic; DROP TABLE users"), None);
        assert_matches!(
            "todas".parse::<RequisitionOrigin>(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_tables_are_fixed_identifiers() {
        for origin in RequisitionOrigin::ALL {
            let table = origin.table();
            assert!(table.starts_with("requisiciones_"));
            assert!(table.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn test_merge_tags_and_sorts_newest_first() {
        let merged = merge_newest_first(
            vec![
                (RequisitionOrigin::Tic, vec![("t1", at(9)), ("t2", at(3))]),
                (RequisitionOrigin::Logistica, vec![("l1", at(7))]),
                (RequisitionOrigin::Compras, vec![("c1", at(11)), ("c2", at(1))]),
            ],
            |row| row.1,
        );

        let order: Vec<_> = merged.iter().map(|(origin, row)| (*origin, row.0)).collect();
        assert_eq!(
            order,
            vec![
                (RequisitionOrigin::Compras, "c1"),
                (RequisitionOrigin::Tic, "t1"),
                (RequisitionOrigin::Logistica, "l1"),
                (RequisitionOrigin::Tic, "t2"),
                (RequisitionOrigin::Compras, "c2"),
            ]
        );
    }

    #[test]
    fn test_merge_breaks_ties_by_input_order() {
        let merged = merge_newest_first(
            vec![
                (RequisitionOrigin::Tic, vec![("t1", at(5))]),
                (RequisitionOrigin::Logistica, vec![("l1", at(5)), ("l2", at(5))]),
                (RequisitionOrigin::Compras, vec![("c1", at(5))]),
            ],
            |row| row.1,
        );
        let names: Vec<_> = merged.iter().map(|(_, row)| row.0).collect();
        assert_eq!(names, vec!["t1", "l1", "l2", "c1"]);
    }

    #[test]
    fn test_merge_of_empty_batches_is_empty() {
        let merged = merge_newest_first::<(&str, Timestamp), _>(
            RequisitionOrigin::ALL.into_iter().map(|o| (o, Vec::new())).collect(),
            |row| row.1,
        );
        assert!(merged.is_empty());
    }
}
