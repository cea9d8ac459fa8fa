//! Approval ledger state machine, delivery retention window, and the
//! tab partitioning used by the approvals view.
//!
//! A ledger entry is created once a requisition has been decided (approved
//! or rejected). The only transition afterwards is `Aprobado -> Entregado`;
//! rejected and delivered entries are terminal.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Stored tag for an approved requisition.
pub const STATE_APPROVED: &str = "Aprobado";

/// Stored tag for a rejected requisition (shown as the pending/rejected tab).
pub const STATE_REJECTED: &str = "Rechazado";

/// Stored tag for an approved requisition that has been handed over.
pub const STATE_DELIVERED: &str = "Entregado";

/// Days a delivered entry stays in the active listing after delivery. The
/// window is applied in SQL against the database clock.
pub const DELIVERY_RETENTION_DAYS: i32 = 60;

/// Maximum length of approver / deliverer names.
pub const MAX_PERSON_NAME_LENGTH: usize = 200;

/// Decision state of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApprovalState {
    Approved,
    Rejected,
    Delivered,
}

impl ApprovalState {
    /// The tag written to the `estado` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => STATE_APPROVED,
            Self::Rejected => STATE_REJECTED,
            Self::Delivered => STATE_DELIVERED,
        }
    }

    /// Parse a stored tag. Matching is case-insensitive and ignores
    /// surrounding whitespace, since legacy rows mix `aprobado`/`APROBADO`.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        [Self::Approved, Self::Rejected, Self::Delivered]
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(tag))
    }

    /// Whether the state machine allows moving from `self` to `next`.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Approved, Self::Delivered))
    }
}

/// Parse the state requested when recording a new decision.
///
/// Only `Aprobado` and `Rechazado` can be recorded; `Entregado` is reachable
/// exclusively through the delivery transition.
pub fn parse_decision(tag: &str) -> Result<ApprovalState, CoreError> {
    match ApprovalState::parse(tag) {
        Some(state @ (ApprovalState::Approved | ApprovalState::Rejected)) => Ok(state),
        Some(ApprovalState::Delivered) => Err(CoreError::Validation(format!(
            "'{STATE_DELIVERED}' cannot be recorded directly; confirm the delivery of an approved entry instead"
        ))),
        None => Err(CoreError::Validation(format!(
            "Invalid decision '{tag}'. Must be one of: {STATE_APPROVED}, {STATE_REJECTED}"
        ))),
    }
}

/// Validate and normalize a person name (approver or deliverer).
///
/// Returns the trimmed name. `field` names the offending request field in
/// the error message.
pub fn validate_person_name(field: &str, name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_PERSON_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_PERSON_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Check that the entry with the given stored state may be marked delivered.
pub fn ensure_deliverable(id: DbId, stored_state: &str) -> Result<(), CoreError> {
    match ApprovalState::parse(stored_state) {
        Some(state) if state.can_transition_to(ApprovalState::Delivered) => Ok(()),
        Some(state) => Err(CoreError::Conflict(format!(
            "Approval {id} is '{}' and cannot be marked as delivered",
            state.as_str()
        ))),
        None => Err(CoreError::Conflict(format!(
            "Approval {id} has unknown state '{stored_state}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tab partitioning
// ---------------------------------------------------------------------------

/// Read access to the fields the tab partitioning needs.
pub trait LedgerEntry {
    /// Parsed state, or `None` when the stored tag is not recognised.
    fn state(&self) -> Option<ApprovalState>;
    fn decided_at(&self) -> Timestamp;
    fn delivered_at(&self) -> Option<Timestamp>;
}

/// The three tabs of the approvals view.
#[derive(Debug, Serialize)]
pub struct LedgerTabs<T> {
    pub aprobadas: Vec<T>,
    pub rechazadas: Vec<T>,
    pub entregadas: Vec<T>,
}

/// Split the active ledger into its tabs.
///
/// Each tab is sorted newest first by its relevant timestamp: the decision
/// time for approved and rejected entries, the delivery time (falling back to
/// the decision time) for delivered ones. Sorting is stable, so entries with
/// equal timestamps keep their input order. Entries with an unrecognised
/// state appear in no tab.
pub fn partition_tabs<T: LedgerEntry>(entries: Vec<T>) -> LedgerTabs<T> {
    let mut tabs = LedgerTabs {
        aprobadas: Vec::new(),
        rechazadas: Vec::new(),
        entregadas: Vec::new(),
    };

    for entry in entries {
        match entry.state() {
            Some(ApprovalState::Approved) => tabs.aprobadas.push(entry),
            Some(ApprovalState::Rejected) => tabs.rechazadas.push(entry),
            Some(ApprovalState::Delivered) => tabs.entregadas.push(entry),
            None => {}
        }
    }

    tabs.aprobadas.sort_by(|a, b| b.decided_at().cmp(&a.decided_at()));
    tabs.rechazadas.sort_by(|a, b| b.decided_at().cmp(&a.decided_at()));
    tabs.entregadas.sort_by_key(|e| std::cmp::Reverse(delivery_sort_key(e)));

    tabs
}

fn delivery_sort_key<T: LedgerEntry>(entry: &T) -> Timestamp {
    entry.delivered_at().unwrap_or_else(|| entry.decided_at())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    struct Entry {
        id: DbId,
        state: &'static str,
        decided_at: Timestamp,
        delivered_at: Option<Timestamp>,
    }

    impl LedgerEntry for Entry {
        fn state(&self) -> Option<ApprovalState> {
            ApprovalState::parse(self.state)
        }
        fn decided_at(&self) -> Timestamp {
            self.decided_at
        }
        fn delivered_at(&self) -> Option<Timestamp> {
            self.delivered_at
        }
    }

    fn day(d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, d, 12, 0, 0).unwrap()
    }

    fn entry(id: DbId, state: &'static str, decided: u32, delivered: Option<u32>) -> Entry {
        Entry {
            id,
            state,
            decided_at: day(decided),
            delivered_at: delivered.map(day),
        }
    }

    fn ids(entries: &[Entry]) -> Vec<DbId> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ApprovalState::parse("aprobado"), Some(ApprovalState::Approved));
        assert_eq!(ApprovalState::parse("RECHAZADO"), Some(ApprovalState::Rejected));
        assert_eq!(ApprovalState::parse(" Entregado "), Some(ApprovalState::Delivered));
        assert_eq!(ApprovalState::parse("pendiente"), None);
        assert_eq!(ApprovalState::parse(""), None);
    }

    #[test]
    fn test_only_approved_can_be_delivered() {
        use ApprovalState::*;
        assert!(Approved.can_transition_to(Delivered));
        assert!(!Rejected.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(Delivered));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Delivered.can_transition_to(Approved));
    }

    #[test]
    fn test_parse_decision_rejects_delivered() {
        assert_eq!(parse_decision("aprobado").unwrap(), ApprovalState::Approved);
        assert_eq!(parse_decision("Rechazado").unwrap(), ApprovalState::Rejected);
        assert_matches!(parse_decision("Entregado"), Err(CoreError::Validation(_)));
        assert_matches!(parse_decision("maybe"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_person_name_is_trimmed_and_required() {
        assert_eq!(
            validate_person_name("entregado_por", "  Ana Ruiz ").unwrap(),
            "Ana Ruiz"
        );
        let err = validate_person_name("entregado_por", "   ").unwrap_err();
        assert!(err.to_string().contains("entregado_por must not be empty"));
        let long = "x".repeat(MAX_PERSON_NAME_LENGTH + 1);
        assert!(validate_person_name("aprobador", &long).is_err());
    }

    #[test]
    fn test_ensure_deliverable() {
        assert!(ensure_deliverable(1, "aprobado").is_ok());
        assert_matches!(ensure_deliverable(2, "Rechazado"), Err(CoreError::Conflict(_)));
        assert_matches!(ensure_deliverable(3, "Entregado"), Err(CoreError::Conflict(_)));
        assert_matches!(ensure_deliverable(4, "???"), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn test_partition_tabs_by_state() {
        let tabs = partition_tabs(vec![
            entry(1, "Aprobado", 1, None),
            entry(2, "rechazado", 2, None),
            entry(3, "ENTREGADO", 3, Some(4)),
            entry(4, "desconocido", 5, None),
        ]);
        assert_eq!(ids(&tabs.aprobadas), vec![1]);
        assert_eq!(ids(&tabs.rechazadas), vec![2]);
        assert_eq!(ids(&tabs.entregadas), vec![3]);
    }

    #[test]
    fn test_partition_tabs_sorts_newest_first_and_is_stable() {
        let tabs = partition_tabs(vec![
            entry(1, "Aprobado", 1, None),
            entry(2, "Aprobado", 5, None),
            entry(3, "Aprobado", 5, None),
            entry(4, "Aprobado", 3, None),
        ]);
        assert_eq!(ids(&tabs.aprobadas), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_delivered_tab_sorts_by_delivery_with_fallback() {
        let tabs = partition_tabs(vec![
            // Decided late, delivered early.
            entry(1, "Entregado", 9, Some(10)),
            // Decided early, delivered late.
            entry(2, "Entregado", 1, Some(20)),
            // Legacy row without a delivery timestamp sorts by decision time.
            entry(3, "Entregado", 15, None),
        ]);
        assert_eq!(ids(&tabs.entregadas), vec![2, 3, 1]);
    }
}
