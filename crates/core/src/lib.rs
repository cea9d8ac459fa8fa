//! Domain rules for the requisitions desk: approval ledger state machine,
//! requisition origins, and the mind-map graph. Pure logic, no I/O.

pub mod approval;
pub mod error;
pub mod mindmap;
pub mod requisition;
pub mod types;
