//! Audit logging for splitbook
//!
//! Every create, update and delete of a group, member, expense or settlement
//! record is appended to a line-delimited JSON log (`audit.log`).
//!
//! - `AuditEntry`: a single operation with optional before/after snapshots.
//! - `AuditLogger`: appends entries and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
