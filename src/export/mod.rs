//! Export module for splitbook
//!
//! Exports a single group's data:
//! - CSV: expenses only (spreadsheet-compatible)
//! - JSON: full group snapshot, machine-readable
//! - YAML: full group snapshot, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_group_json, ExportMetadata, GroupExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_group_yaml;
