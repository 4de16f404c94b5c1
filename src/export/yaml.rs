//! YAML Export functionality
//!
//! Exports one group's complete data to YAML for human-readable backup.

use std::io::Write;

use crate::error::{SplitbookError, SplitbookResult};
use crate::export::json::GroupExport;
use crate::models::GroupId;
use crate::storage::Storage;

/// Export a group to YAML
pub fn export_group_yaml<W: Write>(
    storage: &Storage,
    group_id: GroupId,
    writer: &mut W,
) -> SplitbookResult<()> {
    let export = GroupExport::from_storage(storage, group_id)?;
    let io_err = |e: std::io::Error| SplitbookError::Export(e.to_string());

    writeln!(writer, "# splitbook group export: {}", export.group.name).map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SplitbookError::Export(e.to_string()))
}
