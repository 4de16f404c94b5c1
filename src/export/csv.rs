//! CSV Export functionality
//!
//! Exports a group's expenses to CSV, one row per expense, with member names
//! resolved for the payer and participants.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{GroupId, MemberId};
use crate::storage::Storage;

const HEADER: [&str; 8] = [
    "ID",
    "Date",
    "Description",
    "Category",
    "Amount",
    "Paid By",
    "Split Between",
    "Share",
];

/// Export a group's expenses to CSV, in the order they were recorded
///
/// Returns the number of expense rows written.
pub fn export_expenses_csv<W: Write>(
    storage: &Storage,
    group_id: GroupId,
    writer: W,
) -> SplitbookResult<usize> {
    storage
        .groups
        .get(group_id)?
        .ok_or_else(|| SplitbookError::group_not_found(group_id.to_string()))?;

    let names: HashMap<MemberId, String> = storage
        .members
        .get_by_group(group_id)?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();
    let name_of = |id: &MemberId| names.get(id).cloned().unwrap_or_else(|| id.to_string());

    let csv_err = |e: csv::Error| SplitbookError::Export(e.to_string());
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER).map_err(csv_err)?;

    let expenses = storage.expenses.get_by_group(group_id)?;
    for expense in &expenses {
        let split = expense
            .split_between
            .iter()
            .map(name_of)
            .collect::<Vec<_>>()
            .join("; ");

        out.write_record([
            expense.id.as_uuid().to_string(),
            expense.date.to_string(),
            expense.description.clone(),
            expense.category_or_fallback().to_string(),
            format!("{:.2}", expense.amount.to_units()),
            name_of(&expense.paid_by),
            split,
            format!("{:.2}", expense.share_per_participant()),
        ])
        .map_err(csv_err)?;
    }

    out.flush()
        .map_err(|e| SplitbookError::Export(e.to_string()))?;
    Ok(expenses.len())
}
