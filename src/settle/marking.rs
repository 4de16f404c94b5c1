//! Ephemeral "settled" marks over a list of suggestions
//!
//! Marks only affect presentation. They are never saved and never feed back
//! into balances; a fresh board is built every time suggestions are computed.

use serde::Serialize;

use super::calculator::TransferSuggestion;
use crate::error::{SplitbookError, SplitbookResult};

/// A suggestion as displayed, with its 1-based position in the computed list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardEntry {
    pub id: usize,
    pub suggestion: TransferSuggestion,
    pub settled: bool,
}

/// Suggestions in display order: unsettled first, settled last
#[derive(Debug, Clone, Default)]
pub struct SuggestionBoard {
    entries: Vec<BoardEntry>,
}

impl SuggestionBoard {
    /// Number suggestions from 1 in the order they were computed
    pub fn new(suggestions: Vec<TransferSuggestion>) -> Self {
        let entries = suggestions
            .into_iter()
            .enumerate()
            .map(|(i, suggestion)| BoardEntry {
                id: i + 1,
                suggestion,
                settled: false,
            })
            .collect();
        Self { entries }
    }

    /// Entries in display order
    pub fn entries(&self) -> &[BoardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries not yet marked
    pub fn unsettled_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.settled).count()
    }

    /// Mark a suggestion as acted upon
    pub fn mark_settled(&mut self, id: usize) -> SplitbookResult<()> {
        self.set_settled(id, true)
    }

    /// Flip a suggestion's mark, returning the new state
    pub fn toggle(&mut self, id: usize) -> SplitbookResult<bool> {
        let settled = !self.entry(id)?.settled;
        self.set_settled(id, settled)?;
        Ok(settled)
    }

    fn entry(&self, id: usize) -> SplitbookResult<&BoardEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| SplitbookError::NotFound {
                entity_type: "Suggestion",
                identifier: id.to_string(),
            })
    }

    fn set_settled(&mut self, id: usize, settled: bool) -> SplitbookResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| SplitbookError::NotFound {
                entity_type: "Suggestion",
                identifier: id.to_string(),
            })?;
        entry.settled = settled;

        // within each partition, keep computed order
        self.entries.sort_by_key(|e| (e.settled, e.id));
        Ok(())
    }
}
