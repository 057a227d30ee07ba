use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::log_entry::{EntryType, LogEntry};

/// Latest state of one `(id_display, entry_type)` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueEntry {
    pub id_display: String,
    pub entry_type: EntryType,
    /// Timestamp of the most recent occurrence.
    pub timestamp: NaiveDateTime,
    pub dlc: u8,
    pub data_display: String,
    /// Number of occurrences since the key was first seen (or last cleared).
    pub count: u64,
}

/// One row per `(id_display, entry_type)`, ordered by first appearance.
///
/// Later occurrences update their row in place: the row never moves.
#[derive(Debug, Clone, Default)]
pub struct UniqueAggregate {
    rows: Vec<UniqueEntry>,
    // (id_display, entry_type) -> index into `rows`
    index: HashMap<(String, EntryType), usize>,
}

impl UniqueAggregate {
    /// Folds `entry` into the aggregate and returns the updated row.
    pub(crate) fn record(&mut self, entry: &LogEntry) -> &UniqueEntry {
        let key: (String, EntryType) = (entry.id_display.clone(), entry.entry_type);

        let existing: Option<usize> = self.index.get(&key).copied();
        let idx: usize = match existing {
            Some(idx) => {
                let row: &mut UniqueEntry = &mut self.rows[idx];
                row.timestamp = entry.timestamp;
                row.dlc = entry.dlc;
                row.data_display.clone_from(&entry.data_display);
                row.count += 1;
                idx
            }
            None => {
                self.rows.push(UniqueEntry {
                    id_display: key.0.clone(),
                    entry_type: key.1,
                    timestamp: entry.timestamp,
                    dlc: entry.dlc,
                    data_display: entry.data_display.clone(),
                    count: 1,
                });
                let idx: usize = self.rows.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };

        &self.rows[idx]
    }

    pub fn get(&self, id_display: &str, entry_type: EntryType) -> Option<&UniqueEntry> {
        self.index
            .get(&(id_display.to_string(), entry_type))
            .and_then(|&idx| self.rows.get(idx))
    }

    /// Rows in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &UniqueEntry> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[UniqueEntry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.index.clear();
    }
}
