//! # logstore
//!
//! The message log of one session: an append-only sequence of [`LogEntry`]
//! plus the [`UniqueAggregate`] view keyed by `(id_display, entry_type)`.
//!
//! A `LogStore` expects a single writer. Received and sent frames both go
//! through [`LogStore::append`], and the caller must not run two appends on
//! the same store at once. [`SharedLogStore`] enforces this with a lock and
//! lets exports take a point-in-time copy while appends continue.
use std::sync::Arc;

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use tracing::debug;

use crate::types::abs_time;
use crate::types::canframe::{CanFrame, Direction};
use crate::types::log_entry::LogEntry;
use crate::types::unique::{UniqueAggregate, UniqueEntry};

#[cfg(feature = "export")]
use crate::export::{ExportOptions, TraceFormat};
#[cfg(feature = "export")]
use crate::types::errors::ExportError;

#[derive(Debug, Clone, Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
    unique: UniqueAggregate,
    /// Instant of the first append since creation or the last `clear`.
    session_start: Option<NaiveDateTime>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `frame` at the current local time. See [`LogStore::append_at`].
    pub fn append(&mut self, frame: &CanFrame, direction: Direction) -> &LogEntry {
        self.append_at(frame, direction, abs_time::now())
    }

    /// Logs `frame` as captured at `timestamp` and returns the new entry.
    ///
    /// The first append of a session anchors `session_start`; every entry's
    /// `offset` is measured from it. The unique view is updated in the same
    /// call. `direction` decides between an Rx row (`STD`/`EXT`) and a `TX`
    /// row; System frames are always `SYS`.
    pub fn append_at(
        &mut self,
        frame: &CanFrame,
        direction: Direction,
        timestamp: NaiveDateTime,
    ) -> &LogEntry {
        let start: NaiveDateTime = match self.session_start {
            Some(start) => start,
            None => {
                debug!("Session started at {}", timestamp);
                self.session_start = Some(timestamp);
                timestamp
            }
        };

        let entry: LogEntry = LogEntry::from_frame(frame, direction, timestamp, &start);
        self.unique.record(&entry);
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Drops the whole log, the unique view and the session anchor.
    pub fn clear(&mut self) {
        debug!("Clearing log ({} entries)", self.entries.len());
        self.entries.clear();
        self.unique.clear();
        self.session_start = None;
    }

    /// Empties the unique view only; the log itself is untouched.
    pub fn clear_unique(&mut self) {
        debug!("Clearing unique view ({} rows)", self.unique.len());
        self.unique.clear();
    }

    /// Point-in-time copy of the log, in append order.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn unique(&self) -> &UniqueAggregate {
        &self.unique
    }

    pub fn session_start(&self) -> Option<NaiveDateTime> {
        self.session_start
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the log against its own session anchor, so that trace offsets
    /// agree with each entry's `offset`. An empty log renders headers only,
    /// stamped with the current time.
    #[cfg(feature = "export")]
    pub fn render(&self, format: TraceFormat, options: &ExportOptions) -> Result<String, ExportError> {
        let start: NaiveDateTime = self.session_start.unwrap_or_else(abs_time::now);
        format.render(&self.entries, &start, options)
    }
}

/// Cloneable, thread-safe handle to a [`LogStore`].
///
/// Every method holds the lock for its own duration only. Rendering copies
/// the log under the lock and formats it after releasing it.
#[derive(Debug, Clone, Default)]
pub struct SharedLogStore {
    inner: Arc<Mutex<LogStore>>,
}

impl SharedLogStore {
    pub fn new(store: LogStore) -> Self {
        SharedLogStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn append(&self, frame: &CanFrame, direction: Direction) -> LogEntry {
        self.inner.lock().append(frame, direction).clone()
    }

    pub fn append_at(&self, frame: &CanFrame, direction: Direction, timestamp: NaiveDateTime) -> LogEntry {
        self.inner.lock().append_at(frame, direction, timestamp).clone()
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.inner.lock().snapshot()
    }

    /// Copy of the unique view, in first-seen order.
    pub fn unique_snapshot(&self) -> Vec<UniqueEntry> {
        self.inner.lock().unique().as_slice().to_vec()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn clear_unique(&self) {
        self.inner.lock().clear_unique();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut LogStore) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    #[cfg(feature = "export")]
    pub fn render(&self, format: TraceFormat, options: &ExportOptions) -> Result<String, ExportError> {
        let (entries, start) = {
            let store = self.inner.lock();
            (store.snapshot(), store.session_start())
        };
        let start: NaiveDateTime = start.unwrap_or_else(abs_time::now);
        format.render(&entries, &start, options)
    }
}
