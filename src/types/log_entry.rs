use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::codec::format_bytes;
use crate::types::abs_time;
use crate::types::canframe::{CanFrame, Direction, FrameKind};

/// Row classification shown in the log.
///
/// `Tx` marks frames sent by this host, whatever their id space; the id space
/// itself is kept in [`LogEntry::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Sys,
    Std,
    Ext,
    Tx,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Sys => "SYS",
            EntryType::Std => "STD",
            EntryType::Ext => "EXT",
            EntryType::Tx => "TX",
        }
    }

    fn classify(kind: FrameKind, direction: Direction) -> Self {
        match (kind, direction) {
            (FrameKind::System, _) => EntryType::Sys,
            (_, Direction::Tx) => EntryType::Tx,
            (FrameKind::Standard, Direction::Rx) => EntryType::Std,
            (FrameKind::Extended, Direction::Rx) => EntryType::Ext,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the message log. Built once at append time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local wall-clock instant captured when the entry was logged.
    pub timestamp: NaiveDateTime,

    /// Seconds since the session start that was current at append time.
    pub offset: f64,

    /// `"7FF"`, `"1FFFFFFF"`, or the uppercased System label.
    pub id_display: String,

    pub entry_type: EntryType,

    /// Id space of the logged frame (lets Tx rows keep their id width).
    pub kind: FrameKind,

    pub dlc: u8,

    /// Uppercase hex bytes separated by single spaces; the message text for
    /// System rows. Empty when there is no payload.
    pub data_display: String,
}

impl LogEntry {
    pub(crate) fn from_frame(
        frame: &CanFrame,
        direction: Direction,
        timestamp: NaiveDateTime,
        session_start: &NaiveDateTime,
    ) -> Self {
        let kind: FrameKind = frame.kind();
        let (dlc, data_display) = match frame.message() {
            Some(message) => (0, message),
            None => (frame.dlc, format_bytes(&frame.data)),
        };

        LogEntry {
            timestamp,
            offset: abs_time::offset_seconds(session_start, &timestamp),
            id_display: frame.id.display(),
            entry_type: EntryType::classify(kind, direction),
            kind,
            dlc,
            data_display,
        }
    }

    /// `HH:mm:ss.mmm` rendering of [`LogEntry::timestamp`].
    pub fn time_display(&self) -> String {
        abs_time::format_clock(&self.timestamp)
    }

    pub fn direction(&self) -> Direction {
        match self.entry_type {
            EntryType::Tx => Direction::Tx,
            EntryType::Sys | EntryType::Std | EntryType::Ext => Direction::Rx,
        }
    }

    pub fn is_system(&self) -> bool {
        self.entry_type == EntryType::Sys
    }

    /// Text of a System row as written to trace comments: label and message.
    pub fn system_text(&self) -> String {
        format!("{} {}", self.id_display, self.data_display)
            .trim()
            .to_string()
    }
}
