//! # can_logger
//!
//! Core of a CAN-bus logger/sender talking to a USB CAN interface through
//! fixed 64-byte reports.
//!
//! ## Highlights
//! - **Codec**: [`decode`] / [`encode`] between wire reports and [`CanFrame`], with
//!   Standard (11-bit) and Extended (29-bit) id masking; [`format_id`] and
//!   [`parse_byte_string`] for the text the user types or sees.
//! - **Log store**: [`LogStore`] keeps every [`LogEntry`] in order plus a
//!   [`UniqueAggregate`] with one row per `(id, type)`.
//! - **Trace export** (feature `export`): [`render_csv`], [`render_trc`] (PEAK) and
//!   [`render_asc`] (Vector), byte-exact and deterministic.
//!
//! The USB transport, device handshake and UI are not part of this crate: the
//! transport hands report bytes to [`decode`] and writes what [`encode_report`]
//! returns.
//!
//! ```
//! use can_logger::{decode, prepare_send, encode_report, Direction, LogStore};
//!
//! let mut log = LogStore::new();
//!
//! // inbound report from the device
//! let frame = decode(&[0x23, 0x01, 0x00, 0x00, 0x02, 0xAA, 0xBB]).unwrap();
//! log.append(&frame, Direction::Rx);
//!
//! // outbound send typed by the user
//! let tx = prepare_send("7E0", false, "02 01 0C").unwrap();
//! let _report: [u8; 64] = encode_report(&tx).unwrap();
//! log.append(&tx, Direction::Tx);
//!
//! assert_eq!(log.entries()[0].id_display, "123");
//! assert_eq!(log.entries()[1].data_display, "02 01 0C");
//! ```

pub mod codec;
#[cfg(feature = "export")]
pub mod export;
pub mod logstore;
#[doc(hidden)]
pub mod types;

// Top-level re-exports (appear under Crate Items → Structs)
#[doc(inline)]
pub use crate::types::{
    canframe::{CanFrame, Direction, EXTENDED_ID_MASK, FrameId, FrameKind, STANDARD_ID_MASK},
    errors::{CodecError, ExportError},
    log_entry::{EntryType, LogEntry},
    unique::{UniqueAggregate, UniqueEntry},
};

pub use crate::codec::{
    REPORT_SIZE, decode, encode, encode_report, format_bytes, format_id, parse_byte_string, parse_id,
    prepare_send,
};
#[cfg(feature = "export")]
pub use crate::export::{
    ExportOptions, TraceFormat, render_asc, render_asc_with, render_csv, render_trc, render_trc_with,
};
pub use crate::logstore::{LogStore, SharedLogStore};
