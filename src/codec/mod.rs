//! # codec
//!
//! Conversion between [`CanFrame`] and the 64-byte report exchanged with the
//! USB CAN interface, plus the text helpers used to display ids and payloads.
//!
//! Report layout (little-endian):
//!
//! ```text
//! offset  0..4   raw id (bit 31 set = Extended)
//! offset  4      dlc
//! offset  5..    data bytes (dlc of them), rest reserved/zero
//! ```

mod bytes;
mod id;
mod send;

pub use bytes::{format_bytes, parse_byte_string};
pub use id::{format_id, parse_id};
pub use send::prepare_send;

use tracing::trace;

use crate::types::canframe::{CanFrame, Direction, EXTENDED_ID_MASK, FrameId, STANDARD_ID_MASK};
use crate::types::errors::CodecError;

/// Size of one wire report, in and out.
pub const REPORT_SIZE: usize = 64;
/// Bytes preceding the payload: 4 id bytes and the dlc.
pub const HEADER_LEN: usize = 5;
/// Bit 31 of the raw id marks an Extended frame.
pub const EXTENDED_FLAG: u32 = 0x8000_0000;

/// Decodes the populated prefix of a wire report into a received frame.
///
/// The payload is clamped to the bytes actually present: a report of 5 bytes
/// announcing `dlc = 8` yields an empty payload with `dlc` still 8. Bytes past
/// the payload are ignored.
///
/// # Errors
/// - [`CodecError::TooShort`] if `report` holds fewer than 5 bytes.
pub fn decode(report: &[u8]) -> Result<CanFrame, CodecError> {
    if report.len() < HEADER_LEN {
        return Err(CodecError::TooShort { len: report.len() });
    }

    let raw_id: u32 = u32::from_le_bytes([report[0], report[1], report[2], report[3]]);
    let dlc: u8 = report[4];

    // never read past a truncated transfer
    let n: usize = usize::from(dlc).min(report.len() - HEADER_LEN);
    let data: Vec<u8> = report[HEADER_LEN..HEADER_LEN + n].to_vec();

    let id: FrameId = if raw_id & EXTENDED_FLAG != 0 {
        FrameId::extended(raw_id)
    } else {
        FrameId::standard(raw_id)
    };

    trace!("Decoded report: ID={} dlc={} len={}", id, dlc, data.len());

    Ok(CanFrame {
        id,
        dlc,
        data,
        direction: Direction::Rx,
    })
}

/// Encodes a bus frame as `5 + data.len()` bytes.
///
/// The id is masked to its kind before the Extended flag is applied, and the
/// written dlc is `data.len()`. The payload is copied verbatim: keeping it
/// within 8 bytes is up to the caller.
///
/// # Errors
/// - [`CodecError::InvalidKind`] for System frames.
/// - [`CodecError::PayloadTooLong`] if the payload length does not fit the dlc byte.
pub fn encode(frame: &CanFrame) -> Result<Vec<u8>, CodecError> {
    let raw_id: u32 = match &frame.id {
        FrameId::Standard(id) => id & STANDARD_ID_MASK,
        FrameId::Extended(id) => (id & EXTENDED_ID_MASK) | EXTENDED_FLAG,
        FrameId::System(_) => return Err(CodecError::InvalidKind),
    };
    let dlc: u8 = u8::try_from(frame.data.len()).map_err(|_| CodecError::PayloadTooLong {
        len: frame.data.len(),
    })?;

    let mut out: Vec<u8> = Vec::with_capacity(HEADER_LEN + frame.data.len());
    out.extend_from_slice(&raw_id.to_le_bytes());
    out.push(dlc);
    out.extend_from_slice(&frame.data);

    trace!("Encoded frame: ID={} dlc={}", frame.id, dlc);
    Ok(out)
}

/// Encodes a bus frame into a full, zero-padded wire report.
///
/// # Errors
/// Same as [`encode`], plus [`CodecError::PayloadTooLong`] when the encoded
/// frame exceeds [`REPORT_SIZE`].
pub fn encode_report(frame: &CanFrame) -> Result<[u8; REPORT_SIZE], CodecError> {
    let encoded: Vec<u8> = encode(frame)?;
    if encoded.len() > REPORT_SIZE {
        return Err(CodecError::PayloadTooLong {
            len: frame.data.len(),
        });
    }

    let mut report = [0u8; REPORT_SIZE];
    report[..encoded.len()].copy_from_slice(&encoded);
    Ok(report)
}
