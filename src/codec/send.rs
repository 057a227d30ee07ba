use crate::codec::{parse_byte_string, parse_id};
use crate::types::canframe::{CanFrame, Direction, FrameKind};
use crate::types::errors::CodecError;

/// Largest payload of a classic CAN frame.
pub const MAX_PAYLOAD: usize = 8;

/// Builds the Tx frame for a send request typed in by the user.
///
/// The id follows the same degrade-to-zero policy as [`format_id`](crate::format_id);
/// the payload must parse completely and hold at most 8 bytes.
///
/// # Errors
/// - [`CodecError::InvalidByte`] for the first token of `data_text` that is not a hex byte.
/// - [`CodecError::PayloadTooLong`] for more than 8 bytes.
pub fn prepare_send(id_text: &str, extended: bool, data_text: &str) -> Result<CanFrame, CodecError> {
    let data: Vec<u8> = parse_byte_string(data_text)?;
    if data.len() > MAX_PAYLOAD {
        return Err(CodecError::PayloadTooLong { len: data.len() });
    }

    let kind: FrameKind = if extended {
        FrameKind::Extended
    } else {
        FrameKind::Standard
    };

    Ok(CanFrame::new(parse_id(id_text, kind), data).with_direction(Direction::Tx))
}
