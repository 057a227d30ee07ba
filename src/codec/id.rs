use tracing::warn;

use crate::types::canframe::{FrameId, FrameKind};

/// Parses user or device supplied hex text into a masked [`FrameId`].
///
/// Accepts an optional `0x`/`0X` prefix and surrounding whitespace. Text
/// that is not valid hex becomes id `0` with a warning: a malformed id must
/// still produce a loggable entry.
pub fn parse_id(text: &str, kind: FrameKind) -> FrameId {
    match kind {
        FrameKind::System => FrameId::system(text),
        FrameKind::Standard => FrameId::standard(hex_or_zero(text)),
        FrameKind::Extended => FrameId::extended(hex_or_zero(text)),
    }
}

/// Canonical display form of an id given as hex text (or a System label).
///
/// ```
/// use can_logger::{format_id, FrameKind};
///
/// assert_eq!(format_id("7ff", FrameKind::Standard), "7FF");
/// assert_eq!(format_id("1fffffff", FrameKind::Extended), "1FFFFFFF");
/// assert_eq!(format_id("zz", FrameKind::Standard), "000");
/// ```
pub fn format_id(text: &str, kind: FrameKind) -> String {
    parse_id(text, kind).display()
}

fn hex_or_zero(text: &str) -> u32 {
    let trimmed: &str = text.trim();
    let digits: &str = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    // parsed wide so oversized ids are masked rather than rejected
    match u64::from_str_radix(digits, 16) {
        Ok(value) if !digits.starts_with('+') => (value & u64::from(u32::MAX)) as u32,
        _ => {
            warn!("Invalid hex id '{}', using 0", text);
            0
        }
    }
}
