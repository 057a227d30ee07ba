use std::fmt;

use serde::{Deserialize, Serialize};

/// Mask for an 11-bit Standard identifier.
pub const STANDARD_ID_MASK: u32 = 0x7FF;
/// Mask for a 29-bit Extended identifier.
pub const EXTENDED_ID_MASK: u32 = 0x1FFF_FFFF;

/// Identifier space of a frame.
///
/// `System` is not a bus frame: it marks error/status lines that are logged
/// next to real traffic and carry a free-text label instead of a numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    Standard,
    Extended,
    System,
}

impl FrameKind {
    /// Bit mask applied to numeric ids of this kind (`None` for `System`).
    pub fn id_mask(self) -> Option<u32> {
        match self {
            FrameKind::Standard => Some(STANDARD_ID_MASK),
            FrameKind::Extended => Some(EXTENDED_ID_MASK),
            FrameKind::System => None,
        }
    }

    /// Number of hex digits used to display an id of this kind.
    pub fn id_width(self) -> usize {
        match self {
            FrameKind::Standard => 3,
            FrameKind::Extended => 8,
            FrameKind::System => 0,
        }
    }
}

/// Whether a frame was received from the bus or sent by this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Rx,
    Tx,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Rx => "Rx",
            Direction::Tx => "Tx",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frame identifier, tagged with its identifier space.
///
/// Numeric variants may hold out-of-range values when built directly; every
/// accessor masks them to the width of their kind, so a stray high bit never
/// reaches the wire or the display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameId {
    Standard(u32),
    Extended(u32),
    System(String),
}

impl FrameId {
    /// Standard id, masked to 11 bits.
    pub fn standard(raw: u32) -> Self {
        FrameId::Standard(raw & STANDARD_ID_MASK)
    }

    /// Extended id, masked to 29 bits.
    pub fn extended(raw: u32) -> Self {
        FrameId::Extended(raw & EXTENDED_ID_MASK)
    }

    pub fn system(label: impl Into<String>) -> Self {
        FrameId::System(label.into())
    }

    pub fn kind(&self) -> FrameKind {
        match self {
            FrameId::Standard(_) => FrameKind::Standard,
            FrameId::Extended(_) => FrameKind::Extended,
            FrameId::System(_) => FrameKind::System,
        }
    }

    /// Numeric id masked to its kind, `None` for System frames.
    pub fn raw(&self) -> Option<u32> {
        match self {
            FrameId::Standard(id) => Some(id & STANDARD_ID_MASK),
            FrameId::Extended(id) => Some(id & EXTENDED_ID_MASK),
            FrameId::System(_) => None,
        }
    }

    /// Canonical display text: 3 uppercase hex digits for Standard, 8 for
    /// Extended, the uppercased label for System.
    pub fn display(&self) -> String {
        match self {
            FrameId::Standard(id) => format!("{:03X}", id & STANDARD_ID_MASK),
            FrameId::Extended(id) => format!("{:08X}", id & EXTENDED_ID_MASK),
            FrameId::System(label) => label.to_uppercase(),
        }
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// A single CAN frame (or System pseudo-frame) as it travels between the
/// device and the log.
///
/// `dlc` is the *declared* length. Frames decoded from a truncated report may
/// carry fewer bytes in `data` than `dlc` announces; frames built locally
/// always have `dlc == data.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanFrame {
    pub id: FrameId,
    pub dlc: u8,
    pub data: Vec<u8>,
    pub direction: Direction,
}

impl CanFrame {
    /// Builds a received frame whose `dlc` matches the payload length.
    pub fn new(id: FrameId, data: Vec<u8>) -> Self {
        let dlc: u8 = u8::try_from(data.len()).unwrap_or(u8::MAX);
        CanFrame {
            id,
            dlc,
            data,
            direction: Direction::Rx,
        }
    }

    /// Builds a System pseudo-frame for an error or status line.
    pub fn system(label: impl Into<String>, message: &str) -> Self {
        CanFrame {
            id: FrameId::system(label),
            dlc: 0,
            data: message.as_bytes().to_vec(),
            direction: Direction::Rx,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn kind(&self) -> FrameKind {
        self.id.kind()
    }

    pub fn is_system(&self) -> bool {
        matches!(self.id, FrameId::System(_))
    }

    /// Message text of a System frame (lossy UTF-8), `None` for bus frames.
    pub fn message(&self) -> Option<String> {
        match self.id {
            FrameId::System(_) => Some(String::from_utf8_lossy(&self.data).into_owned()),
            FrameId::Standard(_) | FrameId::Extended(_) => None,
        }
    }
}

impl fmt::Display for CanFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.direction, self.id, self.dlc)?;
        for byte in &self.data {
            write!(f, " {:02X}", byte)?;
        }
        Ok(())
    }
}
