//! Codes of the 21 key NEC remote shipped with the board kit.

use super::entity::RgbColor;

/// Reported by the decoder for a held key.
pub const NEC_REPEAT_CODE: u32 = 0xFFFF_FFFF;

/// Code of an address/command pair as the key table lists it.
///
/// NEC sends every byte LSB first followed by its inverse; the table keeps
/// the 32 bits in arrival order, first bit highest.
pub const fn nec_code(addr: u8, cmd: u8) -> u32 {
    u32::from_be_bytes([
        addr.reverse_bits(),
        (!addr).reverse_bits(),
        cmd.reverse_bits(),
        (!cmd).reverse_bits(),
    ])
}

/// Step applied to a channel by the `+`/`-` digit keys.
pub const CHANNEL_STEP: i16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteButton {
    Power,
    Digit(u8),
    Up,
    Down,
    VolumeUp,
    VolumeDown,
    Play,
    Previous,
    Next,
    Func,
    Eq,
    St,
}

/// What the loop does with the LED after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteAction {
    None,
    SetColor(RgbColor),
    Adjust { dr: i16, dg: i16, db: i16 },
    ShowStatus,
}

impl RemoteButton {
    pub fn from_code(code: u32) -> Option<Self> {
        let button = match code {
            0x00FF_A25D => Self::Power,
            0x00FF_6897 => Self::Digit(0),
            0x00FF_30CF => Self::Digit(1),
            0x00FF_18E7 => Self::Digit(2),
            0x00FF_7A85 => Self::Digit(3),
            0x00FF_10EF => Self::Digit(4),
            0x00FF_38C7 => Self::Digit(5),
            0x00FF_5AA5 => Self::Digit(6),
            0x00FF_42BD => Self::Digit(7),
            0x00FF_4AB5 => Self::Digit(8),
            0x00FF_52AD => Self::Digit(9),
            0x00FF_906F => Self::Up,
            0x00FF_E01F => Self::Down,
            0x00FF_629D => Self::VolumeUp,
            0x00FF_A857 => Self::VolumeDown,
            0x00FF_02FD => Self::Play,
            0x00FF_22DD => Self::Previous,
            0x00FF_C23D => Self::Next,
            0x00FF_E21D => Self::Func,
            0x00FF_9867 => Self::Eq,
            0x00FF_B04F => Self::St,
            _ => return None,
        };
        Some(button)
    }

    /// Text shown on the display and in the log after `IR Button `.
    pub fn label(self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::Digit(0) => "0",
            Self::Digit(1) => "1",
            Self::Digit(2) => "2",
            Self::Digit(3) => "3",
            Self::Digit(4) => "4",
            Self::Digit(5) => "5",
            Self::Digit(6) => "6",
            Self::Digit(7) => "7",
            Self::Digit(8) => "8",
            Self::Digit(_) => "9",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::VolumeUp => "Vol+",
            Self::VolumeDown => "Vol-",
            Self::Play => "Play",
            Self::Previous => "Prev",
            Self::Next => "Next",
            Self::Func => "Func",
            Self::Eq => "EQ",
            Self::St => "ST",
        }
    }

    pub fn action(self) -> RemoteAction {
        const STEP: i16 = CHANNEL_STEP;
        match self {
            Self::Digit(0) => RemoteAction::SetColor(RgbColor::BLACK),
            Self::Digit(1) => RemoteAction::Adjust { dr: STEP, dg: 0, db: 0 },
            Self::Digit(2) => RemoteAction::Adjust { dr: 0, dg: STEP, db: 0 },
            Self::Digit(3) => RemoteAction::Adjust { dr: 0, dg: 0, db: STEP },
            Self::Digit(4) => RemoteAction::Adjust { dr: -STEP, dg: 0, db: 0 },
            Self::Digit(5) => RemoteAction::Adjust { dr: 0, dg: -STEP, db: 0 },
            Self::Digit(6) => RemoteAction::Adjust { dr: 0, dg: 0, db: -STEP },
            Self::Digit(7) => RemoteAction::SetColor(RgbColor::RED),
            Self::Digit(8) => RemoteAction::SetColor(RgbColor::GREEN),
            Self::Digit(9) => RemoteAction::SetColor(RgbColor::BLUE),
            Self::St => RemoteAction::ShowStatus,
            _ => RemoteAction::None,
        }
    }
}
