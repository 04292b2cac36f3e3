//! NEC remote frames decoded by the `infrared` crate.
//!
//! The firmware captures a burst as a list of levels held by a demodulating
//! receiver; [`NecReceiver`] replays them as edges into the decoder and turns
//! the command into the 32-bit code the key table uses.

use infrared::{
    Receiver,
    protocol::{Nec, nec::NecCommand},
};

use crate::domain::remote::{NEC_REPEAT_CODE, nec_code};

/// Captured durations are in microseconds
const RESOLUTION_HZ: u32 = 1_000_000;

/// Silence reported before the first edge of a burst
const IDLE_GAP_US: u32 = 50_000;

/// One level of the carrier envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Carrier present (receiver output low)
    pub mark: bool,
    pub duration_us: u32,
}

impl Pulse {
    pub const fn mark(duration_us: u32) -> Self {
        Self {
            mark: true,
            duration_us,
        }
    }

    pub const fn space(duration_us: u32) -> Self {
        Self {
            mark: false,
            duration_us,
        }
    }
}

pub struct NecReceiver {
    receiver: Receiver<Nec>,
}

impl Default for NecReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl NecReceiver {
    pub fn new() -> Self {
        Self {
            receiver: Receiver::new(RESOLUTION_HZ),
        }
    }

    /// Decode one burst that starts with a mark.
    ///
    /// A zero length level ends the burst, like the idle marker of a capture.
    pub fn decode(&mut self, pulses: &[Pulse]) -> Option<u32> {
        let mut code = self.edge(IDLE_GAP_US, true);
        for pulse in pulses {
            if pulse.duration_us == 0 {
                break;
            }
            // The level ends and the line flips to the other one
            if let Some(decoded) = self.edge(pulse.duration_us, !pulse.mark) {
                code = Some(decoded);
            }
        }
        code
    }

    fn edge(&mut self, dt_us: u32, mark_starts: bool) -> Option<u32> {
        match self.receiver.event(dt_us, mark_starts) {
            Ok(Some(command)) => Some(command_code(&command)),
            Ok(None) => None,
            Err(_) => {
                log::debug!("ir: dropped malformed frame");
                None
            }
        }
    }
}

/// Code of a decoded command, [`NEC_REPEAT_CODE`] for a held key.
pub fn command_code(command: &NecCommand) -> u32 {
    if command.repeat {
        NEC_REPEAT_CODE
    } else {
        nec_code(command.addr, command.cmd)
    }
}
