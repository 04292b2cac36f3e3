//! NEC receiver on a demodulating IR module (output low while the carrier is
//! present).
//!
//! The RMT peripheral times every burst in hardware, so CPU time spent by the
//! loop does not distort the pulse lengths. [`ir_capture_task`] decodes the
//! captured levels and leaves the code in [`IR_CODE`] until the loop picks it
//! up. Like the usual Arduino receivers, decoding pauses after a code until
//! [`RemoteReceiver::resume`].

use core::sync::atomic::{AtomicBool, Ordering};

use boardtest_core::{
    domain::ports::RemoteReceiver,
    protocol::nec::{NecReceiver, Pulse},
};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use esp_hal::{
    Async,
    gpio::{Level, interconnect::PeripheralInput},
    peripherals::RMT,
    rmt::{Channel, Error as RmtError, PulseCode, Rmt, Rx, RxChannelConfig, RxChannelCreator},
    time::Rate,
};
use heapless::Vec;

static IR_CODE: Signal<CriticalSectionRawMutex, u32> = Signal::new();
static IR_ENABLED: AtomicBool = AtomicBool::new(false);

/// One RMT memory block, a NEC frame takes 35 entries
const CAPTURE_CODES: usize = 64;

/// Configure an RMT channel to time the receiver line in microseconds.
pub fn init_ir_input(
    rmt: RMT<'static>,
    pin: impl PeripheralInput<'static>,
) -> Result<Channel<'static, Async, Rx>, RmtError> {
    let rmt = Rmt::new(rmt, Rate::from_mhz(80))?.into_async();
    let config = RxChannelConfig::default()
        // 80 MHz APB clock, 1 µs ticks
        .with_clk_divider(80)
        // Glitches shorter than 2.5 µs
        .with_filter_threshold(200)
        // Longer than any level inside a frame
        .with_idle_threshold(12_000);
    rmt.channel0.configure_rx(pin, config)
}

#[embassy_executor::task]
pub async fn ir_capture_task(mut channel: Channel<'static, Async, Rx>) {
    let mut receiver = NecReceiver::new();
    let mut codes = [PulseCode::default(); CAPTURE_CODES];

    loop {
        codes.iter_mut().for_each(PulseCode::reset);
        let count = match channel.receive(&mut codes).await {
            Ok(count) => count,
            Err(e) => {
                log::debug!("ir: capture failed: {:?}", e);
                continue;
            }
        };

        if !IR_ENABLED.load(Ordering::Acquire) {
            continue;
        }

        let pulses = pulses(&codes[..count]);
        if let Some(code) = receiver.decode(&pulses) {
            IR_ENABLED.store(false, Ordering::Release);
            IR_CODE.signal(code);
        }
    }
}

/// Split RMT entries into levels, up to the end marker.
fn pulses(codes: &[PulseCode]) -> Vec<Pulse, { CAPTURE_CODES * 2 }> {
    let mut pulses = Vec::new();
    let halves = codes
        .iter()
        .flat_map(|code| [(code.level1(), code.length1()), (code.level2(), code.length2())]);
    for (level, length) in halves {
        if length == 0 {
            break;
        }
        let pulse = Pulse {
            mark: level == Level::Low,
            duration_us: u32::from(length),
        };
        if pulses.push(pulse).is_err() {
            break;
        }
    }
    pulses
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IrReceiver;

impl RemoteReceiver for IrReceiver {
    fn try_receive(&mut self) -> Option<u32> {
        IR_CODE.try_take()
    }

    fn resume(&mut self) {
        IR_ENABLED.store(true, Ordering::Release);
    }
}
