use core::marker::PhantomData;

use boardtest_core::domain::ports::{BoardHardware, TextDisplay};
#[cfg(not(feature = "internal-led"))]
use boardtest_core::domain::ports::NoLed;
use esp_hal::gpio::{Input, Output};

use super::{EspDht22, EspLightSensor, EspRandom, EspRgbLed, IrReceiver};

/// The ESP32 test board, `D` is the display returned by
/// [`init_lcd`](super::init_lcd)
pub struct EspBoard<D>(PhantomData<D>);

impl<D: TextDisplay> BoardHardware for EspBoard<D> {
    type Display = D;
    type Rgb = EspRgbLed;
    type Climate = EspDht22;
    type Light = EspLightSensor;
    type Remote = IrReceiver;
    type Random = EspRandom;
    type Button = Input<'static>;
    type Led = Output<'static>;
    #[cfg(feature = "internal-led")]
    type InternalLed = Output<'static>;
    #[cfg(not(feature = "internal-led"))]
    type InternalLed = NoLed;
    type Delay = embassy_time::Delay;
}
