//! DHT22 on a single open drain line.

use boardtest_core::{
    domain::{
        entity::ClimateReading,
        ports::{ClimateSensor, SensorError},
    },
    protocol::dht22,
};
use esp_hal::{
    delay::Delay,
    gpio::{DriveMode, Flex, OutputConfig, Pin, Pull},
};

pub struct EspDht22 {
    pin: Flex<'static>,
    delay: Delay,
}

impl EspDht22 {
    pub fn new(pin: impl Pin + 'static) -> Self {
        let mut pin = Flex::new(pin);
        pin.apply_output_config(
            &OutputConfig::default()
                .with_drive_mode(DriveMode::OpenDrain)
                .with_pull(Pull::Up),
        );
        pin.set_high();
        pin.set_output_enable(true);
        pin.set_input_enable(true);
        Self {
            pin,
            delay: Delay::new(),
        }
    }
}

impl ClimateSensor for EspDht22 {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        dht22::read(&mut self.pin, &mut self.delay)
    }
}
