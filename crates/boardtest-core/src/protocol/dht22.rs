//! DHT22 (AM2302) reads through the `dht22-sensor` driver.

use dht22_sensor::{Dht22, DhtError};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::domain::entity::ClimateReading;
use crate::domain::ports::SensorError;

/// One blocking read on an open drain line pulled up to VCC.
pub fn read<P, D>(pin: &mut P, delay: &mut D) -> Result<ClimateReading, SensorError>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    let reading = Dht22::new(pin, delay).read()?;
    climate_reading(reading.temperature, reading.relative_humidity)
}

/// Reject values that are not numbers.
pub fn climate_reading(temperature: f32, humidity: f32) -> Result<ClimateReading, SensorError> {
    let reading = ClimateReading {
        temperature,
        humidity,
    };
    if !reading.is_valid() {
        return Err(SensorError::InvalidReading);
    }
    Ok(reading)
}

impl<E> From<DhtError<E>> for SensorError {
    fn from(err: DhtError<E>) -> Self {
        match err {
            DhtError::Timeout => SensorError::Timeout,
            DhtError::ChecksumMismatch => SensorError::Checksum,
            DhtError::PinError(_) => SensorError::Pin,
        }
    }
}
