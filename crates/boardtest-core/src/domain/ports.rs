//! Ports the board use cases are written against.
//!
//! Plain digital lines (button, LEDs) and delays use the `embedded-hal`
//! traits directly; everything with a protocol behind it gets a port here.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use super::entity::{ClimateReading, RgbColor};
use super::provisioning::ProvisioningState;
use super::settings::BoardSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// A control or data line could not be driven
    Bus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    /// The PWM channel rejected the duty
    Pwm,
    /// A digital LED line could not be driven
    Pin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer within the expected time
    Timeout,
    /// The frame was received but the checksum does not match
    Checksum,
    /// The sensor returned a value that is not a number
    InvalidReading,
    /// The analog converter could not be read
    Adc,
    /// The data line could not be driven or sampled
    Pin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// The settings could not be queued for persistence
    QueueFull,
}

/// Character display addressed by column and row.
pub trait TextDisplay {
    fn clear(&mut self) -> Result<(), DisplayError>;
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;
}

/// Three channel LED driven by PWM duties.
pub trait RgbOutput {
    fn write_color(&mut self, color: RgbColor) -> Result<(), LedError>;
}

pub trait ClimateSensor {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;
}

pub trait LightSensor {
    /// Raw converter value, higher is brighter
    fn read_light(&mut self) -> Result<u16, SensorError>;
}

/// Source of decoded infrared codes.
pub trait RemoteReceiver {
    /// Take the last decoded code, if any.
    fn try_receive(&mut self) -> Option<u32>;
    /// Re-arm the receiver after a code was handled.
    fn resume(&mut self);
}

pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}

pub trait SettingsReader {
    fn read_settings(&self) -> BoardSettings;
}

pub trait SettingsWriter {
    fn write_settings(&mut self, settings: &BoardSettings) -> Result<(), SettingsError>;
}

pub trait ProvisioningStateReader {
    fn provisioning_state(&self) -> ProvisioningState;
}

/// Everything the polling loop touches, bundled behind associated types.
pub trait BoardHardware {
    type Display: TextDisplay;
    type Rgb: RgbOutput;
    type Climate: ClimateSensor;
    type Light: LightSensor;
    type Remote: RemoteReceiver;
    type Random: RandomSource;
    type Button: InputPin;
    type Led: OutputPin;
    /// [`NoLed`] on boards where the line is taken by the console
    type InternalLed: OutputPin;
    type Delay: DelayNs;
}

/// Stand-in for an LED that is not wired on this board variant.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLed;

impl embedded_hal::digital::ErrorType for NoLed {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
