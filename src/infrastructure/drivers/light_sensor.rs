use boardtest_core::domain::ports::{LightSensor, SensorError};
use esp_hal::{
    Blocking,
    analog::adc::{Adc, AdcConfig, AdcPin, Attenuation},
    peripherals::{ADC1, GPIO33},
};

type LightAdcPin = AdcPin<GPIO33<'static>, ADC1<'static>>;

/// Photoresistor divider on ADC1, full 0..3.3 V range.
pub struct EspLightSensor {
    adc: Adc<'static, ADC1<'static>, Blocking>,
    pin: LightAdcPin,
}

impl EspLightSensor {
    pub fn new(adc: ADC1<'static>, pin: GPIO33<'static>) -> Self {
        let mut config = AdcConfig::new();
        let pin = config.enable_pin(pin, Attenuation::_11dB);
        Self {
            adc: Adc::new(adc, config),
            pin,
        }
    }
}

impl LightSensor for EspLightSensor {
    fn read_light(&mut self) -> Result<u16, SensorError> {
        nb::block!(self.adc.read_oneshot(&mut self.pin)).map_err(|_| SensorError::Adc)
    }
}
