//! Common cathode RGB LED on three LEDC low speed channels.

use boardtest_core::domain::{
    entity::RgbColor,
    ports::{LedError, RgbOutput},
};
use esp_hal::{
    gpio::{DriveMode, interconnect::PeripheralOutput},
    ledc::{
        LSGlobalClkSource,
        Ledc,
        LowSpeed,
        channel::{self, Channel, ChannelHW as _, ChannelIFace as _},
        timer::{self, Timer, TimerIFace as _},
    },
    peripherals::LEDC,
    time::Rate,
};

use crate::{config::RGB_PWM_FREQUENCY_KHZ, mk_static};

pub struct EspRgbLed {
    red: Channel<'static, LowSpeed>,
    green: Channel<'static, LowSpeed>,
    blue: Channel<'static, LowSpeed>,
}

impl EspRgbLed {
    /// Configure timer 0 and channels 0/1/2 with 8-bit duty.
    ///
    /// # Panics
    ///
    /// Panics when the LEDC peripheral rejects the timer or channel setup.
    pub fn new(
        ledc: LEDC<'static>,
        red: impl PeripheralOutput<'static>,
        green: impl PeripheralOutput<'static>,
        blue: impl PeripheralOutput<'static>,
    ) -> Self {
        let mut ledc = Ledc::new(ledc);
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

        let pwm_timer = mk_static!(
            Timer<'static, LowSpeed>,
            ledc.timer::<LowSpeed>(timer::Number::Timer0)
        );
        pwm_timer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty8Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_khz(RGB_PWM_FREQUENCY_KHZ),
            })
            .expect("rgb: PWM timer configuration");
        let pwm_timer: &'static Timer<'static, LowSpeed> = pwm_timer;

        let channel_config = || channel::config::Config {
            timer: pwm_timer,
            duty_pct: 0,
            drive_mode: DriveMode::PushPull,
        };
        let mut red = ledc.channel(channel::Number::Channel0, red);
        let mut green = ledc.channel(channel::Number::Channel1, green);
        let mut blue = ledc.channel(channel::Number::Channel2, blue);
        for channel in [&mut red, &mut green, &mut blue] {
            channel
                .configure(channel_config())
                .expect("rgb: PWM channel configuration");
        }

        Self { red, green, blue }
    }
}

impl RgbOutput for EspRgbLed {
    fn write_color(&mut self, color: RgbColor) -> Result<(), LedError> {
        self.red.set_duty_hw(u32::from(color.r));
        self.green.set_duty_hw(u32::from(color.g));
        self.blue.set_duty_hw(u32::from(color.b));
        Ok(())
    }
}
