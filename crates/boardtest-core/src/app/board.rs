use core::fmt::Write as _;

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use heapless::String;
use log::{info, warn};

use crate::domain::{
    entity::{ClimateReading, RgbColor},
    ports::{
        BoardHardware,
        ClimateSensor,
        DisplayError,
        LedError,
        LightSensor,
        ProvisioningStateReader,
        RandomSource,
        RemoteReceiver,
        RgbOutput,
        SettingsReader,
        TextDisplay,
    },
    remote::{RemoteAction, RemoteButton},
    settings::BoardSettings,
    status::StatusPage,
};

/// How long the busy LED stays on after a button press
const BUTTON_HOLD_MS: u32 = 5000;
const UPTIME_COLUMN: u8 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    Display(DisplayError),
    Led(LedError),
    Button,
}

impl From<DisplayError> for BoardError {
    fn from(error: DisplayError) -> Self {
        BoardError::Display(error)
    }
}

impl From<LedError> for BoardError {
    fn from(error: LedError) -> Self {
        BoardError::Led(error)
    }
}

/// Peripherals handed to [`BoardUsecases`].
pub struct BoardParts<H: BoardHardware> {
    pub display: H::Display,
    pub rgb: H::Rgb,
    pub climate: H::Climate,
    pub light: H::Light,
    pub remote: H::Remote,
    pub random: H::Random,
    pub button: H::Button,
    pub red_led: H::Led,
    pub internal_led: H::InternalLed,
    pub delay: H::Delay,
}

/// The polling loop of the test board.
pub struct BoardUsecases<H: BoardHardware, C: SettingsReader + ProvisioningStateReader> {
    parts: BoardParts<H>,
    config: C,
    color: RgbColor,
    climate: ClimateReading,
    light: u16,
    dht_last_read: u64,
}

impl<H: BoardHardware, C: SettingsReader + ProvisioningStateReader> BoardUsecases<H, C> {
    pub fn new(parts: BoardParts<H>, config: C) -> Self {
        Self {
            parts,
            config,
            color: RgbColor::BLACK,
            climate: ClimateReading::default(),
            light: 0,
            dht_last_read: 0,
        }
    }

    pub fn color(&self) -> RgbColor {
        self.color
    }

    pub fn climate(&self) -> ClimateReading {
        self.climate
    }

    pub fn light(&self) -> u16 {
        self.light
    }

    /// Greet on the display, turn the LED off and arm the receiver.
    pub fn start(&mut self) -> Result<(), BoardError> {
        let display = &mut self.parts.display;
        display.clear()?;
        display.print("Hello world!")?;

        self.set_rgb(0, 0, 0)?;

        info!("Enabling IR Receiver");
        self.parts.remote.resume();
        Ok(())
    }

    /// One pass of the polling loop.
    pub async fn tick(&mut self, now: u64) -> Result<(), BoardError> {
        self.show_uptime(now)?;
        self.check_dht(now)?;
        self.check_button(now).await?;
        self.check_ir().await
    }

    pub fn show_uptime(&mut self, now: u64) -> Result<(), BoardError> {
        let mut text = String::<20>::new();
        let _ = write!(text, "{}", now / 1000);
        self.parts.display.set_cursor(UPTIME_COLUMN, 1)?;
        self.parts.display.print(&text)?;
        Ok(())
    }

    /// Read the DHT22 once the configured interval has passed.
    ///
    /// A failed read leaves the timestamp alone so the next pass retries.
    pub fn check_dht(&mut self, now: u64) -> Result<(), BoardError> {
        let interval = self.config.read_settings().dht_interval_ms();
        if now <= self.dht_last_read + interval {
            return Ok(());
        }

        let reading = match self.parts.climate.read_climate() {
            Ok(reading) if reading.is_valid() => reading,
            _ => {
                warn!("Failed to read from DHT sensor!");
                return Ok(());
            }
        };

        info!(
            "Humidity: {:.2}%  Temperature: {:.2}°C",
            reading.humidity, reading.temperature
        );
        self.climate = reading;

        let mut text = String::<16>::new();
        let _ = write!(text, "{:.1} {:.1}", reading.temperature, reading.humidity);
        self.parts.display.set_cursor(0, 1)?;
        self.parts.display.print(&text)?;

        self.dht_last_read = now;
        Ok(())
    }

    pub async fn check_button(&mut self, now: u64) -> Result<(), BoardError> {
        let pressed = self.parts.button.is_high().map_err(|_| BoardError::Button)?;
        if !pressed {
            led(self.parts.internal_led.set_low())?;
            return Ok(());
        }

        led(self.parts.internal_led.set_high())?;
        led(self.parts.red_led.set_high())?;
        info!("Button pressed at millis() : {}", now);

        let r = self.random_channel();
        let g = self.random_channel();
        let b = self.random_channel();
        self.set_rgb(r, g, b)?;

        self.check_light()?;
        self.parts.delay.delay_ms(BUTTON_HOLD_MS).await;
        // Same timestamp as the loop pass that saw the press
        self.check_dht(now)?;

        led(self.parts.red_led.set_low())?;
        Ok(())
    }

    pub fn check_light(&mut self) -> Result<(), BoardError> {
        let Some(value) = self.read_light() else {
            return Ok(());
        };
        info!("Light: {}", value);

        let mut text = String::<16>::new();
        let _ = write!(text, "Light {}", value);
        let display = &mut self.parts.display;
        display.clear()?;
        display.set_cursor(0, 1)?;
        display.print(&text)?;
        Ok(())
    }

    /// Cycle through every status page, `status wait` seconds each.
    pub async fn show_status(&mut self) -> Result<(), BoardError> {
        let settings = self.config.read_settings();
        let wait = settings.status_wait_ms();

        info!("Status of Everything: ");
        led(self.parts.red_led.set_high())?;

        for page in StatusPage::ALL {
            let value = self.status_value(page, &settings);
            let display = &mut self.parts.display;
            display.clear()?;
            display.set_cursor(0, 0)?;
            display.print(page.title())?;
            display.set_cursor(0, 1)?;
            display.print(&value)?;
            self.parts.delay.delay_ms(wait).await;
        }

        led(self.parts.red_led.set_low())?;
        Ok(())
    }

    /// Handle a pending remote key, if any.
    pub async fn check_ir(&mut self) -> Result<(), BoardError> {
        let Some(code) = self.parts.remote.try_receive() else {
            return Ok(());
        };

        let result = self.dispatch_remote(code).await;
        self.parts.remote.resume();
        result
    }

    /// Set the LED color from unbounded channel values.
    pub fn set_rgb(&mut self, r: i16, g: i16, b: i16) -> Result<(), BoardError> {
        let color = RgbColor::clamped(r, g, b);
        self.parts.rgb.write_color(color)?;
        self.color = color;
        info!(
            "Set RGB LED : Red {} Green {} Blue {}",
            color.r, color.g, color.b
        );
        Ok(())
    }

    async fn dispatch_remote(&mut self, code: u32) -> Result<(), BoardError> {
        let display = &mut self.parts.display;
        display.clear()?;
        display.set_cursor(0, 0)?;

        let Some(button) = RemoteButton::from_code(code) else {
            display.print("IR Unknown")?;
            info!("IR Unknown: HEX {:X} DEC {}", code, code);
            return Ok(());
        };

        let mut text = String::<16>::new();
        let _ = write!(text, "IR Button {}", button.label());
        info!("{}", text);
        display.print(&text)?;

        match button.action() {
            RemoteAction::None => Ok(()),
            RemoteAction::SetColor(color) => {
                self.set_rgb(color.r.into(), color.g.into(), color.b.into())
            }
            RemoteAction::Adjust { dr, dg, db } => {
                let next = self.color.adjusted(dr, dg, db);
                self.set_rgb(next.r.into(), next.g.into(), next.b.into())
            }
            RemoteAction::ShowStatus => self.show_status().await,
        }
    }

    fn status_value(&mut self, page: StatusPage, settings: &BoardSettings) -> String<64> {
        let mut value = String::new();
        let _ = match page {
            StatusPage::Temperature => write!(value, "{:.2}", self.climate.temperature),
            StatusPage::Humidity => write!(value, "{:.2}", self.climate.humidity),
            StatusPage::Light => {
                let light = self.read_light().unwrap_or(self.light);
                write!(value, "{}", light)
            }
            StatusPage::Rgb => write!(value, "{} {} {}", self.color.r, self.color.g, self.color.b),
            StatusPage::ApSsid => value.push_str(&settings.thing_name).map_err(|()| core::fmt::Error),
            StatusPage::ApPassword => value.push_str(&settings.ap_password).map_err(|()| core::fmt::Error),
            StatusPage::WifiSsid => value.push_str(&settings.wifi_ssid).map_err(|()| core::fmt::Error),
            StatusPage::WifiPassword => value.push_str(&settings.wifi_password).map_err(|()| core::fmt::Error),
            StatusPage::State => write!(value, "{}", self.config.provisioning_state().as_u8()),
            StatusPage::DhtInterval => write!(value, "{}", settings.dht_interval_secs),
            StatusPage::StatusWait => write!(value, "{}", settings.status_wait_secs),
        };
        value
    }

    fn read_light(&mut self) -> Option<u16> {
        match self.parts.light.read_light() {
            Ok(value) => {
                self.light = value;
                Some(value)
            }
            Err(error) => {
                warn!("Failed to read light sensor: {:?}", error);
                None
            }
        }
    }

    fn random_channel(&mut self) -> i16 {
        // 0..=254
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        {
            (self.parts.random.next_u32() % 255) as i16
        }
    }
}

fn led<E>(result: Result<(), E>) -> Result<(), BoardError> {
    result.map_err(|_| BoardError::Led(LedError::Pin))
}
