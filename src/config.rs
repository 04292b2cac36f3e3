//! Board wiring and compile-time constants.

use core::net::Ipv4Addr;

use embassy_time::Duration;

pub const BUILD_VERSION: &str = env!("BUILD_VERSION");
pub const FIRMWARE_NAME: &str = env!("CARGO_PKG_NAME");

/// Period of the main polling loop
pub const LOOP_PERIOD: Duration = Duration::from_millis(150);

/// RGB LED PWM: 5 kHz, 8-bit duty (channels 0/1/2)
pub const RGB_PWM_FREQUENCY_KHZ: u32 = 5;

/// Portal access point addressing
pub const AP_ADDRESS: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 1);
pub const AP_PREFIX_LEN: u8 = 24;
pub const HTTP_PORT: u16 = 80;

/// How often the provisioning task checks its timeouts
pub const PROVISIONING_TICK: Duration = Duration::from_secs(1);

/// Settings record in the `nvs` partition of the default partition table
pub const SETTINGS_FLASH_OFFSET: u32 = 0x9000;
/// Multiple of the flash word size, large enough for the header and record
pub const SETTINGS_STORAGE_SIZE: usize = 304;
/// Saves arriving closer together than this are merged into one flash write
pub const SETTINGS_WRITE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Wiring of the test board.
///
/// Each macro moves the pins out of `esp_hal::peripherals::Peripherals`.
#[macro_export]
macro_rules! rgb_gpio {
    ($p:expr) => {
        ($p.GPIO15, $p.GPIO2, $p.GPIO0)
    };
}

/// RS, EN, D4, D5, D6, D7
#[macro_export]
macro_rules! lcd_gpio {
    ($p:expr) => {
        ($p.GPIO22, $p.GPIO23, $p.GPIO5, $p.GPIO18, $p.GPIO19, $p.GPIO21)
    };
}

#[macro_export]
macro_rules! button_gpio {
    ($p:expr) => {
        $p.GPIO34
    };
}

#[macro_export]
macro_rules! ir_gpio {
    ($p:expr) => {
        $p.GPIO35
    };
}

#[macro_export]
macro_rules! dht_gpio {
    ($p:expr) => {
        $p.GPIO32
    };
}

#[macro_export]
macro_rules! red_led_gpio {
    ($p:expr) => {
        $p.GPIO4
    };
}

#[macro_export]
macro_rules! light_sensor_gpio {
    ($p:expr) => {
        $p.GPIO33
    };
}

/// Shares the UART0 TX line, only wired with the `internal-led` feature
#[macro_export]
macro_rules! internal_led_gpio {
    ($p:expr) => {
        $p.GPIO1
    };
}
