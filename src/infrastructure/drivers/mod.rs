mod board;
mod dht22;
mod flash_storage;
mod ir_receiver;
mod lcd;
mod light_sensor;
mod random;
mod rgb_led;
pub mod wifi;

pub use board::EspBoard;
pub use dht22::EspDht22;
pub use flash_storage::{EspFlashStorageDriver, SettingsStorage};
pub use ir_receiver::{IrReceiver, init_ir_input, ir_capture_task};
pub use lcd::{EspLcd, init_lcd};
pub use light_sensor::EspLightSensor;
pub use random::EspRandom;
pub use rgb_led::EspRgbLed;
pub use wifi::{WifiStacks, init_wifi, wait_for_link};
