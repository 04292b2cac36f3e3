//! Tests for settings persistence.

use boardtest_core::domain::settings::{BoardSettings, SETTINGS_SIZE};
use boardtest_core::storage::{
    Encodable, MAGIC_HEADER_SIZE, PersistentStorage, StorageDriver, StorageError,
};
use embassy_futures::block_on;

const STORAGE_SIZE: usize = 304;

/// Flash stand-in, erased to 0xFF.
struct MemoryDriver {
    data: [u8; STORAGE_SIZE],
    fail: bool,
}

impl MemoryDriver {
    fn erased() -> Self {
        Self {
            data: [0xFF; STORAGE_SIZE],
            fail: false,
        }
    }
}

impl StorageDriver<STORAGE_SIZE> for MemoryDriver {
    async fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::DriverError);
        }
        buffer.copy_from_slice(&self.data[..buffer.len()]);
        Ok(())
    }

    async fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::DriverError);
        }
        self.data[..buffer.len()].copy_from_slice(buffer);
        Ok(())
    }
}

fn custom_settings() -> BoardSettings {
    let mut settings = BoardSettings::default();
    settings.thing_name.clear();
    settings.thing_name.push_str("lab-board").unwrap();
    settings.wifi_ssid.push_str("Workshop").unwrap();
    settings.wifi_password.push_str("päss wörd").unwrap();
    settings.string_param.push_str("hello").unwrap();
    settings.ap_timeout_secs = 0;
    settings.dht_interval_secs = 999;
    settings.status_wait_secs = 7;
    settings.float_param = 23.4;
    settings
}

#[test]
fn settings_fit_the_storage_area() {
    assert!(MAGIC_HEADER_SIZE + SETTINGS_SIZE <= STORAGE_SIZE);
    assert_eq!(STORAGE_SIZE % 4, 0);
}

#[test]
fn erased_flash_has_no_settings() {
    let mut storage = PersistentStorage::<_, STORAGE_SIZE>::new(MemoryDriver::erased());
    let result = block_on(storage.load::<SETTINGS_SIZE, BoardSettings>());
    assert_eq!(result, Err(StorageError::InvalidMagicHeader));
}

#[test]
fn saved_settings_load_back() {
    let mut storage = PersistentStorage::<_, STORAGE_SIZE>::new(MemoryDriver::erased());
    let settings = custom_settings();

    block_on(storage.save::<SETTINGS_SIZE, _>(&settings)).unwrap();
    let loaded = block_on(storage.load::<SETTINGS_SIZE, BoardSettings>()).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn unknown_version_is_invalid() {
    let mut storage = PersistentStorage::<_, STORAGE_SIZE>::new(MemoryDriver::erased());
    block_on(storage.save::<SETTINGS_SIZE, _>(&BoardSettings::default())).unwrap();

    let mut driver = storage.into_inner();
    driver.data[MAGIC_HEADER_SIZE] = 0x7F;
    let mut storage = PersistentStorage::<_, STORAGE_SIZE>::new(driver);
    let result = block_on(storage.load::<SETTINGS_SIZE, BoardSettings>());
    assert_eq!(result, Err(StorageError::InvalidData));
}

#[test]
fn driver_errors_propagate() {
    let mut driver = MemoryDriver::erased();
    driver.fail = true;
    let mut storage = PersistentStorage::<_, STORAGE_SIZE>::new(driver);
    let result = block_on(storage.load::<SETTINGS_SIZE, BoardSettings>());
    assert_eq!(result, Err(StorageError::DriverError));
}

#[test]
fn decode_rejects_short_and_invalid_utf8_records() {
    let encoded = custom_settings().encode();
    assert_eq!(BoardSettings::decode(&encoded[..SETTINGS_SIZE - 1]), None);

    let mut broken = encoded;
    // First byte of the thing name
    broken[12] = 0xFF;
    assert_eq!(BoardSettings::decode(&broken), None);
}
