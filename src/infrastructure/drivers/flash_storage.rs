//! Settings record in a single flash sector.

use boardtest_core::storage::{PersistentStorage, StorageDriver, StorageError};
use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};
use esp_storage::FlashStorage;

use crate::config::{SETTINGS_FLASH_OFFSET, SETTINGS_STORAGE_SIZE};

pub(crate) const BLOCK_SIZE: u32 = 4096;

/// Settings store used at boot and by the persistence task
pub type SettingsStorage = PersistentStorage<EspFlashStorageDriver, SETTINGS_STORAGE_SIZE>;

/// Owns the flash; there is one instance, handed from boot to the
/// persistence task.
pub struct EspFlashStorageDriver {
    flash: FlashStorage<'static>,
    addr: u32,
}

impl EspFlashStorageDriver {
    pub fn new(flash: FlashStorage<'static>) -> Self {
        Self {
            flash,
            addr: SETTINGS_FLASH_OFFSET,
        }
    }
}

impl StorageDriver<SETTINGS_STORAGE_SIZE> for EspFlashStorageDriver {
    async fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.flash.read(self.addr, buffer).map_err(|e| {
            log::warn!("flash: read at {:#x} failed: {:?}", self.addr, e);
            StorageError::DriverError
        })
    }

    async fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError> {
        self.flash
            .erase(self.addr, self.addr + BLOCK_SIZE)
            .map_err(|_| StorageError::DriverError)?;
        self.flash
            .write(self.addr, buffer)
            .map_err(|_| StorageError::DriverError)
    }
}
