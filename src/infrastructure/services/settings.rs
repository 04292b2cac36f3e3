use core::cell::RefCell;

use boardtest_core::domain::{
    ports::{SettingsError, SettingsReader, SettingsWriter},
    provisioning::ProvisioningEvent,
    settings::BoardSettings,
};
use embassy_sync::{
    blocking_mutex::{Mutex, raw::CriticalSectionRawMutex},
    channel::{Channel, Receiver},
};

use super::provisioning::notify_provisioning;

const SETTINGS_CHANNEL_SIZE: usize = 2;

type SettingsChannel = Channel<CriticalSectionRawMutex, BoardSettings, SETTINGS_CHANNEL_SIZE>;

/// Receiver side of the persistence queue
pub type SettingsReceiver = Receiver<'static, CriticalSectionRawMutex, BoardSettings, SETTINGS_CHANNEL_SIZE>;

/// Settings in effect, shared by the loop and the portal
static SETTINGS: Mutex<CriticalSectionRawMutex, RefCell<Option<BoardSettings>>> =
    Mutex::new(RefCell::new(None));

/// Settings waiting to be written to flash
static SETTINGS_CHANNEL: SettingsChannel = Channel::new();

/// Install the settings loaded at boot.
pub fn init_settings(settings: BoardSettings) -> SettingsService {
    SETTINGS.lock(|cell| {
        cell.borrow_mut().replace(settings);
    });
    SettingsService
}

pub fn get_settings_receiver() -> SettingsReceiver {
    SETTINGS_CHANNEL.receiver()
}

/// Shared settings with write-behind persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsService;

impl SettingsReader for SettingsService {
    fn read_settings(&self) -> BoardSettings {
        SETTINGS.lock(|cell| cell.borrow().clone().unwrap_or_default())
    }
}

impl SettingsWriter for SettingsService {
    fn write_settings(&mut self, settings: &BoardSettings) -> Result<(), SettingsError> {
        SETTINGS_CHANNEL
            .try_send(settings.clone())
            .map_err(|_| SettingsError::QueueFull)?;

        let previous = SETTINGS.lock(|cell| cell.borrow_mut().replace(settings.clone()));
        let credentials_changed = previous.is_none_or(|previous| previous.wifi_changed(settings));

        notify_provisioning(ProvisioningEvent::ConfigSaved {
            has_ssid: settings.has_wifi_credentials(),
            credentials_changed,
            ap_timeout_secs: settings.ap_timeout_secs,
        });
        Ok(())
    }
}
