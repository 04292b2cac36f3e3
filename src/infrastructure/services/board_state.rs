use core::cell::Cell;

use boardtest_core::domain::{
    entity::{ClimateReading, RgbColor},
    ports::{ProvisioningStateReader, SettingsReader},
    provisioning::ProvisioningState,
    settings::BoardSettings,
};
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

use super::{ProvisioningService, SettingsService};

/// Last values measured by the polling loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoardSnapshot {
    pub climate: ClimateReading,
    pub light: u16,
    pub color: RgbColor,
}

static BOARD_SNAPSHOT: Mutex<CriticalSectionRawMutex, Cell<BoardSnapshot>> =
    Mutex::new(Cell::new(BoardSnapshot {
        climate: ClimateReading {
            temperature: f32::NAN,
            humidity: f32::NAN,
        },
        light: 0,
        color: RgbColor::BLACK,
    }));

/// Everything the polling loop reads about the device configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoardStateService {
    settings: SettingsService,
    provisioning: ProvisioningService,
}

impl BoardStateService {
    pub fn new(settings: SettingsService, provisioning: ProvisioningService) -> Self {
        Self {
            settings,
            provisioning,
        }
    }

    pub fn publish(&self, snapshot: BoardSnapshot) {
        BOARD_SNAPSHOT.lock(|cell| cell.set(snapshot));
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BOARD_SNAPSHOT.lock(Cell::get)
    }
}

impl SettingsReader for BoardStateService {
    fn read_settings(&self) -> BoardSettings {
        self.settings.read_settings()
    }
}

impl ProvisioningStateReader for BoardStateService {
    fn provisioning_state(&self) -> ProvisioningState {
        self.provisioning.provisioning_state()
    }
}
