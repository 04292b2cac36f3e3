mod portal;

use core::cell::RefCell;

use boardtest_core::app::ConfigurationUsecases;
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

use crate::infrastructure::services::{BoardStateService, SettingsService};

pub use portal::PortalHttpController;

pub(crate) static CONFIGURATION_USECASES: Mutex<
    CriticalSectionRawMutex,
    RefCell<Option<ConfigurationUsecases<SettingsService>>>,
> = Mutex::new(RefCell::new(None));

/// Portal controllers for the access point and station stacks.
pub fn init_controllers(
    configuration: ConfigurationUsecases<SettingsService>,
    board: BoardStateService,
) -> (PortalHttpController, PortalHttpController) {
    CONFIGURATION_USECASES.lock(|cell| {
        cell.borrow_mut().replace(configuration);
    });

    (
        PortalHttpController::access_point(board),
        PortalHttpController::station(board),
    )
}
