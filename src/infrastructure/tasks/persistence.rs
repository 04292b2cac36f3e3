use boardtest_core::domain::settings::{BoardSettings, SETTINGS_SIZE};
use embassy_futures::select::{Either, select};
use embassy_time::Timer;

use crate::{
    config::SETTINGS_WRITE_DEBOUNCE,
    infrastructure::{drivers::SettingsStorage, services::SettingsReceiver},
};

/// Write saved settings to flash, merging saves that arrive in a burst.
#[embassy_executor::task]
pub async fn persistence_task(mut storage: SettingsStorage, receiver: SettingsReceiver) {
    log::info!("persistence: starting persistence task");
    let mut pending: Option<BoardSettings> = None;

    loop {
        let Some(settings) = pending.take() else {
            pending = Some(receiver.receive().await);
            continue;
        };

        match select(receiver.receive(), Timer::after(SETTINGS_WRITE_DEBOUNCE)).await {
            Either::First(newer) => pending = Some(newer),
            Either::Second(()) => {
                match storage.save::<SETTINGS_SIZE, _>(&settings).await {
                    Ok(()) => log::info!("persistence: settings written"),
                    Err(e) => log::error!("persistence: failed to write settings: {:?}", e),
                }
            }
        }
    }
}
