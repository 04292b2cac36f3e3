//! Wi-Fi provisioning: drives the radio from the provisioning state machine.

use boardtest_core::domain::{
    ports::SettingsReader,
    provisioning::{Provisioning, ProvisioningEvent, RadioMode},
    settings::BoardSettings,
};
use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_time::{Duration, Instant, Timer, with_timeout};
use esp_radio::wifi::{
    AccessPointConfig,
    AuthMethod,
    ClientConfig,
    ModeConfig,
    WifiController,
    WifiStaState,
};

use crate::{
    config::PROVISIONING_TICK,
    infrastructure::services::{
        ProvisioningEventReceiver,
        SettingsService,
        publish_provisioning_state,
    },
};

/// Bound on a single association attempt
const CONNECT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

#[embassy_executor::task]
pub async fn provisioning_task(
    mut controller: WifiController<'static>,
    sta_stack: Stack<'static>,
    settings: SettingsService,
    events: ProvisioningEventReceiver,
) {
    let mut machine = Provisioning::new();
    let current = settings.read_settings();
    let mode = machine.boot(
        current.has_wifi_credentials(),
        current.ap_timeout_secs,
        now_ms(),
    );
    publish_provisioning_state(machine.state());
    apply_mode(&mut controller, mode, &current).await;

    let mut station_up = false;
    loop {
        let event = match select(events.receive(), Timer::after(PROVISIONING_TICK)).await {
            Either::First(event) => event,
            Either::Second(()) => {
                let connected = esp_radio::wifi::sta_state() == WifiStaState::Connected
                    && sta_stack.config_v4().is_some();
                if connected == station_up {
                    ProvisioningEvent::Tick
                } else {
                    station_up = connected;
                    if connected {
                        log::info!("provisioning: station online");
                        ProvisioningEvent::StationConnected
                    } else {
                        ProvisioningEvent::StationDisconnected
                    }
                }
            }
        };

        let mut switch_to = machine.handle(event, now_ms());
        // Retry while the connect window is open
        if switch_to.is_none()
            && event == ProvisioningEvent::Tick
            && esp_radio::wifi::sta_state() != WifiStaState::Connected
        {
            if let Some(left_ms) = machine.connect_window_left(now_ms()) {
                let budget = Duration::from_millis(left_ms).min(CONNECT_ATTEMPT_TIMEOUT);
                connect_station(&mut controller, budget).await;
                // The attempt may have run into the end of the window
                if esp_radio::wifi::sta_state() != WifiStaState::Connected {
                    switch_to = machine.handle(ProvisioningEvent::Tick, now_ms());
                }
            }
        }

        if let Some(mode) = switch_to {
            station_up = false;
            apply_mode(&mut controller, mode, &settings.read_settings()).await;
        }
        publish_provisioning_state(machine.state());
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Restart the radio in `mode` with the current settings.
async fn apply_mode(
    controller: &mut WifiController<'static>,
    mode: RadioMode,
    settings: &BoardSettings,
) {
    if matches!(controller.is_started(), Ok(true)) {
        if let Err(e) = controller.stop_async().await {
            log::warn!("provisioning: failed to stop radio: {:?}", e);
        }
    }

    let mode_config = match mode {
        RadioMode::AccessPoint => ModeConfig::AccessPoint(access_point_config(settings)),
        RadioMode::Station => ModeConfig::Client(client_config(settings)),
    };
    if let Err(e) = controller.set_config(&mode_config) {
        log::error!("provisioning: rejected radio config: {:?}", e);
        return;
    }
    if let Err(e) = controller.start_async().await {
        log::error!("provisioning: failed to start radio: {:?}", e);
        return;
    }

    match mode {
        RadioMode::AccessPoint => {
            log::info!("provisioning: access point '{}' started", settings.thing_name);
        }
        RadioMode::Station => {
            log::info!("provisioning: connecting to '{}'", settings.wifi_ssid);
            connect_station(controller, CONNECT_ATTEMPT_TIMEOUT).await;
        }
    }
}

async fn connect_station(controller: &mut WifiController<'static>, timeout: Duration) {
    match with_timeout(timeout, controller.connect_async()).await {
        Ok(Ok(())) => log::info!("provisioning: associated"),
        Ok(Err(e)) => log::warn!("provisioning: error connecting: {:?}", e),
        Err(_) => log::warn!("provisioning: connect attempt timed out"),
    }
}

/// WPA2 with the portal password, open when it is too short for WPA2.
fn access_point_config(settings: &BoardSettings) -> AccessPointConfig {
    let config = AccessPointConfig::default().with_ssid(settings.thing_name.as_str().into());
    if settings.ap_password.len() >= 8 {
        config
            .with_auth_method(AuthMethod::Wpa2Personal)
            .with_password(settings.ap_password.as_str().into())
    } else {
        config.with_auth_method(AuthMethod::None)
    }
}

fn client_config(settings: &BoardSettings) -> ClientConfig {
    let config = ClientConfig::default().with_ssid(settings.wifi_ssid.as_str().into());
    if settings.wifi_password.is_empty() {
        config.with_auth_method(AuthMethod::None)
    } else {
        config.with_password(settings.wifi_password.as_str().into())
    }
}
