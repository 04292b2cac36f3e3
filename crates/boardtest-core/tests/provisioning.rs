//! Tests for the Wi-Fi provisioning state machine.

use boardtest_core::domain::provisioning::{
    CONNECT_TIMEOUT_MS, Provisioning, ProvisioningEvent, ProvisioningState, RadioMode,
};

fn saved(has_ssid: bool, credentials_changed: bool) -> ProvisioningEvent {
    ProvisioningEvent::ConfigSaved {
        has_ssid,
        credentials_changed,
        ap_timeout_secs: 30,
    }
}

#[test]
fn state_numbers_are_stable() {
    let states = [
        ProvisioningState::Boot,
        ProvisioningState::NotConfigured,
        ProvisioningState::ApMode,
        ProvisioningState::Connecting,
        ProvisioningState::OnLine,
    ];
    for (n, state) in states.into_iter().enumerate() {
        assert_eq!(usize::from(state.as_u8()), n);
        assert_eq!(ProvisioningState::from_u8(state.as_u8()), Some(state));
    }
    assert_eq!(ProvisioningState::from_u8(5), None);
}

#[test]
fn boot_without_ssid_waits_for_configuration() {
    let mut p = Provisioning::new();
    assert_eq!(p.boot(false, 30, 0), RadioMode::AccessPoint);
    assert_eq!(p.state(), ProvisioningState::NotConfigured);

    // Never times out on its own
    assert_eq!(p.handle(ProvisioningEvent::Tick, 3_600_000), None);
    assert_eq!(p.state(), ProvisioningState::NotConfigured);
}

#[test]
fn boot_with_zero_timeout_connects_immediately() {
    let mut p = Provisioning::new();
    assert_eq!(p.boot(true, 0, 0), RadioMode::Station);
    assert_eq!(p.state(), ProvisioningState::Connecting);
}

#[test]
fn portal_times_out_into_connecting() {
    let mut p = Provisioning::new();
    assert_eq!(p.boot(true, 30, 1_000), RadioMode::AccessPoint);
    assert_eq!(p.state(), ProvisioningState::ApMode);

    assert_eq!(p.handle(ProvisioningEvent::Tick, 30_999), None);
    assert_eq!(
        p.handle(ProvisioningEvent::Tick, 31_000),
        Some(RadioMode::Station)
    );
    assert_eq!(p.state(), ProvisioningState::Connecting);
}

#[test]
fn active_client_keeps_portal_up() {
    let mut p = Provisioning::new();
    p.boot(true, 30, 0);
    assert_eq!(p.handle(ProvisioningEvent::ClientActivity, 25_000), None);

    assert_eq!(p.handle(ProvisioningEvent::Tick, 40_000), None);
    assert_eq!(p.state(), ProvisioningState::ApMode);
    assert_eq!(
        p.handle(ProvisioningEvent::Tick, 55_000),
        Some(RadioMode::Station)
    );
}

#[test]
fn connection_and_fallback() {
    let mut p = Provisioning::new();
    p.boot(true, 0, 0);

    assert_eq!(p.handle(ProvisioningEvent::StationConnected, 5_000), None);
    assert_eq!(p.state(), ProvisioningState::OnLine);

    assert_eq!(
        p.handle(ProvisioningEvent::StationDisconnected, 60_000),
        Some(RadioMode::Station)
    );
    assert_eq!(p.state(), ProvisioningState::Connecting);

    assert_eq!(
        p.handle(ProvisioningEvent::Tick, 60_000 + CONNECT_TIMEOUT_MS),
        Some(RadioMode::AccessPoint)
    );
    assert_eq!(p.state(), ProvisioningState::ApMode);
}

#[test]
fn connect_window_closes_at_timeout() {
    let mut p = Provisioning::new();
    p.boot(true, 0, 1_000);

    assert_eq!(p.connect_window_left(1_000), Some(CONNECT_TIMEOUT_MS));
    assert_eq!(p.connect_window_left(1_000 + CONNECT_TIMEOUT_MS - 1), Some(1));
    assert_eq!(p.connect_window_left(1_000 + CONNECT_TIMEOUT_MS), None);

    assert_eq!(p.handle(ProvisioningEvent::Tick, CONNECT_TIMEOUT_MS), None);
    assert_eq!(
        p.handle(ProvisioningEvent::Tick, 1_000 + CONNECT_TIMEOUT_MS),
        Some(RadioMode::AccessPoint)
    );
    assert_eq!(p.connect_window_left(1_000 + CONNECT_TIMEOUT_MS), None);
}

#[test]
fn late_attempt_is_bounded_by_the_window() {
    // Up to 10 s per association attempt
    const ATTEMPT_MS: u64 = 10_000;

    let mut p = Provisioning::new();
    p.boot(true, 0, 0);

    // An attempt started 29 s in only gets the last second
    let started = CONNECT_TIMEOUT_MS - 1_000;
    let budget = p.connect_window_left(started).unwrap().min(ATTEMPT_MS);
    assert_eq!(budget, 1_000);

    // The tick right after the attempt falls back on time
    assert_eq!(
        p.handle(ProvisioningEvent::Tick, started + budget),
        Some(RadioMode::AccessPoint)
    );
    assert_eq!(p.state(), ProvisioningState::ApMode);
}

#[test]
fn no_connect_window_outside_connecting() {
    let mut p = Provisioning::new();
    p.boot(false, 30, 0);
    assert_eq!(p.connect_window_left(0), None);

    let mut p = Provisioning::new();
    p.boot(true, 0, 0);
    p.handle(ProvisioningEvent::StationConnected, 100);
    assert_eq!(p.connect_window_left(200), None);
}

#[test]
fn saving_configuration_drives_transitions() {
    let mut p = Provisioning::new();
    p.boot(false, 30, 0);

    // First SSID: portal stays up until the client goes idle
    assert_eq!(p.handle(saved(true, true), 10_000), None);
    assert_eq!(p.state(), ProvisioningState::ApMode);
    assert_eq!(p.handle(ProvisioningEvent::Tick, 39_000), None);
    assert_eq!(
        p.handle(ProvisioningEvent::Tick, 40_000),
        Some(RadioMode::Station)
    );

    p.handle(ProvisioningEvent::StationConnected, 41_000);
    assert_eq!(p.handle(saved(true, false), 50_000), None);
    assert_eq!(p.state(), ProvisioningState::OnLine);

    assert_eq!(p.handle(saved(true, true), 60_000), Some(RadioMode::Station));
    assert_eq!(p.state(), ProvisioningState::Connecting);

    assert_eq!(
        p.handle(saved(false, true), 70_000),
        Some(RadioMode::AccessPoint)
    );
    assert_eq!(p.state(), ProvisioningState::NotConfigured);
}
