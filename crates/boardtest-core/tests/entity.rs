//! Tests for domain values.

use boardtest_core::domain::charset::rom_code;
use boardtest_core::domain::dto::StatusSnapshot;
use boardtest_core::domain::entity::{ClimateReading, RgbColor};
use boardtest_core::domain::status::StatusPage;

#[test]
fn rgb_clamps_both_ends() {
    assert_eq!(RgbColor::clamped(-5, 128, 300), RgbColor::new(0, 128, 255));
    assert_eq!(RgbColor::new(250, 5, 0).adjusted(10, -10, 0), RgbColor::new(255, 0, 0));
}

#[test]
fn nan_reading_is_invalid() {
    let reading = ClimateReading {
        temperature: f32::NAN,
        humidity: 40.0,
    };
    assert!(!reading.is_valid());
    assert!(ClimateReading::default().is_valid());
}

#[test]
fn status_pages_start_with_climate() {
    assert_eq!(StatusPage::ALL.len(), 11);
    assert_eq!(StatusPage::ALL[0].title(), "Temperature C");
    assert_eq!(StatusPage::ALL[10].title(), "IoT intStatusWaitParamValue");
}

#[test]
fn status_snapshot_serializes() {
    let snapshot = StatusSnapshot {
        temperature: 21.5,
        humidity: 40.0,
        light: 812,
        rgb: [255, 0, 10],
        state: 4,
        uptime_ms: 90_000,
        build_version: "2026.10.16",
    };
    let json: heapless::String<256> = serde_json_core::to_string(&snapshot).unwrap();
    assert!(json.starts_with("{\"temperature\":21.5,\"humidity\":40"));
    assert!(json.contains("\"light\":812,\"rgb\":[255,0,10],\"state\":4,\"uptime_ms\":90000"));
    assert!(json.ends_with("\"build_version\":\"2026.10.16\"}"));
}

#[test]
fn maps_characters_to_display_rom() {
    assert_eq!(rom_code('z'), b'z');
    assert_eq!(rom_code(' '), b' ');
    assert_eq!(rom_code('°'), 0xDF);
    assert_eq!(rom_code('é'), b'?');
    assert_eq!(rom_code('~'), b'?');
}
