//! Tests for the configuration portal form and pages.

mod common;

use boardtest_core::app::{ConfigurationUsecases, SubmitError};
use boardtest_core::domain::settings::BoardSettings;
use boardtest_core::portal::{
    FieldError, FieldId, apply_form, render_config_page, render_not_found, render_root_page,
};
use common::MockConfig;

const VALID: &str = "iwcThingName=lab&iwcApPassword=&iwcWifiSsid=My+Net&iwcWifiPassword=\
                     hunter22&iwcApTimeout=60&intDhtIntervalParam=5&intStatusWaitParam=3&\
                     stringParam=abc%26def&floatParam=23.4";

// ============================================================================
// Form
// ============================================================================

#[test]
fn applies_valid_form() {
    let settings = apply_form(&BoardSettings::default(), VALID).unwrap();

    assert_eq!(settings.thing_name.as_str(), "lab");
    // Empty password keeps the stored one
    assert_eq!(settings.ap_password.as_str(), "password");
    assert_eq!(settings.wifi_ssid.as_str(), "My Net");
    assert_eq!(settings.wifi_password.as_str(), "hunter22");
    assert_eq!(settings.ap_timeout_secs, 60);
    assert_eq!(settings.dht_interval_secs, 5);
    assert_eq!(settings.status_wait_secs, 3);
    assert_eq!(settings.string_param.as_str(), "abc&def");
    assert!((settings.float_param - 23.4).abs() < 1e-6);
}

#[test]
fn string_param_needs_three_characters() {
    let body = VALID.replace("stringParam=abc%26def", "stringParam=ab");
    let rejected = apply_form(&BoardSettings::default(), &body).unwrap_err();

    assert_eq!(
        rejected.errors.get(FieldId::StringParam),
        Some(FieldError::StringParamTooShort)
    );
    assert_eq!(
        FieldError::StringParamTooShort.to_string(),
        "Please provide at least 3 characters."
    );
    // The rest of the submission is kept for the re-rendered form
    assert_eq!(rejected.settings.thing_name.as_str(), "lab");
}

#[test]
fn reports_builtin_validation_errors() {
    let body = "iwcThingName=ab&iwcApPassword=short&iwcWifiPassword=1234567&\
                intDhtIntervalParam=0&intStatusWaitParam=x&stringParam=abc&floatParam=1e";
    let rejected = apply_form(&BoardSettings::default(), body).unwrap_err();
    let errors = &rejected.errors;

    assert_eq!(errors.get(FieldId::ThingName), Some(FieldError::ThingNameTooShort));
    assert_eq!(errors.get(FieldId::ApPassword), Some(FieldError::PasswordTooShort));
    assert_eq!(errors.get(FieldId::WifiPassword), Some(FieldError::PasswordTooShort));
    assert_eq!(
        errors.get(FieldId::DhtInterval),
        Some(FieldError::OutOfRange { min: 1, max: 1000 })
    );
    assert_eq!(errors.get(FieldId::StatusWait), Some(FieldError::NotANumber));
    assert_eq!(errors.get(FieldId::FloatParam), Some(FieldError::NotANumber));
    assert_eq!(errors.get(FieldId::StringParam), None);
    assert_eq!(
        FieldError::OutOfRange { min: 1, max: 1000 }.to_string(),
        "Value must be between 1 and 1000."
    );
}

#[test]
fn empty_float_is_zero() {
    let body = VALID.replace("floatParam=23.4", "floatParam=");
    let settings = apply_form(&BoardSettings::default(), &body).unwrap();
    assert_eq!(settings.float_param, 0.0);
}

#[test]
fn overlong_values_are_rejected() {
    let long_name = "n".repeat(33);
    let body = VALID.replace("iwcThingName=lab", &format!("iwcThingName={long_name}"));
    let rejected = apply_form(&BoardSettings::default(), &body).unwrap_err();
    assert_eq!(rejected.errors.get(FieldId::ThingName), Some(FieldError::TooLong));
}

// ============================================================================
// Configuration use case
// ============================================================================

#[test]
fn submit_stores_valid_settings() {
    let config = MockConfig::default();
    let mut usecases = ConfigurationUsecases::new(config.clone());

    let saved = usecases.submit_form(VALID).unwrap();
    assert_eq!(config.writes.get(), 1);
    assert_eq!(*config.settings.borrow(), saved);
    assert_eq!(usecases.current().dht_interval_secs, 5);
}

#[test]
fn submit_keeps_settings_on_error() {
    let config = MockConfig::default();
    let mut usecases = ConfigurationUsecases::new(config.clone());

    let result = usecases.submit_form("stringParam=");
    assert!(matches!(result, Err(SubmitError::Invalid(_))));
    assert_eq!(config.writes.get(), 0);
    assert_eq!(*config.settings.borrow(), BoardSettings::default());
}

// ============================================================================
// Pages
// ============================================================================

#[test]
fn root_page_lists_parameters() {
    let mut settings = BoardSettings::default();
    settings.string_param.push_str("<b>").unwrap();
    settings.float_param = 1.5;

    let mut page = String::new();
    render_root_page(&mut page, &settings).unwrap();

    assert!(page.contains("<title>IotWebConf 03 Custom Parameters</title>"));
    assert!(page.contains("Hello world!"));
    assert!(page.contains("<li>DHT read interval param value: 10"));
    assert!(page.contains("<li>Status wait param value: 2"));
    assert!(page.contains("<li>String param value: &lt;b&gt;"));
    assert!(page.contains("<li>Float param value: 1.50"));
    assert!(page.contains("<a href='config'>configure page</a>"));
}

#[test]
fn config_page_renders_groups_and_errors() {
    let rejected = apply_form(&BoardSettings::default(), "stringParam=x").unwrap_err();

    let mut page = String::new();
    render_config_page(&mut page, &rejected.settings, Some(&rejected.errors), false).unwrap();

    assert!(page.contains("<legend>Config Options</legend>"));
    assert!(page.contains("<legend>IotWebConf Test</legend>"));
    assert!(page.contains("name='intDhtIntervalParam' min='1' max='1000'"));
    assert!(page.contains("placeholder='e.g. 23.4'"));
    assert!(page.contains("Please provide at least 3 characters."));
    assert!(page.contains("value='x'"));
    // Stored passwords are never sent back
    assert!(!page.contains("value='password'"));
}

#[test]
fn not_found_escapes_path() {
    let mut page = String::new();
    render_not_found(&mut page, "/<x>").unwrap();
    assert!(page.contains("Not found: /&lt;x&gt;"));
}
