use core::fmt;

use boardtest_netutils::form::{FormError, decode_component, find_field};
use heapless::String;
use log::info;

use super::fields::{FieldId, FieldKind};
use crate::domain::settings::{AP_PASSWORD_LEN, BoardSettings, WIFI_PASSWORD_LEN};

const MIN_THING_NAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 8;
const MIN_STRING_PARAM_CHARS: usize = 3;

/// Why a submitted value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    ThingNameTooShort,
    PasswordTooShort,
    StringParamTooShort,
    TooLong,
    InvalidEncoding,
    NotANumber,
    OutOfRange { min: i32, max: i32 },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThingNameTooShort => f.write_str("Give a name with at least 3 characters."),
            Self::PasswordTooShort => {
                f.write_str("Password length must be at least 8 characters.")
            }
            Self::StringParamTooShort => f.write_str("Please provide at least 3 characters."),
            Self::TooLong => f.write_str("Value is too long."),
            Self::InvalidEncoding => f.write_str("Value could not be decoded."),
            Self::NotANumber => f.write_str("Not a number."),
            Self::OutOfRange { min, max } => write!(f, "Value must be between {min} and {max}."),
        }
    }
}

impl From<FormError> for FieldError {
    fn from(error: FormError) -> Self {
        match error {
            FormError::TooLong => FieldError::TooLong,
            FormError::InvalidEscape | FormError::InvalidUtf8 => FieldError::InvalidEncoding,
        }
    }
}

/// Per-field errors of a rejected submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    errors: [Option<FieldError>; FieldId::COUNT],
}

impl FormErrors {
    pub fn get(&self, field: FieldId) -> Option<FieldError> {
        self.errors[field.index()]
    }

    pub fn set(&mut self, field: FieldId, error: FieldError) {
        self.errors[field.index()] = Some(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.iter().all(Option::is_none)
    }
}

/// A submission that failed validation, kept to render the form again.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedForm {
    /// Current settings with every acceptable submitted value applied
    pub settings: BoardSettings,
    pub errors: FormErrors,
}

/// Validate a submitted configuration form against the current settings.
///
/// Fields missing from the body keep their current value, as do password
/// fields submitted empty.
pub fn apply_form(current: &BoardSettings, body: &str) -> Result<BoardSettings, RejectedForm> {
    info!("Validating form.");

    let mut next = current.clone();
    let mut errors = FormErrors::default();

    for field in FieldId::ALL {
        let Some(raw) = find_field(body, field.id()) else {
            continue;
        };
        if let Err(error) = apply_field(&mut next, field, raw) {
            errors.set(field, error);
        }
    }

    validate(&next, &mut errors);

    if errors.is_empty() {
        Ok(next)
    } else {
        Err(RejectedForm {
            settings: next,
            errors,
        })
    }
}

fn apply_field(settings: &mut BoardSettings, field: FieldId, raw: &str) -> Result<(), FieldError> {
    match field {
        FieldId::ThingName => settings.thing_name = decode_component(raw)?,
        FieldId::WifiSsid => settings.wifi_ssid = decode_component(raw)?,
        FieldId::StringParam => settings.string_param = decode_component(raw)?,
        FieldId::ApPassword => {
            let value: String<AP_PASSWORD_LEN> = decode_component(raw)?;
            if !value.is_empty() {
                settings.ap_password = value;
            }
        }
        FieldId::WifiPassword => {
            let value: String<WIFI_PASSWORD_LEN> = decode_component(raw)?;
            if !value.is_empty() {
                settings.wifi_password = value;
            }
        }
        FieldId::ApTimeout => settings.ap_timeout_secs = parse_integer(field, raw)?,
        FieldId::DhtInterval => settings.dht_interval_secs = parse_integer(field, raw)?,
        FieldId::StatusWait => settings.status_wait_secs = parse_integer(field, raw)?,
        FieldId::FloatParam => {
            let value: String<32> = decode_component(raw)?;
            let value = value.trim();
            settings.float_param = if value.is_empty() {
                0.0
            } else {
                value.parse().map_err(|_| FieldError::NotANumber)?
            };
        }
    }
    Ok(())
}

fn parse_integer<T: TryFrom<i32>>(field: FieldId, raw: &str) -> Result<T, FieldError> {
    let FieldKind::Integer { min, max } = field.kind() else {
        return Err(FieldError::NotANumber);
    };
    let value: String<32> = decode_component(raw)?;
    let value: i32 = value.trim().parse().map_err(|_| FieldError::NotANumber)?;
    if !(min..=max).contains(&value) {
        return Err(FieldError::OutOfRange { min, max });
    }
    T::try_from(value).map_err(|_| FieldError::OutOfRange { min, max })
}

fn validate(settings: &BoardSettings, errors: &mut FormErrors) {
    let chars = |s: &str| s.chars().count();

    if errors.get(FieldId::ThingName).is_none() && chars(&settings.thing_name) < MIN_THING_NAME_CHARS {
        errors.set(FieldId::ThingName, FieldError::ThingNameTooShort);
    }
    if errors.get(FieldId::ApPassword).is_none() && chars(&settings.ap_password) < MIN_PASSWORD_CHARS {
        errors.set(FieldId::ApPassword, FieldError::PasswordTooShort);
    }
    let wifi_password = chars(&settings.wifi_password);
    if errors.get(FieldId::WifiPassword).is_none()
        && wifi_password > 0
        && wifi_password < MIN_PASSWORD_CHARS
    {
        errors.set(FieldId::WifiPassword, FieldError::PasswordTooShort);
    }
    if errors.get(FieldId::StringParam).is_none()
        && chars(&settings.string_param) < MIN_STRING_PARAM_CHARS
    {
        errors.set(FieldId::StringParam, FieldError::StringParamTooShort);
    }
}
