use crate::domain::settings::{
    AP_PASSWORD_LEN,
    STRING_PARAM_LEN,
    THING_NAME_LEN,
    WIFI_PASSWORD_LEN,
    WIFI_SSID_LEN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { max_len: usize },
    /// Never rendered back; left empty to keep the stored value
    Password { max_len: usize },
    Integer { min: i32, max: i32 },
    Float { step: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    ThingName,
    ApPassword,
    WifiSsid,
    WifiPassword,
    ApTimeout,
    DhtInterval,
    StatusWait,
    StringParam,
    FloatParam,
}

impl FieldId {
    pub const COUNT: usize = 9;

    pub const ALL: [FieldId; Self::COUNT] = [
        Self::ThingName,
        Self::ApPassword,
        Self::WifiSsid,
        Self::WifiPassword,
        Self::ApTimeout,
        Self::DhtInterval,
        Self::StatusWait,
        Self::StringParam,
        Self::FloatParam,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Form field name
    pub fn id(self) -> &'static str {
        match self {
            Self::ThingName => "iwcThingName",
            Self::ApPassword => "iwcApPassword",
            Self::WifiSsid => "iwcWifiSsid",
            Self::WifiPassword => "iwcWifiPassword",
            Self::ApTimeout => "iwcApTimeout",
            Self::DhtInterval => "intDhtIntervalParam",
            Self::StatusWait => "intStatusWaitParam",
            Self::StringParam => "stringParam",
            Self::FloatParam => "floatParam",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ThingName => "Thing name",
            Self::ApPassword => "AP password",
            Self::WifiSsid => "WiFi SSID",
            Self::WifiPassword => "WiFi password",
            Self::ApTimeout => "Startup delay (seconds)",
            Self::DhtInterval => "DHT read interval",
            Self::StatusWait => "Status wait time",
            Self::StringParam => "String param",
            Self::FloatParam => "Float param",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::ThingName => FieldKind::Text {
                max_len: THING_NAME_LEN,
            },
            Self::ApPassword => FieldKind::Password {
                max_len: AP_PASSWORD_LEN,
            },
            Self::WifiSsid => FieldKind::Text {
                max_len: WIFI_SSID_LEN,
            },
            Self::WifiPassword => FieldKind::Password {
                max_len: WIFI_PASSWORD_LEN,
            },
            Self::ApTimeout => FieldKind::Integer { min: 0, max: 600 },
            Self::DhtInterval => FieldKind::Integer { min: 1, max: 1000 },
            Self::StatusWait => FieldKind::Integer { min: 1, max: 100 },
            Self::StringParam => FieldKind::Text {
                max_len: STRING_PARAM_LEN,
            },
            Self::FloatParam => FieldKind::Float { step: "0.1" },
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::DhtInterval => Some("1..1000s"),
            Self::StatusWait => Some("1..100s"),
            Self::FloatParam => Some("e.g. 23.4"),
            _ => None,
        }
    }
}

/// A `<fieldset>` of the configuration form.
#[derive(Debug)]
pub struct FieldGroup {
    pub legend: &'static str,
    pub fields: &'static [FieldId],
}

pub const FIELD_GROUPS: [FieldGroup; 3] = [
    FieldGroup {
        legend: "System configuration",
        fields: &[
            FieldId::ThingName,
            FieldId::ApPassword,
            FieldId::WifiSsid,
            FieldId::WifiPassword,
            FieldId::ApTimeout,
        ],
    },
    FieldGroup {
        legend: "Config Options",
        fields: &[FieldId::DhtInterval, FieldId::StatusWait],
    },
    FieldGroup {
        legend: "IotWebConf Test",
        fields: &[FieldId::StringParam, FieldId::FloatParam],
    },
];
