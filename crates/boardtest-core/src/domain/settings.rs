//! Settings edited through the configuration portal.

use bytemuck::{Pod, Zeroable};
use heapless::String;

use crate::storage::Encodable;

pub const THING_NAME_LEN: usize = 32;
pub const AP_PASSWORD_LEN: usize = 32;
pub const WIFI_SSID_LEN: usize = 32;
pub const WIFI_PASSWORD_LEN: usize = 64;
pub const STRING_PARAM_LEN: usize = 128;

pub const DEFAULT_THING_NAME: &str = "testThing";
pub const DEFAULT_AP_PASSWORD: &str = "password";
pub const DEFAULT_AP_TIMEOUT_SECS: u16 = 30;
pub const DEFAULT_DHT_INTERVAL_SECS: u16 = 10;
pub const DEFAULT_STATUS_WAIT_SECS: u8 = 2;

/// Runtime configuration of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSettings {
    /// Access point SSID and device host name
    pub thing_name: String<THING_NAME_LEN>,
    pub ap_password: String<AP_PASSWORD_LEN>,
    pub wifi_ssid: String<WIFI_SSID_LEN>,
    pub wifi_password: String<WIFI_PASSWORD_LEN>,
    /// How long the portal stays up after boot before joining Wi-Fi
    pub ap_timeout_secs: u16,
    pub dht_interval_secs: u16,
    pub status_wait_secs: u8,
    pub string_param: String<STRING_PARAM_LEN>,
    pub float_param: f32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        let mut thing_name = String::new();
        let _ = thing_name.push_str(DEFAULT_THING_NAME);
        let mut ap_password = String::new();
        let _ = ap_password.push_str(DEFAULT_AP_PASSWORD);

        Self {
            thing_name,
            ap_password,
            wifi_ssid: String::new(),
            wifi_password: String::new(),
            ap_timeout_secs: DEFAULT_AP_TIMEOUT_SECS,
            dht_interval_secs: DEFAULT_DHT_INTERVAL_SECS,
            status_wait_secs: DEFAULT_STATUS_WAIT_SECS,
            string_param: String::new(),
            float_param: 0.0,
        }
    }
}

impl BoardSettings {
    pub fn has_wifi_credentials(&self) -> bool {
        !self.wifi_ssid.is_empty()
    }

    /// Whether switching from `self` to `other` requires a new station join.
    pub fn wifi_changed(&self, other: &BoardSettings) -> bool {
        self.wifi_ssid != other.wifi_ssid || self.wifi_password != other.wifi_password
    }

    pub fn dht_interval_ms(&self) -> u64 {
        u64::from(self.dht_interval_secs) * 1000
    }

    pub fn status_wait_ms(&self) -> u32 {
        u32::from(self.status_wait_secs) * 1000
    }
}

const SETTINGS_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct PersistentSettings {
    version: u8,
    status_wait_secs: u8,
    ap_timeout_secs: u16,
    dht_interval_secs: u16,
    _padding: u16,
    float_param: f32,
    thing_name: [u8; THING_NAME_LEN],
    ap_password: [u8; AP_PASSWORD_LEN],
    wifi_ssid: [u8; WIFI_SSID_LEN],
    wifi_password: [u8; WIFI_PASSWORD_LEN],
    string_param: [u8; STRING_PARAM_LEN],
}

/// Encoded size of [`BoardSettings`]
pub const SETTINGS_SIZE: usize = core::mem::size_of::<PersistentSettings>();

impl Encodable<SETTINGS_SIZE> for BoardSettings {
    fn encode(self) -> [u8; SETTINGS_SIZE] {
        let persistent = PersistentSettings {
            version: SETTINGS_VERSION,
            status_wait_secs: self.status_wait_secs,
            ap_timeout_secs: self.ap_timeout_secs,
            dht_interval_secs: self.dht_interval_secs,
            _padding: 0,
            float_param: self.float_param,
            thing_name: string_to_array(&self.thing_name),
            ap_password: string_to_array(&self.ap_password),
            wifi_ssid: string_to_array(&self.wifi_ssid),
            wifi_password: string_to_array(&self.wifi_password),
            string_param: string_to_array(&self.string_param),
        };
        bytemuck::cast(persistent)
    }

    fn decode(data: &[u8]) -> Option<Self> {
        let raw = data.get(..SETTINGS_SIZE)?;
        let persistent: PersistentSettings = bytemuck::try_pod_read_unaligned(raw).ok()?;
        if persistent.version != SETTINGS_VERSION {
            return None;
        }

        Some(Self {
            thing_name: parse_padded_string(&persistent.thing_name)?,
            ap_password: parse_padded_string(&persistent.ap_password)?,
            wifi_ssid: parse_padded_string(&persistent.wifi_ssid)?,
            wifi_password: parse_padded_string(&persistent.wifi_password)?,
            ap_timeout_secs: persistent.ap_timeout_secs,
            dht_interval_secs: persistent.dht_interval_secs,
            status_wait_secs: persistent.status_wait_secs,
            string_param: parse_padded_string(&persistent.string_param)?,
            float_param: persistent.float_param,
        })
    }
}

/// Read a zero padded UTF-8 string back.
fn parse_padded_string<const N: usize>(bytes: &[u8; N]) -> Option<String<N>> {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(N);
    let text = core::str::from_utf8(&bytes[..len]).ok()?;
    let mut out = String::new();
    out.push_str(text).ok()?;
    Some(out)
}

/// Convert a heapless::String to a fixed-size byte array, padding with zeros
fn string_to_array<const N: usize>(s: &String<N>) -> [u8; N] {
    let mut arr = [0u8; N];
    let bytes = s.as_bytes();
    arr[..bytes.len()].copy_from_slice(bytes);
    arr
}
