//! Captive portal host checks and DNS answer parameters.

use core::fmt::Write as _;
use core::net::Ipv4Addr;
use core::time::Duration;

use heapless::String;

pub const DNS_PORT: u16 = 53;
/// Lifetime of the DNS answers pointing at the access point
pub const DNS_TTL: Duration = Duration::from_secs(60);

/// Length of `http://255.255.255.255/`
pub const PORTAL_LOCATION_LEN: usize = 24;

/// Check whether a request `Host` header addresses this device.
///
/// The device answers to its own IP address and to its thing name, with or
/// without the `.local` suffix. A port suffix is ignored.
pub fn is_device_host(host: &str, device_ip: Ipv4Addr, thing_name: &str) -> bool {
    let host = strip_port(host.trim());
    if host.is_empty() {
        // HTTP/1.0 clients without a Host header are talking to us directly
        return true;
    }
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return ip == device_ip;
    }
    let name = host.strip_suffix('.').unwrap_or(host);
    let name = strip_suffix_ignore_case(name, ".local").unwrap_or(name);
    name.eq_ignore_ascii_case(thing_name)
}

/// Location the captive portal redirects foreign hosts to.
pub fn portal_location(device_ip: Ipv4Addr) -> String<PORTAL_LOCATION_LEN> {
    let mut location = String::new();
    // The longest dotted quad fits the buffer
    let _ = write!(location, "http://{device_ip}/");
    location
}

fn strip_port(host: &str) -> &str {
    match host.rfind(':') {
        Some(pos) if host[pos + 1..].bytes().all(|b| b.is_ascii_digit()) => &host[..pos],
        _ => host,
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    if value.len() < suffix.len() {
        return None;
    }
    let split = value.len() - suffix.len();
    if !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
