use serde::Serialize;

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusSnapshot<'a> {
    pub temperature: f32,
    pub humidity: f32,
    pub light: u16,
    pub rgb: [u8; 3],
    pub state: u8,
    pub uptime_ms: u64,
    pub build_version: &'a str,
}
