/// Pages cycled through by the status display, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPage {
    Temperature,
    Humidity,
    Light,
    Rgb,
    ApSsid,
    ApPassword,
    WifiSsid,
    WifiPassword,
    State,
    DhtInterval,
    StatusWait,
}

impl StatusPage {
    pub const ALL: [StatusPage; 11] = [
        Self::Temperature,
        Self::Humidity,
        Self::Light,
        Self::Rgb,
        Self::ApSsid,
        Self::ApPassword,
        Self::WifiSsid,
        Self::WifiPassword,
        Self::State,
        Self::DhtInterval,
        Self::StatusWait,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature C",
            Self::Humidity => "Humidity %",
            Self::Light => "Light",
            Self::Rgb => "RGB",
            Self::ApSsid => "IoT AP SSID",
            Self::ApPassword => "IoT AP pwd",
            Self::WifiSsid => "IoT WiFi SSID",
            Self::WifiPassword => "IoT WiFi pwd",
            Self::State => "IoT State",
            Self::DhtInterval => "IoT intDhtIntervalParamValue",
            Self::StatusWait => "IoT intStatusWaitParamValue",
        }
    }
}
