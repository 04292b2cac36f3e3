//! Wi-Fi provisioning state machine.
//!
//! The device starts an access point with the configuration portal and
//! only joins the configured network once nobody is using the portal.

/// Time allowed for a station connection before falling back to the portal.
pub const CONNECT_TIMEOUT_MS: u64 = 30_000;

/// Numeric values are shown on the status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ProvisioningState {
    #[default]
    Boot = 0,
    NotConfigured = 1,
    ApMode = 2,
    Connecting = 3,
    OnLine = 4,
}

impl ProvisioningState {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Boot),
            1 => Some(Self::NotConfigured),
            2 => Some(Self::ApMode),
            3 => Some(Self::Connecting),
            4 => Some(Self::OnLine),
            _ => None,
        }
    }
}

/// Radio configuration the driver has to switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioMode {
    AccessPoint,
    Station,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningEvent {
    /// Periodic check of the timeouts
    Tick,
    /// A portal client leased an address or sent a request
    ClientActivity,
    StationConnected,
    StationDisconnected,
    /// New settings were saved through the portal
    ConfigSaved {
        has_ssid: bool,
        credentials_changed: bool,
        ap_timeout_secs: u16,
    },
}

#[derive(Debug, Clone)]
pub struct Provisioning {
    state: ProvisioningState,
    entered_at: u64,
    last_client_activity: Option<u64>,
    ap_timeout_ms: u64,
}

impl Default for Provisioning {
    fn default() -> Self {
        Self::new()
    }
}

impl Provisioning {
    pub const fn new() -> Self {
        Self {
            state: ProvisioningState::Boot,
            entered_at: 0,
            last_client_activity: None,
            ap_timeout_ms: 0,
        }
    }

    pub fn state(&self) -> ProvisioningState {
        self.state
    }

    /// Time left to associate before falling back to the portal, `None` when
    /// not connecting or once the window has closed.
    pub fn connect_window_left(&self, now: u64) -> Option<u64> {
        if self.state != ProvisioningState::Connecting {
            return None;
        }
        let left = (self.entered_at + CONNECT_TIMEOUT_MS).saturating_sub(now);
        (left > 0).then_some(left)
    }

    /// Leave `Boot` based on the stored settings.
    pub fn boot(&mut self, has_ssid: bool, ap_timeout_secs: u16, now: u64) -> RadioMode {
        self.ap_timeout_ms = u64::from(ap_timeout_secs) * 1000;
        if !has_ssid {
            self.enter(ProvisioningState::NotConfigured, now);
            RadioMode::AccessPoint
        } else if self.ap_timeout_ms == 0 {
            self.enter(ProvisioningState::Connecting, now);
            RadioMode::Station
        } else {
            self.enter(ProvisioningState::ApMode, now);
            RadioMode::AccessPoint
        }
    }

    /// Feed an event, returning the radio mode to switch to when it changes
    /// or the station has to reconnect.
    pub fn handle(&mut self, event: ProvisioningEvent, now: u64) -> Option<RadioMode> {
        use ProvisioningState as S;

        match (self.state, event) {
            (S::NotConfigured | S::ApMode, ProvisioningEvent::ClientActivity) => {
                self.last_client_activity = Some(now);
                None
            }
            (S::ApMode, ProvisioningEvent::Tick) if self.portal_expired(now) => {
                self.enter(S::Connecting, now);
                Some(RadioMode::Station)
            }
            (S::Connecting, ProvisioningEvent::StationConnected) => {
                self.enter(S::OnLine, now);
                None
            }
            (S::Connecting, ProvisioningEvent::Tick)
                if now.saturating_sub(self.entered_at) >= CONNECT_TIMEOUT_MS =>
            {
                self.enter(S::ApMode, now);
                Some(RadioMode::AccessPoint)
            }
            (S::OnLine, ProvisioningEvent::StationDisconnected) => {
                self.enter(S::Connecting, now);
                Some(RadioMode::Station)
            }
            (
                state,
                ProvisioningEvent::ConfigSaved {
                    has_ssid,
                    credentials_changed,
                    ap_timeout_secs,
                },
            ) => {
                self.ap_timeout_ms = u64::from(ap_timeout_secs) * 1000;
                self.on_config_saved(state, has_ssid, credentials_changed, now)
            }
            _ => None,
        }
    }

    fn on_config_saved(
        &mut self,
        state: ProvisioningState,
        has_ssid: bool,
        credentials_changed: bool,
        now: u64,
    ) -> Option<RadioMode> {
        use ProvisioningState as S;

        match state {
            S::NotConfigured if has_ssid => {
                self.enter(S::ApMode, now);
                self.last_client_activity = Some(now);
                None
            }
            S::Connecting | S::OnLine if !has_ssid => {
                self.enter(S::NotConfigured, now);
                Some(RadioMode::AccessPoint)
            }
            S::Connecting | S::OnLine if credentials_changed => {
                self.enter(S::Connecting, now);
                Some(RadioMode::Station)
            }
            S::ApMode if !has_ssid => {
                self.enter(S::NotConfigured, now);
                None
            }
            _ => None,
        }
    }

    fn portal_expired(&self, now: u64) -> bool {
        let since = |at: u64| now.saturating_sub(at) >= self.ap_timeout_ms;
        since(self.entered_at) && self.last_client_activity.is_none_or(since)
    }

    fn enter(&mut self, state: ProvisioningState, now: u64) {
        if self.state != state {
            log::info!("State changed from: {:?} to {:?}", self.state, state);
        }
        self.state = state;
        self.entered_at = now;
        if state != ProvisioningState::ApMode && state != ProvisioningState::NotConfigured {
            self.last_client_activity = None;
        }
    }
}
