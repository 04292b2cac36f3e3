mod board_state;
mod provisioning;
mod settings;

pub use board_state::{BoardSnapshot, BoardStateService};
pub(crate) use provisioning::{notify_provisioning, publish_provisioning_state};
pub use provisioning::{ProvisioningEventReceiver, ProvisioningService, get_provisioning_receiver};
pub use settings::{SettingsReceiver, SettingsService, get_settings_receiver, init_settings};
