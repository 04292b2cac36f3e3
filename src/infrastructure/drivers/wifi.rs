//! Radio bring-up: one controller, an access point interface with a fixed
//! address for the portal and a station interface configured by DHCP.

use embassy_executor::Spawner;
use embassy_net::{
    DhcpConfig,
    Ipv4Cidr,
    Runner,
    Stack,
    StackResources,
    StaticConfigV4,
};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_radio::wifi::{Config, WifiController, WifiDevice};
use heapless::String;
use static_cell::make_static;

use super::random::get_seed;
use crate::config::{AP_ADDRESS, AP_PREFIX_LEN};

const MAX_AP_SOCKETS: usize = 6;
const MAX_STA_SOCKETS: usize = 4;
const MAX_HOSTNAME_LEN: usize = 32;

pub struct WifiStacks {
    /// Portal network, `192.168.4.1/24`
    pub ap: Stack<'static>,
    /// Uplink network joined with the configured credentials
    pub sta: Stack<'static>,
}

/// Initialize the radio and both network stacks.
///
/// The controller is returned unstarted; the provisioning task decides which
/// interface is brought up.
///
/// # Panics
///
/// Panics when the radio cannot be initialized.
pub fn init_wifi(
    spawner: Spawner,
    wifi_device: WIFI<'static>,
    hostname: &str,
) -> (WifiStacks, WifiController<'static>) {
    let esp_radio_ctrl = &*make_static!(esp_radio::init().expect("wifi: radio init"));
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default())
            .expect("wifi: controller init");

    let ap_config = embassy_net::Config::ipv4_static(StaticConfigV4 {
        address: Ipv4Cidr::new(AP_ADDRESS, AP_PREFIX_LEN),
        gateway: Some(AP_ADDRESS),
        dns_servers: heapless::Vec::default(),
    });
    let (ap, ap_runner) = embassy_net::new(
        interfaces.ap,
        ap_config,
        make_static!(StackResources::<MAX_AP_SOCKETS>::new()),
        get_seed(),
    );

    let mut dhcp_config = DhcpConfig::default();
    let mut dhcp_hostname = String::<MAX_HOSTNAME_LEN>::new();
    if dhcp_hostname.push_str(hostname).is_ok() {
        dhcp_config.hostname = Some(dhcp_hostname);
    }
    let (sta, sta_runner) = embassy_net::new(
        interfaces.sta,
        embassy_net::Config::dhcpv4(dhcp_config),
        make_static!(StackResources::<MAX_STA_SOCKETS>::new()),
        get_seed(),
    );

    spawner.spawn(network_runner_task(ap_runner)).ok();
    spawner.spawn(network_runner_task(sta_runner)).ok();

    (WifiStacks { ap, sta }, controller)
}

/// Background task for running a network stack
#[embassy_executor::task(pool_size = 2)]
pub async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

/// Wait until the interface link is up
pub async fn wait_for_link(stack: Stack<'_>) {
    while !stack.is_link_up() {
        Timer::after(Duration::from_millis(100)).await;
    }
}
