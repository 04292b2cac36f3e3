//! Captive DNS: every name resolves to the access point.

use core::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use boardtest_netutils::captive::{DNS_PORT, DNS_TTL};
use edge_captive::io::run;
use edge_nal_embassy::{Udp, UdpBuffers};
use embassy_net::Stack;
use embassy_time::{Duration, Timer};

use crate::{
    config::AP_ADDRESS,
    infrastructure::drivers::wait_for_link,
};

#[embassy_executor::task]
pub async fn captive_dns_task(stack: Stack<'static>) {
    let mut tx_buf = [0u8; 1024];
    let mut rx_buf = [0u8; 1024];
    let buffers = UdpBuffers::<1, 1024, 1024, 4>::new();
    let udp = Udp::new(stack, &buffers);
    let local = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DNS_PORT));

    wait_for_link(stack).await;
    log::info!("captive_dns: answering on port {} with {}", DNS_PORT, AP_ADDRESS);

    loop {
        if let Err(e) = run(&udp, local, &mut tx_buf, &mut rx_buf, AP_ADDRESS, DNS_TTL).await {
            log::warn!("captive_dns: server error: {:?}", e);
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}
