//! DHCP server for portal clients.

use boardtest_core::domain::provisioning::ProvisioningEvent;
use boardtest_netutils::dhcp::{
    DHCP_ACK,
    DHCP_CLIENT_PORT,
    DHCP_SERVER_PORT,
    allocate_ip,
    build_dhcp_response,
    parse_dhcp_request,
    response_type_for,
};
use embassy_net::{
    Ipv4Address,
    Stack,
    udp::{PacketMetadata, UdpSocket},
};

use crate::{
    config::AP_ADDRESS,
    infrastructure::{drivers::wait_for_link, services::notify_provisioning},
};

/// Answers DISCOVER with OFFER and REQUEST with ACK, addresses derived from
/// the client MAC. Every ACK counts as portal client activity.
#[embassy_executor::task]
pub async fn dhcp_server_task(stack: Stack<'static>) {
    let mut rx_meta = [PacketMetadata::EMPTY; 8];
    let mut rx_buffer = [0u8; 1024];
    let mut tx_meta = [PacketMetadata::EMPTY; 8];
    let mut tx_buffer = [0u8; 1024];

    wait_for_link(stack).await;

    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    if let Err(e) = socket.bind(DHCP_SERVER_PORT) {
        log::error!("dhcp_server: failed to bind port {}: {:?}", DHCP_SERVER_PORT, e);
        return;
    }
    log::info!("dhcp_server: listening on port {}", DHCP_SERVER_PORT);

    let mut packet = [0u8; 576];
    loop {
        let len = match socket.recv_from(&mut packet).await {
            Ok((len, _remote)) => len,
            Err(e) => {
                log::warn!("dhcp_server: recv error: {:?}", e);
                continue;
            }
        };
        let Some(request) = parse_dhcp_request(&packet[..len]) else {
            continue;
        };
        let Some(response_type) = response_type_for(request.message_type) else {
            log::debug!(
                "dhcp_server: ignoring message type {}",
                request.message_type
            );
            continue;
        };

        let offered_ip = allocate_ip(AP_ADDRESS, &request.client_mac);
        let Some(response_len) =
            build_dhcp_response(AP_ADDRESS, &mut packet, &request, offered_ip, response_type)
        else {
            continue;
        };

        let dest = (Ipv4Address::BROADCAST, DHCP_CLIENT_PORT);
        if let Err(e) = socket.send_to(&packet[..response_len], dest).await {
            log::warn!("dhcp_server: send error: {:?}", e);
            continue;
        }
        if response_type == DHCP_ACK {
            log::info!("dhcp_server: leased {} to a portal client", offered_ip);
            notify_provisioning(ProvisioningEvent::ClientActivity);
        }
    }
}
