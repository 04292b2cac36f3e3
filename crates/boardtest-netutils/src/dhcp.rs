//! DHCP Protocol Implementation
//!
//! Provides DHCP message parsing and response building for a simple stateless
//! server running on the portal access point.

use core::net::Ipv4Addr;

/// DHCP message types
pub const DHCP_DISCOVER: u8 = 1;
pub const DHCP_OFFER: u8 = 2;
pub const DHCP_REQUEST: u8 = 3;
pub const DHCP_ACK: u8 = 5;

/// DHCP server and client ports
pub const DHCP_SERVER_PORT: u16 = 67;
pub const DHCP_CLIENT_PORT: u16 = 68;

/// DHCP options
const DHCP_OPTION_MESSAGE_TYPE: u8 = 53;
const DHCP_OPTION_SERVER_ID: u8 = 54;
const DHCP_OPTION_LEASE_TIME: u8 = 51;
const DHCP_OPTION_SUBNET_MASK: u8 = 1;
const DHCP_OPTION_ROUTER: u8 = 3;
const DHCP_OPTION_DNS: u8 = 6;
const DHCP_OPTION_END: u8 = 255;

/// DHCP magic cookie
const DHCP_MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

/// Lease configuration
pub const LEASE_TIME_SECS: u32 = 3600;
const SUBNET_MASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);

/// First and last host octet handed out to clients
const POOL_FIRST_HOST: u8 = 2;
const POOL_SIZE: u8 = 49;

/// Minimum DHCP packet size (BOOTP header + magic cookie)
const MIN_DHCP_PACKET_SIZE: usize = 240;

/// Size of a response built by [`build_dhcp_response`]
pub const DHCP_RESPONSE_SIZE: usize = MIN_DHCP_PACKET_SIZE + 34;

/// Parsed DHCP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpRequest {
    /// Transaction ID
    pub xid: [u8; 4],
    /// Client MAC address
    pub client_mac: [u8; 6],
    /// Message type (DISCOVER, REQUEST, etc.)
    pub message_type: u8,
}

/// Parse a DHCP request from a raw packet
///
/// Returns `None` if the packet is invalid or not a BOOTREQUEST
pub fn parse_dhcp_request(packet: &[u8]) -> Option<DhcpRequest> {
    if packet.len() < MIN_DHCP_PACKET_SIZE {
        return None;
    }

    // op code must be BOOTREQUEST
    if packet[0] != 1 {
        return None;
    }

    let mut xid = [0u8; 4];
    xid.copy_from_slice(&packet[4..8]);

    let mut client_mac = [0u8; 6];
    client_mac.copy_from_slice(&packet[28..34]);

    if packet[236..240] != DHCP_MAGIC_COOKIE {
        return None;
    }

    let options = &packet[240..];
    let message_type = find_dhcp_option(options, DHCP_OPTION_MESSAGE_TYPE)
        .and_then(|data| data.first().copied())?;

    Some(DhcpRequest {
        xid,
        client_mac,
        message_type,
    })
}

/// Map a request message type to the reply the server sends back.
pub fn response_type_for(message_type: u8) -> Option<u8> {
    match message_type {
        DHCP_DISCOVER => Some(DHCP_OFFER),
        DHCP_REQUEST => Some(DHCP_ACK),
        _ => None,
    }
}

/// Allocate an IP address for a client based on their MAC address
///
/// Uses a simple stateless algorithm to derive a consistent IP from the MAC.
/// The address lives in the server's /24, hosts `.2` to `.50`.
pub fn allocate_ip(server_ip: Ipv4Addr, mac: &[u8; 6]) -> Ipv4Addr {
    let [a, b, c, _] = server_ip.octets();
    let offset = (mac[5] % POOL_SIZE) + POOL_FIRST_HOST;
    Ipv4Addr::new(a, b, c, offset)
}

/// Build a DHCP response (OFFER or ACK)
///
/// Returns the length of the response packet, or `None` when the buffer is
/// too small to hold it.
pub fn build_dhcp_response(
    server_ip: Ipv4Addr,
    buffer: &mut [u8],
    request: &DhcpRequest,
    offered_ip: Ipv4Addr,
    response_type: u8,
) -> Option<usize> {
    if buffer.len() < DHCP_RESPONSE_SIZE {
        return None;
    }
    buffer.fill(0);

    // BOOTP header
    buffer[0] = 2; // op: BOOTREPLY
    buffer[1] = 1; // htype: Ethernet
    buffer[2] = 6; // hlen: MAC length
    buffer[3] = 0; // hops

    buffer[4..8].copy_from_slice(&request.xid);

    // secs = 0, flags = broadcast
    buffer[10..12].copy_from_slice(&[0x80, 0x00]);

    // yiaddr
    buffer[16..20].copy_from_slice(&offered_ip.octets());
    // siaddr
    buffer[20..24].copy_from_slice(&server_ip.octets());
    // chaddr
    buffer[28..34].copy_from_slice(&request.client_mac);

    buffer[236..240].copy_from_slice(&DHCP_MAGIC_COOKIE);

    let mut opt_idx = 240;
    opt_idx = push_option(buffer, opt_idx, DHCP_OPTION_MESSAGE_TYPE, &[response_type]);
    opt_idx = push_option(buffer, opt_idx, DHCP_OPTION_SERVER_ID, &server_ip.octets());
    opt_idx = push_option(
        buffer,
        opt_idx,
        DHCP_OPTION_LEASE_TIME,
        &LEASE_TIME_SECS.to_be_bytes(),
    );
    opt_idx = push_option(buffer, opt_idx, DHCP_OPTION_SUBNET_MASK, &SUBNET_MASK.octets());
    opt_idx = push_option(buffer, opt_idx, DHCP_OPTION_ROUTER, &server_ip.octets());
    // The AP answers DNS itself so every lookup lands on the portal
    opt_idx = push_option(buffer, opt_idx, DHCP_OPTION_DNS, &server_ip.octets());

    buffer[opt_idx] = DHCP_OPTION_END;
    opt_idx += 1;

    Some(opt_idx)
}

fn push_option(buffer: &mut [u8], at: usize, code: u8, data: &[u8]) -> usize {
    buffer[at] = code;
    #[allow(clippy::cast_possible_truncation)]
    {
        buffer[at + 1] = data.len() as u8;
    }
    buffer[at + 2..at + 2 + data.len()].copy_from_slice(data);
    at + 2 + data.len()
}

/// Find a DHCP option in the options section
///
/// The options slice should start AFTER the magic cookie (at offset 240 in the
/// packet)
pub fn find_dhcp_option(options: &[u8], option_code: u8) -> Option<&[u8]> {
    let mut i = 0;

    while i < options.len() {
        let code = options[i];
        if code == DHCP_OPTION_END {
            break;
        }
        if code == 0 {
            // Padding
            i += 1;
            continue;
        }
        if i + 1 >= options.len() {
            break;
        }
        let len = options[i + 1] as usize;
        if i + 2 + len > options.len() {
            break;
        }
        if code == option_code {
            return Some(&options[i + 2..i + 2 + len]);
        }
        i += 2 + len;
    }
    None
}
