//! Tests for the stateless DHCP server codec.

use core::net::Ipv4Addr;

use boardtest_netutils::dhcp::{
    DHCP_ACK, DHCP_DISCOVER, DHCP_OFFER, DHCP_REQUEST, DHCP_RESPONSE_SIZE, allocate_ip,
    build_dhcp_response, find_dhcp_option, parse_dhcp_request, response_type_for,
};

const AP_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 1);
const MAC: [u8; 6] = [0x24, 0x0a, 0xc4, 0x11, 0x22, 0x63];

fn request_packet(message_type: u8) -> [u8; 300] {
    let mut packet = [0u8; 300];
    packet[0] = 1; // BOOTREQUEST
    packet[1] = 1;
    packet[2] = 6;
    packet[4..8].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    packet[28..34].copy_from_slice(&MAC);
    packet[236..240].copy_from_slice(&[99, 130, 83, 99]);
    // padding, hostname option, then the message type
    packet[240] = 0;
    packet[241..246].copy_from_slice(&[12, 3, b'p', b'h', b'o']);
    packet[246..249].copy_from_slice(&[53, 1, message_type]);
    packet[249] = 255;
    packet
}

// -----------------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------------

#[test]
fn parses_discover() {
    let packet = request_packet(DHCP_DISCOVER);
    let request = parse_dhcp_request(&packet).expect("valid request");

    assert_eq!(request.xid, [0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(request.client_mac, MAC);
    assert_eq!(request.message_type, DHCP_DISCOVER);
}

#[test]
fn rejects_short_packets_and_replies() {
    let packet = request_packet(DHCP_DISCOVER);
    assert!(parse_dhcp_request(&packet[..200]).is_none());

    let mut reply = packet;
    reply[0] = 2;
    assert!(parse_dhcp_request(&reply).is_none());
}

#[test]
fn rejects_missing_magic_cookie() {
    let mut packet = request_packet(DHCP_REQUEST);
    packet[236] = 0;
    assert!(parse_dhcp_request(&packet).is_none());
}

#[test]
fn rejects_packet_without_message_type() {
    let mut packet = request_packet(DHCP_REQUEST);
    packet[246] = 255;
    assert!(parse_dhcp_request(&packet).is_none());
}

#[test]
fn maps_request_types_to_replies() {
    assert_eq!(response_type_for(DHCP_DISCOVER), Some(DHCP_OFFER));
    assert_eq!(response_type_for(DHCP_REQUEST), Some(DHCP_ACK));
    assert_eq!(response_type_for(7), None);
}

// -----------------------------------------------------------------------------
// Allocation
// -----------------------------------------------------------------------------

#[test]
fn allocation_is_stable_and_in_pool() {
    let first = allocate_ip(AP_IP, &MAC);
    assert_eq!(first, allocate_ip(AP_IP, &MAC));
    assert_eq!(first, Ipv4Addr::new(192, 168, 4, (0x63 % 49) + 2));

    for last in 0..=u8::MAX {
        let mac = [0, 0, 0, 0, 0, last];
        let host = allocate_ip(AP_IP, &mac).octets()[3];
        assert!((2..=50).contains(&host), "host {host} out of pool");
    }
}

// -----------------------------------------------------------------------------
// Responses
// -----------------------------------------------------------------------------

#[test]
fn builds_offer_with_portal_options() {
    let request = parse_dhcp_request(&request_packet(DHCP_DISCOVER)).unwrap();
    let offered = allocate_ip(AP_IP, &request.client_mac);
    let mut buffer = [0xAAu8; 576];

    let len = build_dhcp_response(AP_IP, &mut buffer, &request, offered, DHCP_OFFER).unwrap();

    assert_eq!(len, DHCP_RESPONSE_SIZE);
    assert_eq!(buffer[0], 2);
    assert_eq!(&buffer[4..8], &request.xid);
    assert_eq!(&buffer[16..20], &offered.octets());
    assert_eq!(&buffer[20..24], &AP_IP.octets());
    assert_eq!(&buffer[28..34], &MAC);

    let options = &buffer[240..len];
    assert_eq!(find_dhcp_option(options, 53), Some(&[DHCP_OFFER][..]));
    assert_eq!(find_dhcp_option(options, 6), Some(&AP_IP.octets()[..]));
    assert_eq!(find_dhcp_option(options, 3), Some(&AP_IP.octets()[..]));
    assert_eq!(find_dhcp_option(options, 1), Some(&[255, 255, 255, 0][..]));
    assert_eq!(find_dhcp_option(options, 51), Some(&3600u32.to_be_bytes()[..]));
    assert_eq!(buffer[len - 1], 255);
}

#[test]
fn refuses_small_buffers() {
    let request = parse_dhcp_request(&request_packet(DHCP_REQUEST)).unwrap();
    let mut buffer = [0u8; 100];
    assert!(build_dhcp_response(AP_IP, &mut buffer, &request, AP_IP, DHCP_ACK).is_none());
}
