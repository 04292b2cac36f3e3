//! Tests for request line parsing.

use boardtest_netutils::request::{HttpMethod, find_header, parse_request_line};

#[test]
fn parses_routed_methods() {
    let (method, target, rest) =
        parse_request_line("GET /config?x=1 HTTP/1.1\r\nHost: 192.168.4.1\r\n\r\n").unwrap();
    assert_eq!(method, HttpMethod::Get);
    assert_eq!(target, "/config?x=1");
    assert_eq!(rest, "Host: 192.168.4.1\r\n\r\n");

    let (method, target, _) = parse_request_line("POST /config HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(method, HttpMethod::Post);
    assert_eq!(target, "/config");
}

#[test]
fn unrouted_methods_collapse_to_other() {
    for line in ["PUT / HTTP/1.1", "DELETE /config HTTP/1.1", "HEAD / HTTP/1.1", "get / HTTP/1.1"] {
        let (method, _, _) = parse_request_line(line).unwrap();
        assert_eq!(method, HttpMethod::Other, "{line}");
    }
}

#[test]
fn rejects_incomplete_request_line() {
    assert_eq!(parse_request_line(""), None);
    assert_eq!(parse_request_line("GET\r\nHost: x\r\n"), None);
}

#[test]
fn header_lookup_ignores_case() {
    let headers = "host: esp32\r\nContent-Length: 12\r\n\r\n";
    assert_eq!(find_header(headers, "Host"), Some("esp32"));
    assert_eq!(find_header(headers, "content-length"), Some("12"));
    assert_eq!(find_header(headers, "accept"), None);
}
