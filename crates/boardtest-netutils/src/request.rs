//! Request line and header lookups for the portal HTTP server.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    /// Any method the portal has no route for
    Other,
}

impl HttpMethod {
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            _ => HttpMethod::Other,
        }
    }
}

/// Parse the request line from the header string.
///
/// Returns the method, target, and rest of the header string.
pub fn parse_request_line(header_str: &str) -> Option<(HttpMethod, &str, &str)> {
    let line_end = header_str.find("\r\n").unwrap_or(header_str.len());
    let first_line = &header_str[..line_end];
    let mut parts = first_line.split_whitespace();
    let method = HttpMethod::parse(parts.next()?);
    let target = parts.next()?;
    let rest = header_str.get(line_end + 2..).unwrap_or("");

    Some((method, target, rest))
}

/// Find a header value by case-insensitive name.
pub fn find_header<'a>(headers: &'a str, name: &str) -> Option<&'a str> {
    headers.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
    })
}
