use core::fmt::Write;

use embassy_net::tcp::{Error as TcpError, TcpSocket};
use boardtest_netutils::request::find_header;
use heapless::String;

pub(crate) type StatusCode = u16;

/// Longest `Location` value the portal sends
const LOCATION_LEN: usize = 32;

fn reason_phrase(code: StatusCode) -> &'static str {
    match code {
        200 => "OK",
        204 => "No Content",
        302 => "Found",
        303 => "See Other",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Request Entity Too Large",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// HTTP Content Type.
#[derive(Debug)]
pub(crate) enum ContentType {
    Json,
    TextHtml,
    TextPlain,
}

impl ContentType {
    /// Convert the content type to a string.
    pub(super) fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::TextHtml => "text/html",
            ContentType::TextPlain => "text/plain",
        }
    }
}

/// Text Encoding.
#[derive(Debug)]
pub(crate) enum TextEncoding {
    Utf8,
}

impl TextEncoding {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
        }
    }
}

/// HTTP socket connection policy.
#[derive(Debug)]
pub(super) enum ConnectionPolicy {
    Close,
}

impl ConnectionPolicy {
    pub(super) fn as_str(&self) -> &'static str {
        match self {
            ConnectionPolicy::Close => "close",
        }
    }
}

pub(super) trait TargetWriter {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error>;
}

/// HTTP Content Headers.
pub(crate) struct ContentHeaders {
    content_type: ContentType,
    content_length: Option<usize>,
    text_encoding: Option<TextEncoding>,
}

impl ContentHeaders {
    pub(crate) const fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            content_length: None,
            text_encoding: None,
        }
    }

    /// Set the content length.
    #[must_use]
    pub(crate) const fn with_length(mut self, length: usize) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Set the text encoding.
    #[must_use]
    pub(crate) const fn with_text_encoding(mut self, text_encoding: TextEncoding) -> Self {
        self.text_encoding = Some(text_encoding);
        self
    }
}

impl TargetWriter for ContentHeaders {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        write!(writer, "Content-Type: {}", self.content_type.as_str())?;
        if let Some(text_encoding) = &self.text_encoding {
            write!(writer, "; charset={}", text_encoding.as_str())?;
        }
        write!(writer, "\r\n")?;
        if let Some(content_length) = self.content_length {
            write!(writer, "Content-Length: {}\r\n", content_length)?;
        }
        Ok(())
    }
}

/// Response Headers.
pub(crate) struct ResponseHeaders {
    status: StatusCode,
    connection: ConnectionPolicy,
    content: Option<ContentHeaders>,
    location: Option<String<LOCATION_LEN>>,
    no_store: bool,
}

impl ResponseHeaders {
    /// Create empty response headers.
    pub(crate) const fn empty() -> Self {
        Self {
            status: 0,
            content: None,
            connection: ConnectionPolicy::Close,
            location: None,
            no_store: false,
        }
    }

    /// Create empty response headers with a status code.
    pub(crate) const fn from_code(code: StatusCode) -> Self {
        Self::empty().with_code(code)
    }

    pub(crate) const fn success() -> Self {
        Self::from_code(200)
    }

    pub(crate) const fn not_found() -> Self {
        Self::from_code(404)
    }

    pub(crate) const fn method_not_allowed() -> Self {
        Self::from_code(405)
    }

    pub(crate) const fn payload_too_large() -> Self {
        Self::from_code(413)
    }

    pub(crate) const fn unavailable() -> Self {
        Self::from_code(503)
    }

    /// `302 Found` pointing at `location`.
    ///
    /// Locations longer than the header buffer are cut off.
    pub(crate) fn redirect(location: &str) -> Self {
        let mut value = String::new();
        for ch in location.chars() {
            if value.push(ch).is_err() {
                break;
            }
        }
        let mut headers = Self::from_code(302);
        headers.location = Some(value);
        headers.no_store = true;
        headers
    }

    /// Set the content headers.
    #[must_use]
    pub(crate) const fn with_content(mut self, content: ContentHeaders) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the status code.
    #[must_use]
    pub(crate) const fn with_code(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    /// Ask clients not to cache the response.
    #[must_use]
    pub(crate) const fn with_no_store(mut self) -> Self {
        self.no_store = true;
        self
    }
}

impl TargetWriter for ResponseHeaders {
    /// Write the response headers to a writer.
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        let reason = reason_phrase(self.status);
        write!(writer, "HTTP/1.1 {} {}\r\n", self.status, reason)?;
        if let Some(location) = &self.location {
            write!(writer, "Location: {}\r\n", location)?;
        }
        if self.no_store {
            write!(writer, "Cache-Control: no-store\r\n")?;
        }
        match &self.content {
            Some(content) => content.write_to(writer)?,
            None => write!(writer, "Content-Length: 0\r\n")?,
        }

        write!(writer, "Connection: {}\r\n", self.connection.as_str())?;
        write!(writer, "\r\n")?;
        Ok(())
    }
}

/// Read the start line and headers from the socket.
///
/// Returns the position of the end of the headers and the number of bytes read.
/// If the headers are not found, returns (0, 0).
pub(super) async fn read_heading(
    buf: &mut [u8],
    socket: &mut TcpSocket<'_>,
) -> Result<(usize, usize), TcpError> {
    let mut header_len = 0;
    let mut header_end = None;
    loop {
        let n = socket.read(&mut buf[header_len..]).await?;
        if n == 0 {
            return Ok((0, 0));
        }
        header_len += n;
        // Check for end of headers
        if let Some(pos) = buf[..header_len].windows(4).position(|w| w == b"\r\n\r\n") {
            header_end = Some(pos + 4);
            break;
        }
        if header_len >= buf.len() {
            break;
        }
    }

    let header_end = header_end.unwrap_or(header_len);

    Ok((header_end, header_len))
}

/// Find the content length in the header string.
pub(super) fn find_content_length(headers: &str) -> Option<usize> {
    let length = find_header(headers, "content-length")?.parse::<usize>().ok();
    log::debug!("http: Content-Length: {:?}", length);
    length
}
