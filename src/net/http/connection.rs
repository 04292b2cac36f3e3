use boardtest_netutils::request::{HttpMethod, find_header, parse_request_line};
use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::{String, Vec};
use serde::Serialize;

use super::{
    Error,
    HttpResult,
    headers::{
        ContentHeaders,
        ContentType,
        ResponseHeaders,
        TargetWriter as _,
        TextEncoding,
        find_content_length,
        read_heading,
    },
};

const HEADER_BUFFER_SIZE: usize = 1024;
const BODY_BUFFER_SIZE: usize = 1024;
const BODY_RX_CHUNK_SIZE: usize = 256;
const STREAM_CHUNK_SIZE: usize = 1024;
const PATH_LEN: usize = 64;
const HOST_LEN: usize = 64;

/// HTTP connection context
pub(crate) struct HttpConnection<'a> {
    pub(crate) method: HttpMethod,
    /// Request path without the query string
    pub(crate) path: String<PATH_LEN>,
    /// `Host` header, empty when the client sent none
    pub(crate) host: String<HOST_LEN>,

    socket: TcpSocket<'a>,
    content_length: usize,
    header_end: usize,
    header_buf: Vec<u8, HEADER_BUFFER_SIZE>,
    body_buf: Vec<u8, BODY_BUFFER_SIZE>,
}

impl<'a> HttpConnection<'a> {
    /// Create a new HTTP connection from a socket.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut header_buf = Vec::<u8, HEADER_BUFFER_SIZE>::new();
        header_buf
            .resize(HEADER_BUFFER_SIZE, 0)
            .map_err(|()| Error::TooLarge)?;
        let (header_end, header_len) = read_heading(header_buf.as_mut_slice(), &mut socket).await?;
        if header_len == 0 {
            return Err(Error::Closed);
        }
        header_buf.truncate(header_len);

        // Body bytes that arrived with the headers stay in the buffer
        let headers_only = &header_buf.as_slice()[..header_end];
        let header_str = core::str::from_utf8(headers_only).map_err(|_| Error::Parse)?;
        let (method, raw_target, rest_headers) =
            parse_request_line(header_str).ok_or(Error::Parse)?;
        let content_length = find_content_length(rest_headers).unwrap_or(0);

        let raw_path = raw_target.split('?').next().unwrap_or(raw_target);
        let mut path = String::new();
        path.push_str(raw_path).map_err(|()| Error::TooLarge)?;

        // Oversized hosts are never ours, leaving it empty would accept them
        let mut host = String::new();
        if let Some(value) = find_header(rest_headers, "host") {
            host.push_str(value).map_err(|()| Error::TooLarge)?;
        }

        log::debug!("http: {:?} {} (host '{}')", method, path, host);

        Ok(Self {
            method,
            path,
            host,
            socket,
            content_length,
            header_end,
            header_buf,
            body_buf: Vec::new(),
        })
    }

    /// Write the headers to the connection
    pub(crate) async fn write_headers(&mut self, headers: &ResponseHeaders) -> HttpResult {
        self.header_buf.clear();
        headers.write_to(&mut self.header_buf)?;
        self.socket.write_all(self.header_buf.as_slice()).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Write the body to the connection
    pub(crate) async fn write_body(&mut self, body: &[u8]) -> HttpResult {
        for chunk in body.chunks(STREAM_CHUNK_SIZE) {
            self.socket.write_all(chunk).await?;
        }
        self.socket.flush().await?;
        Ok(())
    }

    /// Write an HTML page with the given status code.
    pub(crate) async fn write_html(&mut self, headers: ResponseHeaders, html: &str) -> HttpResult {
        let content = ContentHeaders::new(ContentType::TextHtml)
            .with_text_encoding(TextEncoding::Utf8)
            .with_length(html.len());
        self.write_headers(&headers.with_content(content)).await?;
        self.write_body(html.as_bytes()).await
    }

    /// Write a short plain text response.
    pub(crate) async fn write_text(&mut self, headers: ResponseHeaders, text: &str) -> HttpResult {
        let content = ContentHeaders::new(ContentType::TextPlain)
            .with_text_encoding(TextEncoding::Utf8)
            .with_length(text.len());
        self.write_headers(&headers.with_content(content)).await?;
        self.write_body(text.as_bytes()).await
    }

    /// Write JSON to the connection
    ///
    /// Writes both headers and body.
    pub(crate) async fn write_json<T: Serialize>(&mut self, data: &T) -> HttpResult {
        self.body_buf.clear();
        self.body_buf
            .resize(BODY_BUFFER_SIZE, 0)
            .map_err(|()| Error::TooLarge)?;
        let n = serde_json_core::to_slice(data, self.body_buf.as_mut_slice())
            .map_err(|_| Error::TooLarge)?;
        self.body_buf.truncate(n);
        let headers = ResponseHeaders::success()
            .with_no_store()
            .with_content(ContentHeaders::new(ContentType::Json).with_length(n));

        self.write_headers(&headers).await?;
        self.socket.write_all(self.body_buf.as_slice()).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Send a `302 Found` to `location`.
    pub(crate) async fn redirect(&mut self, location: &str) -> HttpResult {
        self.write_headers(&ResponseHeaders::redirect(location)).await
    }

    /// Read an `application/x-www-form-urlencoded` body.
    pub(crate) async fn read_form_body(&mut self) -> Result<&str, Error> {
        let body = self.read_body().await?;
        core::str::from_utf8(body).map_err(|_| Error::Parse)
    }

    /// Get request method and path
    pub(crate) fn route(&self) -> (HttpMethod, &'_ str) {
        (self.method, self.path.as_str())
    }

    /// Whether the announced request body fits the body buffer.
    pub(crate) fn body_fits(&self) -> bool {
        self.content_length <= BODY_BUFFER_SIZE
    }

    /// Read the request body, empty when none was announced
    async fn read_body(&mut self) -> Result<&[u8], Error> {
        if self.content_length == 0 {
            return Ok(&[]);
        }
        if !self.body_fits() {
            return Err(Error::TooLarge);
        }

        self.body_buf.clear();
        if self.header_buf.len() > self.header_end {
            self.body_buf
                .extend_from_slice(&self.header_buf[self.header_end..])
                .map_err(|()| Error::TooLarge)?;
        }

        while self.body_buf.len() < self.content_length {
            let mut buf = [0u8; BODY_RX_CHUNK_SIZE];
            let n = self.socket.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            self.body_buf
                .extend_from_slice(&buf[..n])
                .map_err(|()| Error::TooLarge)?;
        }

        let len = self.body_buf.len().min(self.content_length);
        Ok(&self.body_buf.as_slice()[..len])
    }
}
