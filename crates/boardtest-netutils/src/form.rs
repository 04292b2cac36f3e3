//! `application/x-www-form-urlencoded` decoding for the configuration form.

use heapless::String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// A `%` escape was truncated or not hexadecimal
    InvalidEscape,
    /// The decoded bytes are not UTF-8
    InvalidUtf8,
    /// The decoded value does not fit the destination
    TooLong,
}

/// Iterator over the raw (still encoded) `name=value` pairs of a form body.
#[derive(Debug, Clone)]
pub struct FormFields<'a> {
    rest: &'a str,
}

impl<'a> FormFields<'a> {
    pub fn new(body: &'a str) -> Self {
        Self { rest: body }
    }
}

impl<'a> Iterator for FormFields<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.rest.is_empty() {
                return None;
            }
            let (pair, rest) = match self.rest.find('&') {
                Some(pos) => (&self.rest[..pos], &self.rest[pos + 1..]),
                None => (self.rest, ""),
            };
            self.rest = rest;
            if pair.is_empty() {
                continue;
            }
            return Some(match pair.find('=') {
                Some(pos) => (&pair[..pos], &pair[pos + 1..]),
                None => (pair, ""),
            });
        }
    }
}

/// Find the raw value of the first field called `name`.
pub fn find_field<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    FormFields::new(body)
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Decode one form component (`+` is a space, `%XX` a byte).
pub fn decode_component<const N: usize>(raw: &str) -> Result<String<N>, FormError> {
    let mut bytes = heapless::Vec::<u8, N>::new();
    let raw = raw.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        let byte = match raw[i] {
            b'+' => b' ',
            b'%' => {
                let hi = raw.get(i + 1).copied().and_then(hex_value);
                let lo = raw.get(i + 2).copied().and_then(hex_value);
                let (Some(hi), Some(lo)) = (hi, lo) else {
                    return Err(FormError::InvalidEscape);
                };
                i += 2;
                (hi << 4) | lo
            }
            other => other,
        };
        bytes.push(byte).map_err(|_| FormError::TooLong)?;
        i += 1;
    }

    String::from_utf8(bytes).map_err(|_| FormError::InvalidUtf8)
}

/// Encode `value` for use inside an HTML attribute or text node.
pub fn write_html_escaped(out: &mut impl core::fmt::Write, value: &str) -> core::fmt::Result {
    for ch in value.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\'' => out.write_str("&#39;")?,
            other => out.write_char(other)?,
        }
    }
    Ok(())
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
