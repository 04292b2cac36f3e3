//! Character ROM of the A00 HD44780 variant.

/// Degree sign
const ROM_DEGREE: u8 = 0xDF;

/// Byte that shows `ch` on the display, `?` when the ROM has no glyph.
///
/// `~` and DEL are arrows and blocks in this ROM.
pub fn rom_code(ch: char) -> u8 {
    match ch {
        '°' => ROM_DEGREE,
        ' '..='}' => u8::try_from(ch).unwrap_or(b'?'),
        _ => b'?',
    }
}
