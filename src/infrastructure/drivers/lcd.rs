//! 16x2 character LCD on a 4-bit parallel bus (R/W tied low).

use boardtest_core::domain::{
    charset::rom_code,
    ports::{DisplayError, TextDisplay},
};
use esp_hal::{
    delay::Delay,
    gpio::{Level, Output, OutputConfig, OutputPin},
};
use hd44780_driver::{
    Cursor,
    CursorBlink,
    Display,
    DisplayMode,
    HD44780,
    bus::{DataBus, FourBitBusPins},
    charset::CharsetWithFallback,
    memory_map::{DisplayMemoryMap, MemoryMap1602},
    setup::DisplayOptions4Bit,
};

pub struct EspLcd<B, M, C>
where
    B: DataBus,
    M: DisplayMemoryMap,
    C: CharsetWithFallback,
{
    display: HD44780<B, M, C>,
    delay: Delay,
}

impl<B, M, C> TextDisplay for EspLcd<B, M, C>
where
    B: DataBus,
    M: DisplayMemoryMap,
    C: CharsetWithFallback,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear(&mut self.delay).map_err(bus_error)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        self.display
            .set_cursor_xy((col, row), &mut self.delay)
            .map_err(bus_error)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        // Raw ROM bytes, the driver charset has no degree sign
        for ch in text.chars() {
            self.display
                .write_byte(rom_code(ch), &mut self.delay)
                .map_err(bus_error)?;
        }
        Ok(())
    }
}

/// Drive the bus pins and run the controller init sequence.
pub fn init_lcd(
    rs: impl OutputPin + 'static,
    en: impl OutputPin + 'static,
    data: (
        impl OutputPin + 'static,
        impl OutputPin + 'static,
        impl OutputPin + 'static,
        impl OutputPin + 'static,
    ),
) -> Result<impl TextDisplay, DisplayError> {
    let config = OutputConfig::default();
    let (d4, d5, d6, d7) = data;
    let options = DisplayOptions4Bit::new(MemoryMap1602::new()).with_pins(FourBitBusPins {
        rs: Output::new(rs, Level::Low, config),
        en: Output::new(en, Level::Low, config),
        d4: Output::new(d4, Level::Low, config),
        d5: Output::new(d5, Level::Low, config),
        d6: Output::new(d6, Level::Low, config),
        d7: Output::new(d7, Level::Low, config),
    });

    let mut delay = Delay::new();
    let mut display = HD44780::new(options, &mut delay).map_err(|(_, e)| bus_error(e))?;
    display
        .set_display_mode(
            DisplayMode {
                display: Display::On,
                cursor_visibility: Cursor::Invisible,
                cursor_blink: CursorBlink::Off,
            },
            &mut delay,
        )
        .map_err(bus_error)?;
    display.clear(&mut delay).map_err(bus_error)?;

    Ok(EspLcd { display, delay })
}

fn bus_error<E>(_: E) -> DisplayError {
    DisplayError::Bus
}
