/// Color currently shown by the RGB LED, one PWM duty per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    pub const RED: RgbColor = RgbColor::new(255, 0, 0);
    pub const GREEN: RgbColor = RgbColor::new(0, 255, 0);
    pub const BLUE: RgbColor = RgbColor::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unbounded channel values, clamping each to `0..=255`.
    pub fn clamped(r: i16, g: i16, b: i16) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Shift every channel by the given delta, saturating at both ends.
    pub fn adjusted(self, dr: i16, dg: i16, db: i16) -> Self {
        Self::clamped(
            i16::from(self.r) + dr,
            i16::from(self.g) + dg,
            i16::from(self.b) + db,
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_channel(value: i16) -> u8 {
    value.clamp(0, 255) as u8
}

/// Last successful DHT22 measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClimateReading {
    /// Degrees Celsius
    pub temperature: f32,
    /// Relative humidity, percent
    pub humidity: f32,
}

impl ClimateReading {
    pub fn is_valid(&self) -> bool {
        !self.temperature.is_nan() && !self.humidity.is_nan()
    }
}
