/// Amplitude at the darkest code
pub const FLOOR: u8 = 66;

/// Amplitude gained per code step
pub const SLOPE: u8 = 3;

/// Linear map from a smoothed light code to animation amplitude
///
/// `amplitude = min(floor + code * slope, 255)`. The floor keeps the
/// animation visible in the dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessScaler {
    /// Amplitude for code 0
    pub floor: u8,
    /// Amplitude per code step
    pub slope: u8,
}

impl BrightnessScaler {
    pub const DEFAULT: Self = Self::new(FLOOR, SLOPE);

    pub const fn new(floor: u8, slope: u8) -> Self {
        Self { floor, slope }
    }

    /// Amplitude for `code`, saturating at 255
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn scale(&self, code: u8) -> u8 {
        let amplitude = self.floor as u16 + code as u16 * self.slope as u16;
        if amplitude > u8::MAX as u16 {
            u8::MAX
        } else {
            amplitude as u8
        }
    }
}

impl Default for BrightnessScaler {
    fn default() -> Self {
        Self::DEFAULT
    }
}
