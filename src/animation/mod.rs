//! Breathing "twinkle" animation
//!
//! Nine LEDs are grouped into three triads. In every triad exactly one LED
//! breathes through a full raised-cosine cycle, then hands over to the next
//! member in its fixed rotation order (1→4→7, 2→5→8, 3→6→9). Triads start
//! at different phase offsets so they never breathe in step.
//!
//! All runtime arithmetic is integer multiply and shift; see [`envelope`].

pub mod envelope;
mod triad;

pub use envelope::{PERIOD, SEGMENT_INDEX, SEGMENTS, SINUSOID, SUBPERIOD, duty_at};
pub use triad::{LED_COUNT, LedDrive, LedId, TRIAD_COUNT, TRIAD_SIZE, Triad};

/// Initial phase of the first member of each triad
pub const DEFAULT_PHASE_OFFSETS: [u16; TRIAD_COUNT] = [0, 400, 1200];

/// Configuration for the animation engine
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    /// Starting phase per triad; values past `PERIOD` wrap around
    pub phase_offsets: [u16; TRIAD_COUNT],
}

impl AnimationConfig {
    pub const DEFAULT: Self = Self {
        phase_offsets: DEFAULT_PHASE_OFFSETS,
    };
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Decisions produced by one fine tick, one per triad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutput {
    drives: [LedDrive; TRIAD_COUNT],
}

impl TickOutput {
    /// Decisions for the LEDs that were active during this tick
    pub fn drives(&self) -> &[LedDrive] {
        &self.drives
    }

    /// Whether `led` should be lit; LEDs not animating this tick are off
    pub fn is_on(&self, led: LedId) -> bool {
        self.drives.iter().any(|drive| drive.led == led && drive.on)
    }

    /// LEDs that finished their breathing cycle on this tick
    pub fn completed(&self) -> impl Iterator<Item = LedId> + '_ {
        self.drives
            .iter()
            .filter(|drive| drive.cycle_complete)
            .map(|drive| drive.led)
    }
}

/// Phase state machine for all three triads
#[derive(Debug, Clone)]
pub struct AnimationEngine {
    triads: [Triad; TRIAD_COUNT],
}

impl AnimationEngine {
    /// Create an engine with the first member of each triad active
    pub const fn new(config: &AnimationConfig) -> Self {
        let offsets = config.phase_offsets;
        Self {
            triads: [
                Triad::new(0, offsets[0]),
                Triad::new(1, offsets[1]),
                Triad::new(2, offsets[2]),
            ],
        }
    }

    /// Advance every triad by one fine tick
    ///
    /// `amplitude` (0-255) scales the breathing envelope; it normally comes
    /// from the brightness pipeline.
    pub fn advance(&mut self, amplitude: u8) -> TickOutput {
        TickOutput {
            drives: self.triads.each_mut().map(|triad| triad.step(amplitude)),
        }
    }

    pub fn triads(&self) -> &[Triad; TRIAD_COUNT] {
        &self.triads
    }

    /// Active LED of triad `index`
    pub fn active_led(&self, index: usize) -> Option<LedId> {
        self.triads.get(index).map(Triad::active_led)
    }

    /// Active flags of triad `index`, in rotation order
    pub fn active_flags(&self, index: usize) -> Option<[bool; TRIAD_SIZE]> {
        self.triads.get(index).map(Triad::active_flags)
    }

    /// Currently active LED of every triad
    pub fn active_leds(&self) -> [LedId; TRIAD_COUNT] {
        self.triads.each_ref().map(Triad::active_led)
    }

    pub fn is_active(&self, led: LedId) -> bool {
        self.triads[led.triad()].active_led() == led
    }

    /// Phase counter of `led`; inactive LEDs sit at 0
    pub fn phase(&self, led: LedId) -> u16 {
        self.triads[led.triad()].phase_of(led.slot())
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new(&AnimationConfig::DEFAULT)
    }
}
