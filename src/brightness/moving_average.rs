//! Fixed-window moving average over raw light codes

/// Default window length
pub const RING_CAPACITY: usize = 8;

/// Moving average over the last `C` samples
///
/// `C` must be a power of two so the mean is a right shift. The ring starts
/// zero-filled: until `C` samples have arrived the average reads low.
#[derive(Debug, Clone)]
pub struct MovingAverageFilter<const C: usize> {
    samples: [u8; C],
    cursor: usize,
}

impl<const C: usize> MovingAverageFilter<C> {
    const SHIFT: u32 = {
        assert!(C.is_power_of_two(), "ring capacity must be a power of two");
        C.trailing_zeros()
    };

    pub const fn new() -> Self {
        let _ = Self::SHIFT;
        Self {
            samples: [0; C],
            cursor: 0,
        }
    }

    /// Insert a sample over the oldest one and return the new average
    pub fn update(&mut self, sample: u8) -> u8 {
        self.samples[self.cursor] = sample;
        self.cursor = (self.cursor + 1) & (C - 1);
        self.average()
    }

    /// Floor of the mean of all `C` slots
    #[allow(clippy::cast_possible_truncation)]
    pub fn average(&self) -> u8 {
        let sum: u32 = self.samples.iter().copied().map(u32::from).sum();
        (sum >> Self::SHIFT) as u8
    }

    /// Slot the next sample will overwrite
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Zero the ring and rewind the cursor
    pub fn reset(&mut self) {
        self.samples = [0; C];
        self.cursor = 0;
    }
}

impl<const C: usize> Default for MovingAverageFilter<C> {
    fn default() -> Self {
        Self::new()
    }
}
