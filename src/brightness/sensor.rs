//! Ambient light estimation by threshold sweep
//!
//! The light sensor feeds one comparator input, a small DAC the other. The
//! sweep walks the DAC from the brightest code down and stops at the first
//! code that produced a high-to-low transition on the comparator.
//!
//! The scan is linear on purpose. Near the room's ambient level the sensor
//! output is noisy around the trip point; a monotonic descending scan plus
//! the comparator's own hysteresis settles on one code, where a binary
//! search would keep straddling the noisy boundary.

use crate::ThresholdComparator;

/// Number of codes in the default sweep table
pub const SWEEP_LEN: usize = 17;

/// Default sweep table, brightest first
pub const DEFAULT_SWEEP_CODES: [u8; SWEEP_LEN] =
    [63, 59, 55, 51, 47, 43, 39, 35, 31, 27, 23, 19, 15, 11, 7, 3, 0];

/// How a sweep ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// The comparator tripped at this code
    Tripped(u8),
    /// No code tripped; carries the brightest code as fallback
    Exhausted(u8),
}

impl SweepOutcome {
    /// Code reported to the rest of the pipeline
    pub const fn code(self) -> u8 {
        match self {
            Self::Tripped(code) | Self::Exhausted(code) => code,
        }
    }
}

/// Threshold-sweep light sensor over `N` descending codes
#[derive(Debug, Clone)]
pub struct BrightnessSensor<const N: usize> {
    codes: [u8; N],
    last_code: u8,
}

impl<const N: usize> BrightnessSensor<N> {
    const NOT_EMPTY: () = assert!(N > 0, "sweep table must not be empty");

    /// Create a sensor; `codes` must be ordered brightest to dimmest
    pub const fn new(codes: [u8; N]) -> Self {
        let () = Self::NOT_EMPTY;
        Self {
            codes,
            last_code: codes[0],
        }
    }

    /// First (brightest) code of the table
    pub const fn brightest(&self) -> u8 {
        self.codes[0]
    }

    pub const fn codes(&self) -> &[u8; N] {
        &self.codes
    }

    /// Result of the most recent sweep, the brightest code before the first
    pub const fn last_code(&self) -> u8 {
        self.last_code
    }

    /// Run one sweep and return the estimated light code
    pub fn measure<C: ThresholdComparator>(&mut self, comparator: &mut C) -> u8 {
        self.measure_outcome(comparator).code()
    }

    /// Run one sweep and report whether it tripped or ran out of codes
    ///
    /// The comparator is left with edge detection disabled and the threshold
    /// at the brightest code, so it does not keep firing between sweeps.
    pub fn measure_outcome<C: ThresholdComparator>(&mut self, comparator: &mut C) -> SweepOutcome {
        comparator.clear_transition_latch();
        comparator.enable_edge_detection();

        let mut outcome = SweepOutcome::Exhausted(self.brightest());
        for &code in &self.codes {
            comparator.set_threshold(code);
            if comparator.poll_transition() {
                outcome = SweepOutcome::Tripped(code);
                break;
            }
        }

        comparator.set_threshold(self.brightest());
        comparator.disable_edge_detection();

        self.last_code = outcome.code();
        outcome
    }
}

impl Default for BrightnessSensor<SWEEP_LEN> {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_CODES)
    }
}
