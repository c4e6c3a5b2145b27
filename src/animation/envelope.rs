//! Breathing envelope and software PWM
//!
//! One breathing cycle is `PERIOD` fine ticks long. It is split into
//! `SEGMENTS` windows, each mapped to one sample of a raised-cosine table,
//! and every window is split again into `SUBPERIOD`-tick PWM cycles whose
//! on-time is proportional to that sample.

use crate::math8::{mul_recip16, recip16, scale8};

/// Fine ticks per breathing cycle
pub const PERIOD: u16 = 2000;

/// Number of samples in the sinusoid table
pub const SEGMENTS: u16 = 20;

/// Length of one software PWM cycle in fine ticks
pub const SUBPERIOD: u16 = 20;

/// Fine ticks covered by one sinusoid sample
pub const WINDOW: u16 = PERIOD / SEGMENTS;

const _: () = {
    assert!(PERIOD % SEGMENTS == 0, "SEGMENTS must evenly divide PERIOD");
    assert!(WINDOW % SUBPERIOD == 0, "SUBPERIOD must evenly divide PERIOD / SEGMENTS");
    assert!(SEGMENTS <= 256, "segment indices are stored as u8");
};

const RECIP_SEGMENTS: u16 = recip16(SEGMENTS);
const RECIP_SUBPERIOD: u16 = recip16(SUBPERIOD);

#[allow(clippy::cast_possible_truncation)]
const LAST_SEGMENT: u8 = (SEGMENTS - 1) as u8;

/// `255 * 0.5 * (1 - cos(2π·i / SEGMENTS))`, rounded to 8 bits
pub const SINUSOID: [u8; SEGMENTS as usize] = [
    0, 6, 24, 53, 88, 128, 168, 203, 232, 250, 255, 250, 232, 203, 168, 128, 88, 53, 24, 6,
];

/// Phase to segment lookup, `i * SEGMENTS / PERIOD` for every phase value
#[derive(Debug)]
pub struct SegmentIndexTable([u8; PERIOD as usize]);

impl SegmentIndexTable {
    /// Build the table. Only meant to run in const context.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new() -> Self {
        let mut table = [0u8; PERIOD as usize];
        let mut phase = 0;
        while phase < PERIOD as usize {
            table[phase] = ((phase as u32 * SEGMENTS as u32) / PERIOD as u32) as u8;
            phase += 1;
        }
        Self(table)
    }

    /// Segment index for a phase value
    ///
    /// Out-of-range phases map to the last segment.
    #[inline]
    pub fn segment(&self, phase: u16) -> u8 {
        self.0
            .get(usize::from(phase))
            .copied()
            .unwrap_or(LAST_SEGMENT)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Default for SegmentIndexTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Lookup table shared by every LED, computed at build time
pub static SEGMENT_INDEX: SegmentIndexTable = SegmentIndexTable::new();

/// First phase value of the window holding `segment`
///
/// `PERIOD * segment / SEGMENTS`, via reciprocal multiply.
#[inline]
pub fn window_start(segment: u8) -> u32 {
    mul_recip16(u32::from(PERIOD) * u32::from(segment), RECIP_SEGMENTS)
}

/// Phase value at which the LED switches off within the current PWM cycle
///
/// The table sample is first scaled by `amplitude`, so amplitude 0 never
/// lights the LED and amplitude 255 reproduces the table.
pub fn transition_to_low(phase: u16, amplitude: u8) -> u32 {
    let segment = SEGMENT_INDEX.segment(phase);
    let lower_bound = window_start(segment);

    let position = mul_recip16(
        u32::from(phase).saturating_sub(lower_bound),
        RECIP_SUBPERIOD,
    );

    let level = scale8(SINUSOID[usize::from(segment)], amplitude);
    let on_ticks = (u32::from(level) * u32::from(SUBPERIOD)) >> 8;

    lower_bound + position * u32::from(SUBPERIOD) + on_ticks
}

/// Whether an LED at `phase` is lit for this tick
#[inline]
pub fn duty_at(phase: u16, amplitude: u8) -> bool {
    u32::from(phase) < transition_to_low(phase, amplitude)
}
