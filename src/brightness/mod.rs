//! Ambient brightness pipeline
//!
//! Runs once per coarse tick: sweep the comparator for a raw light code,
//! smooth it, then map it to the amplitude used by the animation.

mod moving_average;
mod scaler;
mod sensor;

#[cfg(feature = "esp32-log")]
use esp_println::println;

pub use moving_average::{MovingAverageFilter, RING_CAPACITY};
pub use scaler::{BrightnessScaler, FLOOR, SLOPE};
pub use sensor::{BrightnessSensor, DEFAULT_SWEEP_CODES, SWEEP_LEN, SweepOutcome};

use crate::ThresholdComparator;

/// Values produced by one pass of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessReading {
    /// Sweep result
    pub outcome: SweepOutcome,
    /// Moving average of raw codes
    pub smoothed: u8,
    /// Animation amplitude (0-255)
    pub amplitude: u8,
}

impl BrightnessReading {
    pub const fn raw(&self) -> u8 {
        self.outcome.code()
    }
}

/// Sensor, filter and scaler chained in order
#[derive(Debug, Clone)]
pub struct BrightnessPipeline {
    sensor: BrightnessSensor<SWEEP_LEN>,
    filter: MovingAverageFilter<RING_CAPACITY>,
    scaler: BrightnessScaler,
}

impl BrightnessPipeline {
    pub const fn new(scaler: BrightnessScaler) -> Self {
        Self {
            sensor: BrightnessSensor::new(DEFAULT_SWEEP_CODES),
            filter: MovingAverageFilter::new(),
            scaler,
        }
    }

    /// Measure, smooth and scale
    pub fn run<C: ThresholdComparator>(&mut self, comparator: &mut C) -> BrightnessReading {
        let outcome = self.sensor.measure_outcome(comparator);
        let smoothed = self.filter.update(outcome.code());
        let amplitude = self.scaler.scale(smoothed);

        #[cfg(feature = "esp32-log")]
        println!(
            "[BrightnessPipeline.run] sweep {:?}, smoothed {}, amplitude {}",
            outcome, smoothed, amplitude
        );

        BrightnessReading {
            outcome,
            smoothed,
            amplitude,
        }
    }

    pub const fn sensor(&self) -> &BrightnessSensor<SWEEP_LEN> {
        &self.sensor
    }

    pub const fn filter(&self) -> &MovingAverageFilter<RING_CAPACITY> {
        &self.filter
    }

    pub const fn scaler(&self) -> &BrightnessScaler {
        &self.scaler
    }
}

impl Default for BrightnessPipeline {
    fn default() -> Self {
        Self::new(BrightnessScaler::DEFAULT)
    }
}
