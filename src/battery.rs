//! Low-battery detection with debounce
//!
//! Every battery sample either bumps a counter (below threshold) or clears
//! it. The battery is reported low only once the counter exceeds the guard
//! count, and a single good sample clears the condition again.

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// 12-bit ADC code for 2.5 V at a 3.3 V reference
pub const LOW_THRESHOLD: u16 = 3100;

/// Consecutive low samples tolerated before tripping
pub const GUARD: u8 = 5;

/// Configuration for the battery monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryConfig {
    /// Samples strictly below this are counted as low
    pub low_threshold: u16,
    /// Counter value that must be exceeded to report low
    pub guard: u8,
}

impl BatteryConfig {
    pub const DEFAULT: Self = Self {
        low_threshold: LOW_THRESHOLD,
        guard: GUARD,
    };
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Debounced battery-good flag
#[derive(Debug, Clone)]
pub struct BatteryMonitor {
    low_threshold: u16,
    guard: u8,
    counter: u8,
    low: bool,
}

impl BatteryMonitor {
    pub const fn new(config: &BatteryConfig) -> Self {
        Self {
            low_threshold: config.low_threshold,
            guard: config.guard,
            counter: 0,
            low: false,
        }
    }

    /// Feed one raw voltage sample, returns `true` while the battery is good
    ///
    /// After tripping, the counter is stepped back by one on every low
    /// sample so it stays bounded while the condition persists.
    pub fn update(&mut self, raw_sample: u16) -> bool {
        if raw_sample < self.low_threshold {
            self.counter = self.counter.saturating_add(1);
        } else {
            self.counter = 0;
        }

        let good = if self.counter > self.guard {
            self.counter -= 1;
            false
        } else {
            true
        };

        #[cfg(feature = "esp32-log")]
        if good == self.low {
            println!(
                "[BatteryMonitor.update] battery {} (sample {})",
                if good { "recovered" } else { "low" },
                raw_sample
            );
        }

        self.low = !good;
        good
    }

    /// Whether the last update reported a low battery
    pub const fn is_low(&self) -> bool {
        self.low
    }

    pub const fn counter(&self) -> u8 {
        self.counter
    }
}

impl Default for BatteryMonitor {
    fn default() -> Self {
        Self::new(&BatteryConfig::DEFAULT)
    }
}
