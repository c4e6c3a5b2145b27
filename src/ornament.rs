//! Host integration: owns the core components and drives the outputs
//!
//! The board crate supplies a [`LedOutput`] and a [`ThresholdComparator`],
//! then forwards timer and ADC events here, either directly or through an
//! [`EventQueue`](crate::EventQueue). Calls must not overlap; the ornament
//! is not reentrant.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AnimationConfig, AnimationEngine, TickOutput};
use crate::battery::{BatteryConfig, BatteryMonitor};
use crate::brightness::{BrightnessPipeline, BrightnessReading, BrightnessScaler};
use crate::events::{EventReceiver, OrnamentEvent};
use crate::{LedOutput, ThresholdComparator};

/// Build-time configuration for the whole ornament
#[derive(Debug, Clone)]
pub struct OrnamentConfig {
    pub animation: AnimationConfig,
    pub scaler: BrightnessScaler,
    pub battery: BatteryConfig,
    /// Amplitude used until the first brightness measurement
    pub initial_amplitude: u8,
}

impl OrnamentConfig {
    pub const DEFAULT: Self = Self {
        animation: AnimationConfig::DEFAULT,
        scaler: BrightnessScaler::DEFAULT,
        battery: BatteryConfig::DEFAULT,
        initial_amplitude: u8::MAX,
    };
}

impl Default for OrnamentConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The ornament: animation, brightness tracking and battery gating
pub struct Ornament<O: LedOutput, C: ThresholdComparator> {
    // Hardware
    output: O,
    comparator: C,

    // Core components
    engine: AnimationEngine,
    brightness: BrightnessPipeline,
    battery: BatteryMonitor,

    // Latest results
    amplitude: u8,
    battery_good: bool,
}

impl<O: LedOutput, C: ThresholdComparator> Ornament<O, C> {
    pub fn new(output: O, comparator: C, config: &OrnamentConfig) -> Self {
        Self {
            output,
            comparator,
            engine: AnimationEngine::new(&config.animation),
            brightness: BrightnessPipeline::new(config.scaler),
            battery: BatteryMonitor::new(&config.battery),
            amplitude: config.initial_amplitude,
            battery_good: true,
        }
    }

    /// Advance the animation one step and write it to the LEDs
    ///
    /// While the battery is low the animation is frozen, nothing is written
    /// and `None` is returned.
    pub fn fine_tick(&mut self) -> Option<TickOutput> {
        if !self.battery_good {
            return None;
        }

        let frame = self.engine.advance(self.amplitude);
        for drive in frame.drives() {
            // A finished LED hands over to the next member and must go dark
            self.output.set_led(drive.led, drive.on && !drive.cycle_complete);
        }
        Some(frame)
    }

    /// Measure ambient light and update the animation amplitude
    pub fn coarse_tick(&mut self) -> BrightnessReading {
        let reading = self.brightness.run(&mut self.comparator);
        self.amplitude = reading.amplitude;
        reading
    }

    /// Feed a battery voltage sample, returns the debounced battery-good flag
    ///
    /// A low battery lights the indicator and forces every LED off.
    pub fn battery_sample(&mut self, raw_voltage: u16) -> bool {
        let good = self.battery.update(raw_voltage);
        self.output.set_low_battery_indicator(!good);
        if !good {
            self.output.all_off();
        }

        #[cfg(feature = "esp32-log")]
        if good != self.battery_good {
            let state = if good { "resumed" } else { "suppressed" };
            println!("[Ornament.battery_sample] output {}", state);
        }

        self.battery_good = good;
        good
    }

    /// Dispatch one event
    pub fn handle(&mut self, event: OrnamentEvent) {
        match event {
            OrnamentEvent::FineTick => {
                let _ = self.fine_tick();
            }
            OrnamentEvent::CoarseTick => {
                let _ = self.coarse_tick();
            }
            OrnamentEvent::BatterySample(raw) => {
                let _ = self.battery_sample(raw);
            }
        }
    }

    /// Drain every queued event (non-blocking), returns how many were handled
    pub fn process_pending<const SIZE: usize>(
        &mut self,
        events: &EventReceiver<'_, SIZE>,
    ) -> usize {
        let mut handled = 0;
        while let Some(event) = events.pop() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Amplitude passed to the animation on the next fine tick
    pub const fn amplitude(&self) -> u8 {
        self.amplitude
    }

    pub const fn is_battery_good(&self) -> bool {
        self.battery_good
    }

    pub const fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    pub const fn brightness(&self) -> &BrightnessPipeline {
        &self.brightness
    }

    pub const fn battery(&self) -> &BatteryMonitor {
        &self.battery
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn comparator_mut(&mut self) -> &mut C {
        &mut self.comparator
    }
}
