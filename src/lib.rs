#![no_std]

pub mod animation;
pub mod battery;
pub mod brightness;
pub mod events;
pub mod math8;
pub mod ornament;
pub mod tick_scheduler;

pub use animation::{AnimationConfig, AnimationEngine, LedDrive, LedId, TickOutput};
pub use battery::{BatteryConfig, BatteryMonitor};
pub use brightness::{
    BrightnessPipeline, BrightnessReading, BrightnessScaler, BrightnessSensor, MovingAverageFilter,
    SweepOutcome,
};
pub use events::{EventQueue, EventReceiver, EventSender, OrnamentEvent, QueueFull};
pub use ornament::{Ornament, OrnamentConfig};
pub use tick_scheduler::{TickResult, TickScheduler, TickTimings};

pub use embassy_time::{Duration, Instant};

/// Abstract LED output
///
/// Implement this trait to drive the nine animation LEDs and the
/// low-battery indicator on a particular board.
pub trait LedOutput {
    /// Drive one animation LED
    fn set_led(&mut self, led: LedId, on: bool);

    /// Switch every animation LED off
    fn all_off(&mut self);

    /// Drive the low-battery indicator
    fn set_low_battery_indicator(&mut self, on: bool);
}

/// Abstract comparator with a programmable threshold
///
/// One input is the ambient light sensor, the other a DAC set by
/// [`set_threshold`](Self::set_threshold). Edge detection latches a
/// high-to-low transition until it is cleared.
pub trait ThresholdComparator {
    /// Program the reference DAC
    fn set_threshold(&mut self, code: u8);

    /// Whether a high-to-low transition has been latched
    fn poll_transition(&mut self) -> bool;

    /// Clear any latched transition
    fn clear_transition_latch(&mut self);

    fn enable_edge_detection(&mut self);

    fn disable_edge_detection(&mut self);
}
