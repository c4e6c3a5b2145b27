//! Tick pacing without async/await or platform timers.
//!
//! Turns a monotonic clock into the two cadences the ornament needs: a fast
//! animation tick and a slow brightness tick. The caller sleeps for the
//! returned duration between calls.

use embassy_time::{Duration, Instant};

use crate::events::{EventReceiver, OrnamentEvent};
use crate::{LedOutput, Ornament, ThresholdComparator};

/// Default animation cadence
pub const DEFAULT_FINE_PERIOD: Duration = Duration::from_millis(1);

/// Default brightness measurement cadence
pub const DEFAULT_COARSE_PERIOD: Duration = Duration::from_millis(1000);

/// Fine ticks the scheduler may fall behind before it skips the backlog
pub const MAX_FINE_DRIFT: u32 = 2;

/// Tick periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimings {
    /// Time between animation steps
    pub fine: Duration,
    /// Time between brightness measurements
    pub coarse: Duration,
}

impl TickTimings {
    pub const DEFAULT: Self = Self {
        fine: DEFAULT_FINE_PERIOD,
        coarse: DEFAULT_COARSE_PERIOD,
    };
}

impl Default for TickTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What one call to [`TickScheduler::tick`] did
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// An animation step was due and dispatched (frozen while the battery is low)
    pub fine_tick: bool,
    /// A brightness measurement was due and ran
    pub coarse_tick: bool,
    /// Battery samples handled before ticking
    pub events: usize,
    /// The next time anything is due
    pub next_deadline: Instant,
    /// How long to wait until `next_deadline` (zero if behind schedule)
    pub sleep_duration: Duration,
}

/// Portable scheduler driving an [`Ornament`] from a clock and an event queue.
///
/// The scheduler owns both cadences. Only [`OrnamentEvent::BatterySample`]
/// is taken from the queue; queued tick events are drained and discarded.
///
/// # Usage
///
/// ```ignore
/// static EVENTS: EventQueue<EVENT_QUEUE_SIZE> = EventQueue::new();
///
/// let ornament = Ornament::new(leds, comparator, &OrnamentConfig::DEFAULT);
/// let mut scheduler = TickScheduler::new(ornament, EVENTS.receiver(), start);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_until(result.next_deadline);
/// }
/// ```
pub struct TickScheduler<'a, O: LedOutput, C: ThresholdComparator, const SIZE: usize> {
    ornament: Ornament<O, C>,
    events: EventReceiver<'a, SIZE>,
    timings: TickTimings,
    next_fine: Instant,
    next_coarse: Instant,
}

impl<'a, O: LedOutput, C: ThresholdComparator, const SIZE: usize> TickScheduler<'a, O, C, SIZE> {
    /// Create a scheduler with default timings.
    ///
    /// The first animation step is due at `start`, the first brightness
    /// measurement one coarse period later.
    pub fn new(ornament: Ornament<O, C>, events: EventReceiver<'a, SIZE>, start: Instant) -> Self {
        Self::with_timings(ornament, events, start, TickTimings::DEFAULT)
    }

    pub fn with_timings(
        ornament: Ornament<O, C>,
        events: EventReceiver<'a, SIZE>,
        start: Instant,
        timings: TickTimings,
    ) -> Self {
        Self {
            ornament,
            events,
            timings,
            next_fine: start,
            next_coarse: start + timings.coarse,
        }
    }

    /// Handle queued battery samples, then run whatever ticks are due.
    ///
    /// At most one animation step runs per call. If the scheduler has fallen
    /// more than [`MAX_FINE_DRIFT`] steps behind it resynchronises to `now`
    /// instead of catching up in a burst.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let events = self.forward_battery_samples();

        let max_drift = self.timings.fine * MAX_FINE_DRIFT;
        if now > self.next_fine + max_drift {
            self.next_fine = now;
        }

        let fine_tick = now >= self.next_fine;
        if fine_tick {
            let _ = self.ornament.fine_tick();
            self.next_fine += self.timings.fine;
        }

        let coarse_tick = now >= self.next_coarse;
        if coarse_tick {
            let _ = self.ornament.coarse_tick();
            self.next_coarse += self.timings.coarse;
            if self.next_coarse <= now {
                self.next_coarse = now + self.timings.coarse;
            }
        }

        let next_deadline = self.next_fine.min(self.next_coarse);
        let sleep_duration = next_deadline
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        TickResult {
            fine_tick,
            coarse_tick,
            events,
            next_deadline,
            sleep_duration,
        }
    }

    fn forward_battery_samples(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.pop() {
            if let OrnamentEvent::BatterySample(raw) = event {
                let _ = self.ornament.battery_sample(raw);
                handled += 1;
            }
        }
        handled
    }

    pub fn timings(&self) -> TickTimings {
        self.timings
    }

    pub fn ornament(&self) -> &Ornament<O, C> {
        &self.ornament
    }

    pub fn ornament_mut(&mut self) -> &mut Ornament<O, C> {
        &mut self.ornament
    }
}
