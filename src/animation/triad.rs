//! LED identities and triad rotation

use super::envelope::{PERIOD, duty_at};

/// Total number of LEDs on the ornament
pub const LED_COUNT: usize = 9;

/// Number of independent triads
pub const TRIAD_COUNT: usize = 3;

/// LEDs per triad
pub const TRIAD_SIZE: usize = 3;

/// LED number, 1..=9
///
/// LED `n` belongs to triad `(n - 1) % 3` and sits at rotation slot
/// `(n - 1) / 3`, giving triads {1,4,7}, {2,5,8} and {3,6,9}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedId(u8);

impl LedId {
    /// Create an id from its 1-based number
    pub const fn new(number: u8) -> Option<Self> {
        if matches!(number, 1..=9) {
            Some(Self(number))
        } else {
            None
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn from_parts(triad: usize, slot: usize) -> Self {
        Self((slot * TRIAD_COUNT + triad + 1) as u8)
    }

    /// 1-based LED number
    pub const fn number(self) -> u8 {
        self.0
    }

    /// 0-based index, handy for output arrays
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Triad this LED belongs to
    pub const fn triad(self) -> usize {
        self.index() % TRIAD_COUNT
    }

    /// Position in the triad's rotation order
    pub const fn slot(self) -> usize {
        self.index() / TRIAD_COUNT
    }

    /// All LEDs in ascending order
    pub fn all() -> impl Iterator<Item = LedId> {
        (1..=9).map(Self)
    }
}

/// On/off decision for one active LED on one fine tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedDrive {
    /// LED the decision applies to
    pub led: LedId,
    /// Drive the LED high for this tick
    pub on: bool,
    /// This tick finished the LED's breathing cycle; the next member of the
    /// triad takes over on the following tick
    pub cycle_complete: bool,
}

/// Three LEDs sharing one breathing cycle, one active at a time
#[derive(Debug, Clone)]
pub struct Triad {
    index: usize,
    active: usize,
    phases: [u16; TRIAD_SIZE],
}

impl Triad {
    /// Create a triad with its first member active at `offset`
    pub(crate) const fn new(index: usize, offset: u16) -> Self {
        let mut phases = [0; TRIAD_SIZE];
        phases[0] = offset % PERIOD;
        Self {
            index,
            active: 0,
            phases,
        }
    }

    /// Member at rotation `slot`
    pub const fn member(&self, slot: usize) -> LedId {
        LedId::from_parts(self.index, slot % TRIAD_SIZE)
    }

    /// Members in rotation order
    pub const fn members(&self) -> [LedId; TRIAD_SIZE] {
        [self.member(0), self.member(1), self.member(2)]
    }

    /// Currently animating member
    pub const fn active_led(&self) -> LedId {
        self.member(self.active)
    }

    /// One flag per member in rotation order, exactly one set
    pub fn active_flags(&self) -> [bool; TRIAD_SIZE] {
        core::array::from_fn(|slot| slot == self.active)
    }

    /// Phase counter of the member at `slot`
    pub fn phase_of(&self, slot: usize) -> u16 {
        self.phases.get(slot).copied().unwrap_or(0)
    }

    /// Compute the active member's output and move it one tick forward
    pub(crate) fn step(&mut self, amplitude: u8) -> LedDrive {
        let led = self.active_led();
        let phase = self.phases[self.active];
        let on = duty_at(phase, amplitude);

        let cycle_complete = phase >= PERIOD - 1;
        if cycle_complete {
            self.phases[self.active] = 0;
            self.active = if self.active + 1 == TRIAD_SIZE {
                0
            } else {
                self.active + 1
            };
            self.phases[self.active] = 0;
        } else {
            self.phases[self.active] = phase + 1;
        }

        LedDrive {
            led,
            on,
            cycle_complete,
        }
    }
}
