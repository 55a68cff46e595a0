use crate::autotune::TimeMs;

// Repeating stick pattern: +amplitude, centred, -amplitude, centred, each held for
// `hold_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoubletGenerator {
    pub amplitude: f32,
    pub hold_ms: TimeMs,
}

impl DoubletGenerator {
    pub const fn new(amplitude: f32, hold_ms: TimeMs) -> DoubletGenerator {
        DoubletGenerator { amplitude, hold_ms }
    }

    // commanded rate in deg/s at `now`
    pub fn demand(&self, now: TimeMs) -> f32 {
        if self.hold_ms == 0 {
            return 0.0;
        }
        match (now / self.hold_ms) % 4 {
            0 => self.amplitude,
            2 => -self.amplitude,
            _ => 0.0,
        }
    }
}
