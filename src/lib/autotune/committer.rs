use super::TimeMs;
use crate::controller::{Axis, GainStore, Gains, AXIS_COUNT};

// Single entry point for writing tuned gains into the live controller.
// Keeps the rollback snapshot: the gains restored if the pilot leaves autotune.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainCommitter {
    saved: [Gains; AXIS_COUNT],
    last_checkpoint: TimeMs,
    save_period_ms: TimeMs,
}

impl GainCommitter {
    pub fn new(saved: [Gains; AXIS_COUNT], now: TimeMs, save_period_ms: TimeMs) -> GainCommitter {
        GainCommitter {
            saved,
            last_checkpoint: now,
            save_period_ms,
        }
    }

    pub fn saved(&self) -> &[Gains; AXIS_COUNT] {
        &self.saved
    }

    pub fn last_checkpoint(&self) -> TimeMs {
        self.last_checkpoint
    }

    pub fn push<S: GainStore>(store: &mut S, gains: &[Gains; AXIS_COUNT]) {
        for axis in Axis::ALL {
            store.set_gains(axis, gains[axis.index()]);
        }
        store.schedule_gains_update();
    }

    // Snapshot `current` once the save period has elapsed. Returns true if it did.
    pub fn checkpoint<S: GainStore>(
        &mut self,
        store: &mut S,
        current: &[Gains; AXIS_COUNT],
        now: TimeMs,
    ) -> bool {
        if now.wrapping_sub(self.last_checkpoint) < self.save_period_ms {
            return false;
        }

        // if the pilot exits autotune we restore what we are flying now
        self.saved = *current;
        Self::push(store, &self.saved);
        self.last_checkpoint = now;
        debug!("autotune checkpoint at {} ms", now);
        true
    }

    pub fn restore<S: GainStore>(&self, store: &mut S) {
        Self::push(store, &self.saved);
    }
}
