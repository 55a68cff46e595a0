use super::regime::Regime;
use super::TimeMs;
use crate::controller::Gains;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisTuneState {
    pub regime: Regime,
    pub regime_entered_at: TimeMs,
    // output hit the limit at least once since the regime was entered
    pub saturated: bool,
    pub gains: Gains,
}

impl AxisTuneState {
    pub fn new(gains: Gains, now: TimeMs) -> AxisTuneState {
        AxisTuneState {
            regime: Regime::TooLow,
            regime_entered_at: now,
            saturated: false,
            gains,
        }
    }

    pub fn time_in_regime(&self, now: TimeMs) -> TimeMs {
        now.wrapping_sub(self.regime_entered_at)
    }

    pub fn mark_saturated(&mut self) {
        self.saturated = true;
    }

    pub fn enter(&mut self, regime: Regime, now: TimeMs) {
        self.regime = regime;
        self.regime_entered_at = now;
        self.saturated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_resets_saturation() {
        let mut state = AxisTuneState::new(Gains::new(5.0, 7.0, 50.0), 1000);
        assert_eq!(state.regime, Regime::TooLow);

        state.mark_saturated();
        assert_eq!(state.time_in_regime(1250), 250);

        state.enter(Regime::Overshoot, 1250);
        assert!(!state.saturated);
        assert_eq!(state.regime_entered_at, 1250);
        assert_eq!(state.time_in_regime(1250), 0);
    }

    #[test]
    fn test_time_in_regime_across_wrap() {
        let state = AxisTuneState::new(Gains::default(), u32::MAX - 49);
        assert_eq!(state.time_in_regime(50), 100);
    }
}
