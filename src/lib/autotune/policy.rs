use super::axis_state::AxisTuneState;
use super::config::AutotuneConfig;
use super::regime::Regime;
use super::TimeMs;
use crate::controller::pid_params::{FP_PID_RATE_FF_MULTIPLIER, FP_PID_RATE_I_MULTIPLIER};
use crate::controller::Gains;

// New FF gain when leaving `left` after `elapsed` ms, or `None` to keep the gains.
pub fn next_ff_gain(
    config: &AutotuneConfig,
    left: Regime,
    elapsed: TimeMs,
    saturated: bool,
    ff: f32,
) -> Option<f32> {
    match left {
        Regime::TooLow => None,
        Regime::Overshoot => {
            if elapsed >= config.overshoot_time_ms {
                let ff = ff * (100.0 - config.decrease_step_pct) / 100.0;
                Some(if ff < config.min_ff { config.min_ff } else { ff })
            } else {
                None
            }
        }
        Regime::Undershoot => {
            // if P+FF already saturated the output, more gain can't help
            if elapsed >= config.undershoot_time_ms && !saturated {
                let ff = ff * (100.0 + config.increase_step_pct) / 100.0;
                Some(if ff > config.max_ff { config.max_ff } else { ff })
            } else {
                None
            }
        }
    }
}

pub fn derive_gains(config: &AutotuneConfig, ff: f32) -> Gains {
    // TODO: the P/FF ratio is empirical and aggressive, find the optimum
    let p = ff * config.p_to_ff_ratio;

    // integrator reaches the same response as FF within the response time
    let i = ff / FP_PID_RATE_FF_MULTIPLIER * config.i_response_time_s * FP_PID_RATE_I_MULTIPLIER;

    Gains {
        p,
        i: i.clamp(config.min_i, config.max_i),
        d: ff,
    }
}

// Handles a regime change of one axis. Returns true if its gains changed.
pub fn apply_transition(
    config: &AutotuneConfig,
    state: &mut AxisTuneState,
    new_regime: Regime,
    now: TimeMs,
) -> bool {
    if new_regime == state.regime {
        return false;
    }

    let elapsed = state.time_in_regime(now);
    let mut updated = false;
    if let Some(ff) = next_ff_gain(config, state.regime, elapsed, state.saturated, state.gains.d)
    {
        state.gains = derive_gains(config, ff);
        updated = true;
    }

    // change state and reset saturation
    state.enter(new_regime, now);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_in(regime: Regime, d: f32, entered_at: TimeMs) -> AxisTuneState {
        let mut state = AxisTuneState::new(Gains::new(d * 0.1, 10.0, d), 0);
        state.enter(regime, entered_at);
        state
    }

    #[test]
    fn test_leaving_overshoot_decreases_ff() {
        let config = AutotuneConfig::default();
        let mut state = state_in(Regime::Overshoot, 100.0, 1000);

        assert!(apply_transition(&config, &mut state, Regime::TooLow, 1150));
        assert!((state.gains.d - 92.0).abs() < 1e-4);
        assert!((state.gains.p - 9.2).abs() < 1e-4);
        assert!((state.gains.i - 92.0 / 31.0 * 4.0).abs() < 1e-4);
        assert!(state.gains.i >= 1.0 && state.gains.i <= 50.0);
        assert_eq!(state.regime, Regime::TooLow);
        assert_eq!(state.regime_entered_at, 1150);
    }

    #[test]
    fn test_short_overshoot_keeps_gains() {
        let config = AutotuneConfig::default();
        let mut state = state_in(Regime::Overshoot, 100.0, 1000);
        let before = state.gains;

        assert!(!apply_transition(&config, &mut state, Regime::Undershoot, 1099));
        assert_eq!(state.gains, before);
        assert_eq!(state.regime, Regime::Undershoot);

        // exactly at the threshold counts
        let mut state = state_in(Regime::Overshoot, 100.0, 1000);
        assert!(apply_transition(&config, &mut state, Regime::Undershoot, 1100));
    }

    #[test]
    fn test_leaving_undershoot_increases_ff() {
        let config = AutotuneConfig::default();
        let mut state = state_in(Regime::Undershoot, 100.0, 0);

        assert!(apply_transition(&config, &mut state, Regime::Overshoot, 200));
        assert!((state.gains.d - 105.0).abs() < 1e-4);
        assert!((state.gains.p - 10.5).abs() < 1e-4);
    }

    #[test]
    fn test_ff_capped_at_max() {
        let config = AutotuneConfig::default();
        let mut state = state_in(Regime::Undershoot, 195.0, 0);

        assert!(apply_transition(&config, &mut state, Regime::TooLow, 250));
        assert_eq!(state.gains.d, 200.0);
        assert!((state.gains.p - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_ff_floored_at_min() {
        let config = AutotuneConfig::default();
        let mut state = state_in(Regime::Overshoot, 10.5, 0);

        assert!(apply_transition(&config, &mut state, Regime::TooLow, 500));
        assert_eq!(state.gains.d, 10.0);
        assert_eq!(state.gains.i, (10.0f32 / 31.0 * 4.0).clamp(1.0, 50.0));
    }

    #[test]
    fn test_saturated_or_short_undershoot_keeps_gains() {
        let config = AutotuneConfig::default();

        let mut state = state_in(Regime::Undershoot, 100.0, 0);
        state.mark_saturated();
        assert!(!apply_transition(&config, &mut state, Regime::Overshoot, 1000));
        assert_eq!(state.gains.d, 100.0);
        assert!(!state.saturated);

        let mut state = state_in(Regime::Undershoot, 100.0, 0);
        assert!(!apply_transition(&config, &mut state, Regime::Overshoot, 199));
        assert_eq!(state.gains.d, 100.0);
    }

    #[test]
    fn test_leaving_too_low_never_changes_gains() {
        let config = AutotuneConfig::default();
        let mut state = state_in(Regime::TooLow, 100.0, 0);

        assert!(!apply_transition(&config, &mut state, Regime::Overshoot, 60_000));
        assert_eq!(state.gains.d, 100.0);
        assert_eq!(state.regime, Regime::Overshoot);
    }

    #[test]
    fn test_same_regime_is_not_a_transition() {
        let config = AutotuneConfig::default();
        let mut state = state_in(Regime::Overshoot, 100.0, 0);
        state.mark_saturated();

        assert!(!apply_transition(&config, &mut state, Regime::Overshoot, 5000));
        assert_eq!(state.regime_entered_at, 0);
        assert!(state.saturated);
        assert_eq!(state.gains.d, 100.0);
    }

    #[test]
    fn test_i_gain_clamped() {
        let config = AutotuneConfig::default();
        // a huge FF would push I past the limit
        assert_eq!(derive_gains(&config, 1000.0).i, 50.0);
        assert_eq!(derive_gains(&config, 1.0).i, 1.0);
    }

    #[test]
    fn test_ff_stays_in_bounds_for_any_sequence() {
        let config = AutotuneConfig::default();
        let mut state = state_in(Regime::TooLow, 50.0, 0);
        let sequence = [
            Regime::Overshoot,
            Regime::TooLow,
            Regime::Undershoot,
            Regime::Overshoot,
            Regime::Undershoot,
        ];
        let mut now: TimeMs = 0;
        for n in 0..400 {
            now += 250;
            apply_transition(&config, &mut state, sequence[n % sequence.len()], now);
            assert!(state.gains.d >= 10.0 && state.gains.d <= 200.0);
            assert!(state.gains.i >= 1.0 && state.gains.i <= 50.0);
        }
    }
}
