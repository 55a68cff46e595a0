use super::error::ConfigError;
use super::TimeMs;

// when we turn off autotune we restore gains saved at most this long ago
pub const AUTOTUNE_SAVE_PERIOD_MS: TimeMs = 5000;

pub const AUTOTUNE_FIXED_WING_OVERSHOOT_TIME_MS: TimeMs = 100;
pub const AUTOTUNE_FIXED_WING_UNDERSHOOT_TIME_MS: TimeMs = 200;
pub const AUTOTUNE_FIXED_WING_DECREASE_STEP_PCT: f32 = 8.0;
pub const AUTOTUNE_FIXED_WING_INCREASE_STEP_PCT: f32 = 5.0;
pub const AUTOTUNE_FIXED_WING_MIN_FF: f32 = 10.0;
pub const AUTOTUNE_FIXED_WING_MAX_FF: f32 = 200.0;

// decisions are only made while demanding at least this share of the max rate
pub const AUTOTUNE_DEMAND_THRESHOLD: f32 = 0.75;

pub const AUTOTUNE_P_TO_FF_RATIO: f32 = 0.1;
pub const AUTOTUNE_MIN_I: f32 = 1.0;
pub const AUTOTUNE_MAX_I: f32 = 50.0;
// time for the integrator to match the FF response, in seconds
pub const AUTOTUNE_I_RESPONSE_TIME_S: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutotuneConfig {
    pub save_period_ms: TimeMs,
    pub overshoot_time_ms: TimeMs,
    pub undershoot_time_ms: TimeMs,
    pub decrease_step_pct: f32,
    pub increase_step_pct: f32,
    pub min_ff: f32,
    pub max_ff: f32,
    pub demand_threshold: f32,
    pub p_to_ff_ratio: f32,
    pub min_i: f32,
    pub max_i: f32,
    pub i_response_time_s: f32,
}

impl AutotuneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.save_period_ms == 0 {
            return Err(ConfigError::ZeroSavePeriod);
        }
        if self.min_ff <= 0.0 || self.min_ff > self.max_ff {
            return Err(ConfigError::FfBounds);
        }
        if self.min_i <= 0.0 || self.min_i > self.max_i {
            return Err(ConfigError::IBounds);
        }
        if self.decrease_step_pct <= 0.0
            || self.decrease_step_pct >= 100.0
            || self.increase_step_pct <= 0.0
        {
            return Err(ConfigError::StepSize);
        }
        if self.demand_threshold <= 0.0 || self.demand_threshold > 1.0 {
            return Err(ConfigError::DemandThreshold);
        }
        if self.p_to_ff_ratio <= 0.0 || self.i_response_time_s <= 0.0 {
            return Err(ConfigError::GainRatio);
        }
        Ok(())
    }
}

impl Default for AutotuneConfig {
    fn default() -> AutotuneConfig {
        AutotuneConfig {
            save_period_ms: AUTOTUNE_SAVE_PERIOD_MS,
            overshoot_time_ms: AUTOTUNE_FIXED_WING_OVERSHOOT_TIME_MS,
            undershoot_time_ms: AUTOTUNE_FIXED_WING_UNDERSHOOT_TIME_MS,
            decrease_step_pct: AUTOTUNE_FIXED_WING_DECREASE_STEP_PCT,
            increase_step_pct: AUTOTUNE_FIXED_WING_INCREASE_STEP_PCT,
            min_ff: AUTOTUNE_FIXED_WING_MIN_FF,
            max_ff: AUTOTUNE_FIXED_WING_MAX_FF,
            demand_threshold: AUTOTUNE_DEMAND_THRESHOLD,
            p_to_ff_ratio: AUTOTUNE_P_TO_FF_RATIO,
            min_i: AUTOTUNE_MIN_I,
            max_i: AUTOTUNE_MAX_I,
            i_response_time_s: AUTOTUNE_I_RESPONSE_TIME_S,
        }
    }
}
