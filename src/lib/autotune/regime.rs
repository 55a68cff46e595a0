use crate::controller::pid_params::{
    ControlRateProfile, PidProfile, FP_PID_LEVEL_P_MULTIPLIER,
};
use crate::controller::Axis;
use libm::{fabsf, fminf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Regime {
    TooLow,
    Undershoot,
    Overshoot,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLimits {
    pub max_desired_rate: f32,
    // |P + FF| at or above this counts as saturated
    pub output_limit: f32,
}

impl AxisLimits {
    pub fn new(
        axis: Axis,
        profile: &PidProfile,
        rates: &ControlRateProfile,
        level_p: u16,
    ) -> AxisLimits {
        let mut max_desired_rate = rates.max_rate_dps(axis);

        // In ANGLE the largest reasonable error is the full inclination (a control singlet),
        // so pitch and roll can't be asked for more than inclination * level P.
        if let Some(inclination_deg) = profile.max_inclination_deg(axis) {
            let angle_mode_rate = inclination_deg * level_p as f32 / FP_PID_LEVEL_P_MULTIPLIER;
            max_desired_rate = fminf(max_desired_rate, angle_mode_rate);
        }

        AxisLimits {
            max_desired_rate,
            output_limit: profile.pid_sum_limit,
        }
    }
}

pub fn classify(
    desired_rate: f32,
    reached_rate: f32,
    max_desired_rate: f32,
    demand_threshold: f32,
) -> Regime {
    let abs_desired = fabsf(desired_rate);
    if abs_desired < demand_threshold * max_desired_rate {
        Regime::TooLow
    } else if fabsf(reached_rate) > abs_desired {
        Regime::Overshoot
    } else {
        Regime::Undershoot
    }
}

pub fn is_saturated(output: f32, output_limit: f32) -> bool {
    fabsf(output) >= output_limit
}
