use pid::Pid;

use super::axis::{Axis, AXIS_COUNT};
use super::pid_params::{
    BankGains, ControlRateProfile, Gains, PidBank, PidProfile, FP_PID_RATE_FF_MULTIPLIER,
    FP_PID_RATE_I_MULTIPLIER, FP_PID_RATE_P_MULTIPLIER,
};
use super::GainStore;
use crate::autotune::regime::AxisLimits;
use crate::filtering::exponential::ExponentialFilter;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RateOutput {
    pub p: f32,
    pub i: f32,
    pub ff: f32,
    pub output: f32,
}

impl RateOutput {
    // integrator excluded: only P and FF can be corrected by the tuner
    pub fn tune_output(&self) -> f32 {
        self.p + self.ff
    }
}

// Fixed-wing TPA: scale gains down above cruise throttle and up below it.
pub fn fixed_wing_tpa_factor(rates: &ControlRateProfile, throttle: u16) -> f32 {
    if rates.tpa_rate == 0 || rates.tpa_breakpoint <= rates.min_throttle {
        return 1.0;
    }
    let factor = if throttle > rates.min_throttle {
        let f = 0.5
            + (rates.tpa_breakpoint - rates.min_throttle) as f32
                / (throttle - rates.min_throttle) as f32
                / 2.0;
        f.clamp(0.5, 2.0)
    } else {
        2.0
    };
    1.0 + (factor - 1.0) * (rates.tpa_rate as f32 / 100.0)
}

struct AxisController {
    pid: Pid<f32>,
    kff: f32,
    p_filter: Option<ExponentialFilter<f32>>,
}

impl AxisController {
    fn new(profile: &PidProfile, p_filter: Option<ExponentialFilter<f32>>) -> AxisController {
        let limit = profile.pid_sum_limit;
        AxisController {
            // fixed wing has no D-term, kd stays 0
            pid: Pid::new(0.0, 0.0, 0.0, limit, profile.iterm_throw_limit, limit, limit, 0.0),
            kff: 0.0,
            p_filter,
        }
    }

    fn step(&mut self, rate_target: f32, gyro_rate: f32, sum_limit: f32) -> RateOutput {
        self.pid.setpoint = rate_target;
        let out = self.pid.next_control_output(gyro_rate);
        let p = match self.p_filter.as_mut() {
            Some(filter) => filter.update(out.p),
            None => out.p,
        };
        let ff = rate_target * self.kff;
        RateOutput {
            p,
            i: out.i,
            ff,
            output: (p + ff + out.i).clamp(-sum_limit, sum_limit),
        }
    }
}

pub struct RateControllers {
    bank: PidBank,
    profile: PidProfile,
    rates: ControlRateProfile,
    axes: [AxisController; AXIS_COUNT],
    // loop period in seconds, the pid integrator runs once per step
    dt: f32,
    gains_update_required: bool,
    prev_throttle: Option<u16>,
}

impl RateControllers {
    pub fn new(
        bank: PidBank,
        profile: PidProfile,
        rates: ControlRateProfile,
        dt: f32,
    ) -> RateControllers {
        let yaw_filter = if profile.yaw_p_lpf_hz > 0.0 {
            Some(ExponentialFilter::from_cutoff(profile.yaw_p_lpf_hz, dt))
        } else {
            None
        };
        RateControllers {
            bank,
            profile,
            rates,
            axes: [
                AxisController::new(&profile, None),
                AxisController::new(&profile, None),
                AxisController::new(&profile, yaw_filter),
            ],
            dt,
            gains_update_required: true,
            prev_throttle: None,
        }
    }

    pub fn bank(&self) -> &PidBank {
        &self.bank
    }

    pub fn profile(&self) -> &PidProfile {
        &self.profile
    }

    #[cfg(test)]
    fn kff(&self, axis: Axis) -> f32 {
        self.axes[axis.index()].kff
    }

    // Recompute controller coefficients if the bank or the throttle changed.
    pub fn update_coefficients(&mut self, throttle: u16) {
        if self.prev_throttle != Some(throttle) {
            self.prev_throttle = Some(throttle);
            self.gains_update_required = true;
        }
        if !self.gains_update_required {
            return;
        }

        let tpa = fixed_wing_tpa_factor(&self.rates, throttle);
        for axis in Axis::ALL {
            let g = self.bank.axis(axis);
            let ctrl = &mut self.axes[axis.index()];
            ctrl.pid.kp = g.p as f32 / FP_PID_RATE_P_MULTIPLIER * tpa;
            ctrl.pid.ki = g.i as f32 / FP_PID_RATE_I_MULTIPLIER * tpa * self.dt;
            ctrl.kff = g.d as f32 / FP_PID_RATE_FF_MULTIPLIER * tpa;
        }
        self.gains_update_required = false;
        debug!("rate coefficients updated, tpa {}", tpa);
    }

    pub fn step(&mut self, axis: Axis, rate_target: f32, gyro_rate: f32) -> RateOutput {
        let limit = self.profile.pid_sum_limit;
        self.axes[axis.index()].step(rate_target, gyro_rate, limit)
    }

    pub fn reset_integrators(&mut self) {
        for ctrl in self.axes.iter_mut() {
            ctrl.pid.reset_integral_term();
            if let Some(filter) = ctrl.p_filter.as_mut() {
                filter.reset();
            }
        }
    }

    pub fn axis_limits(&self, axis: Axis) -> AxisLimits {
        AxisLimits::new(axis, &self.profile, &self.rates, self.bank.level_p)
    }
}

impl GainStore for RateControllers {
    fn gains(&self, axis: Axis) -> Gains {
        self.bank.axis(axis).into()
    }

    fn set_gains(&mut self, axis: Axis, gains: Gains) {
        *self.bank.axis_mut(axis) = BankGains::from(gains);
    }

    fn schedule_gains_update(&mut self) {
        self.gains_update_required = true;
    }
}
