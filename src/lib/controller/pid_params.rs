use super::axis::{Axis, AXIS_COUNT};
use libm::rintf;

// scale between stored integer gains and controller coefficients
pub const FP_PID_RATE_P_MULTIPLIER: f32 = 31.0;
pub const FP_PID_RATE_I_MULTIPLIER: f32 = 4.0;
pub const FP_PID_RATE_FF_MULTIPLIER: f32 = 31.0;
// level P is [1/s], angle error is [deg]
pub const FP_PID_LEVEL_P_MULTIPLIER: f32 = 6.56;

pub const PID_SUM_LIMIT_DEFAULT: f32 = 500.0;
pub const FW_ITERM_THROW_LIMIT_DEFAULT: f32 = 165.0;

// Working gain triple. `d` is the feed-forward gain on fixed wing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gains {
    pub p: f32,
    pub i: f32,
    pub d: f32,
}

impl Gains {
    pub const fn new(p: f32, i: f32, d: f32) -> Gains {
        Gains { p, i, d }
    }
}

// Gains as stored in the bank: whole numbers, like the configurator shows them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BankGains {
    pub p: u16,
    pub i: u16,
    pub d: u16,
}

impl BankGains {
    pub const fn new(p: u16, i: u16, d: u16) -> BankGains {
        BankGains { p, i, d }
    }
}

impl From<BankGains> for Gains {
    fn from(g: BankGains) -> Gains {
        Gains {
            p: g.p as f32,
            i: g.i as f32,
            d: g.d as f32,
        }
    }
}

impl From<Gains> for BankGains {
    fn from(g: Gains) -> BankGains {
        // float to int casts saturate, negative gains end up as 0
        BankGains {
            p: rintf(g.p) as u16,
            i: rintf(g.i) as u16,
            d: rintf(g.d) as u16,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PidBank {
    pub rate: [BankGains; AXIS_COUNT],
    // self-level strength, used to derive the angle mode rate cap
    pub level_p: u16,
}

impl PidBank {
    pub fn axis(&self, axis: Axis) -> BankGains {
        self.rate[axis.index()]
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut BankGains {
        &mut self.rate[axis.index()]
    }
}

impl Default for PidBank {
    fn default() -> PidBank {
        PidBank {
            rate: [
                BankGains::new(5, 7, 50),
                BankGains::new(5, 7, 50),
                BankGains::new(6, 10, 60),
            ],
            level_p: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PidProfile {
    pub pid_sum_limit: f32,
    // roll and pitch only, in decidegrees
    pub max_inclination_decideg: [u16; 2],
    pub iterm_throw_limit: f32,
    // 0 disables the yaw P-term filter
    pub yaw_p_lpf_hz: f32,
}

impl PidProfile {
    pub fn max_inclination_deg(&self, axis: Axis) -> Option<f32> {
        if axis.has_angle_limit() {
            Some(self.max_inclination_decideg[axis.index()] as f32 / 10.0)
        } else {
            None
        }
    }
}

impl Default for PidProfile {
    fn default() -> PidProfile {
        PidProfile {
            pid_sum_limit: PID_SUM_LIMIT_DEFAULT,
            max_inclination_decideg: [300, 300],
            iterm_throw_limit: FW_ITERM_THROW_LIMIT_DEFAULT,
            yaw_p_lpf_hz: 30.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlRateProfile {
    // full stick rate in tens of deg/s, 20 means 200 dps
    pub rates: [u8; AXIS_COUNT],
    // percent of TPA curve applied, 0 disables TPA
    pub tpa_rate: u8,
    // cruise throttle the gains were tuned at
    pub tpa_breakpoint: u16,
    pub min_throttle: u16,
}

impl ControlRateProfile {
    pub fn max_rate_dps(&self, axis: Axis) -> f32 {
        self.rates[axis.index()] as f32 * 10.0
    }
}

impl Default for ControlRateProfile {
    fn default() -> ControlRateProfile {
        ControlRateProfile {
            rates: [20, 20, 20],
            tpa_rate: 0,
            tpa_breakpoint: 1500,
            min_throttle: 1150,
        }
    }
}
