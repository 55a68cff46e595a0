use wingtune::autotune::AutotuneConfig;
use wingtune::controller::pid_params::{
    BankGains, FW_ITERM_THROW_LIMIT_DEFAULT, PID_SUM_LIMIT_DEFAULT,
};
use wingtune::controller::{ControlRateProfile, PidBank, PidProfile};
use wingtune::sim::AxisPlant;

pub const PID_BANK: PidBank = PidBank {
    rate: [
        BankGains::new(5, 7, 50),
        BankGains::new(5, 7, 50),
        BankGains::new(6, 10, 60),
    ],
    level_p: 20,
};

pub const PID_PROFILE: PidProfile = PidProfile {
    pid_sum_limit: PID_SUM_LIMIT_DEFAULT,
    max_inclination_decideg: [300, 300],
    iterm_throw_limit: FW_ITERM_THROW_LIMIT_DEFAULT,
    yaw_p_lpf_hz: 30.0,
};

pub const RATE_PROFILE: ControlRateProfile = ControlRateProfile {
    rates: [20, 20, 20],
    tpa_rate: 0,
    tpa_breakpoint: 1500,
    min_throttle: 1150,
};

// bench airframe: roll overshoots with the stock FF, yaw is sluggish
pub const ROLL_PLANT: AxisPlant = AxisPlant::new(0.10, 0.9);
pub const PITCH_PLANT: AxisPlant = AxisPlant::new(0.12, 0.6);
pub const YAW_PLANT: AxisPlant = AxisPlant::new(0.25, 0.3);

// doublet amplitudes in deg/s, above 75% of each axis' max desired rate
pub const DOUBLET_AMPLITUDE_DPS: [f32; 3] = [90.0, 90.0, 180.0];

pub fn autotune_config() -> AutotuneConfig {
    AutotuneConfig::default()
}
