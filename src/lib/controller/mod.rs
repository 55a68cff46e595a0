pub mod axis;
pub mod pid_params;
pub mod rate;

pub use axis::{Axis, AXIS_COUNT};
pub use pid_params::{ControlRateProfile, Gains, PidBank, PidProfile};
pub use rate::{RateControllers, RateOutput};

// written gains take effect after schedule_gains_update
pub trait GainStore {
    fn gains(&self, axis: Axis) -> Gains;
    fn set_gains(&mut self, axis: Axis, gains: Gains);
    fn schedule_gains_update(&mut self);
}
