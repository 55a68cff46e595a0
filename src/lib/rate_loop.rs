use crate::autotune::{AutotuneSupervisor, RateSample, TimeMs};
use crate::controller::{Axis, RateControllers, AXIS_COUNT};

// rates in deg/s, indexed by Axis
pub fn rate_loop_tick(
    controllers: &mut RateControllers,
    tuner: &mut AutotuneSupervisor,
    rate_targets: &[f32; AXIS_COUNT],
    gyro_rates: &[f32; AXIS_COUNT],
    throttle: u16,
    now: TimeMs,
) -> [f32; AXIS_COUNT] {
    controllers.update_coefficients(throttle);

    let mut outputs = [0.0; AXIS_COUNT];
    for axis in Axis::ALL {
        let idx = axis.index();
        let out = controllers.step(axis, rate_targets[idx], gyro_rates[idx]);
        if tuner.is_active() {
            let limits = controllers.axis_limits(axis);
            let sample = RateSample {
                desired_rate: rate_targets[idx],
                reached_rate: gyro_rates[idx],
                output: out.tune_output(),
            };
            tuner.update_axis(controllers, axis, &limits, &sample, now);
        }
        outputs[idx] = out.output;
    }
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autotune::{AutotuneConfig, FlightModeFlags};
    use crate::controller::pid_params::BankGains;
    use crate::controller::{ControlRateProfile, GainStore, Gains, PidBank, PidProfile};
    use crate::sim::{AirframeModel, AxisPlant, DoubletGenerator};

    const DT: f32 = 0.001;

    fn bench(roll_ff: u16) -> (RateControllers, AutotuneSupervisor, AirframeModel) {
        let mut bank = PidBank::default();
        bank.rate[Axis::Roll.index()] = BankGains::new(5, 7, roll_ff);
        let controllers = RateControllers::new(
            bank,
            PidProfile::default(),
            ControlRateProfile::default(),
            DT,
        );
        let tuner = AutotuneSupervisor::new(AutotuneConfig::default()).unwrap();
        let airframe = AirframeModel::new(
            AxisPlant::new(0.1, 0.6),
            AxisPlant::new(0.1, 0.6),
            AxisPlant::new(0.2, 0.4),
        );
        (controllers, tuner, airframe)
    }

    fn fly(
        controllers: &mut RateControllers,
        tuner: &mut AutotuneSupervisor,
        airframe: &mut AirframeModel,
        modes: &mut FlightModeFlags,
        duration_ms: TimeMs,
    ) {
        // roll only, 90 dps is above 75% of the angle mode cap
        let doublet = DoubletGenerator::new(90.0, 500);
        for now in 0..duration_ms {
            if now % 10 == 0 {
                tuner.update_state(modes, controllers, now);
            }
            let targets = [doublet.demand(now), 0.0, 0.0];
            let gyro = Axis::ALL.map(|axis| airframe.rate(axis));
            let outputs = rate_loop_tick(controllers, tuner, &targets, &gyro, 1500, now);
            for axis in Axis::ALL {
                airframe.step(axis, outputs[axis.index()], DT);
            }
        }
    }

    #[test]
    fn test_overshooting_airframe_lowers_roll_ff() {
        let (mut controllers, mut tuner, mut airframe) = bench(100);
        let mut modes = FlightModeFlags {
            armed: true,
            autotune_requested: true,
            autotune_active: false,
        };

        fly(&mut controllers, &mut tuner, &mut airframe, &mut modes, 20_000);

        assert!(modes.autotune_active);
        let roll = controllers.gains(Axis::Roll);
        assert!(roll.d < 100.0 && roll.d >= 10.0);
        assert!(roll.i >= 1.0 && roll.i <= 50.0);
        // no stick on pitch and yaw, nothing to learn there
        let defaults = PidBank::default();
        assert_eq!(controllers.gains(Axis::Pitch), Gains::from(defaults.axis(Axis::Pitch)));
        assert_eq!(controllers.gains(Axis::Yaw), Gains::from(defaults.axis(Axis::Yaw)));
    }

    #[test]
    fn test_leaving_autotune_restores_integer_bank() {
        let (mut controllers, mut tuner, _) = bench(50);
        let before = *controllers.bank();
        let limits = controllers.axis_limits(Axis::Roll);
        let mut modes = FlightModeFlags {
            armed: true,
            autotune_requested: true,
            autotune_active: false,
        };
        tuner.update_state(&mut modes, &mut controllers, 0);

        let overshoot = RateSample {
            desired_rate: 90.0,
            reached_rate: 95.0,
            output: 100.0,
        };
        let released = RateSample::default();
        tuner.update_axis(&mut controllers, Axis::Roll, &limits, &overshoot, 10);
        assert!(tuner.update_axis(&mut controllers, Axis::Roll, &limits, &released, 160));

        // FF 50 -> 46, I 5.94 rounds to 6 in the bank
        assert_eq!(controllers.bank().axis(Axis::Roll), BankGains::new(5, 6, 46));
        assert_ne!(*controllers.bank(), before);

        modes.armed = false;
        tuner.update_state(&mut modes, &mut controllers, 1000);
        assert!(!tuner.is_active());
        assert_eq!(*controllers.bank(), before);
    }

    #[test]
    fn test_without_autotune_gains_are_untouched() {
        let (mut controllers, mut tuner, mut airframe) = bench(100);
        let mut modes = FlightModeFlags {
            armed: true,
            autotune_requested: false,
            autotune_active: false,
        };

        fly(&mut controllers, &mut tuner, &mut airframe, &mut modes, 3_000);

        assert!(!tuner.is_active());
        assert_eq!(controllers.gains(Axis::Roll).d, 100.0);
    }
}
