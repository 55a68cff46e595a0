use crate::controller::{Axis, AXIS_COUNT};

// First order rate response of one axis: `rate' = (gain * u - rate) / tau`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisPlant {
    // seconds
    pub tau: f32,
    // steady state deg/s per unit of controller output
    pub gain: f32,
    rate: f32,
}

impl AxisPlant {
    pub const fn new(tau: f32, gain: f32) -> AxisPlant {
        AxisPlant {
            tau,
            gain,
            rate: 0.0,
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn step(&mut self, output: f32, dt: f32) -> f32 {
        self.rate += (self.gain * output - self.rate) * dt / self.tau;
        self.rate
    }
}

pub struct AirframeModel {
    axes: [AxisPlant; AXIS_COUNT],
}

impl AirframeModel {
    pub fn new(roll: AxisPlant, pitch: AxisPlant, yaw: AxisPlant) -> AirframeModel {
        AirframeModel {
            axes: [roll, pitch, yaw],
        }
    }

    // gyro reading of the axis in deg/s
    pub fn rate(&self, axis: Axis) -> f32 {
        self.axes[axis.index()].rate()
    }

    pub fn step(&mut self, axis: Axis, output: f32, dt: f32) -> f32 {
        self.axes[axis.index()].step(output, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settles_at_gain_times_output() {
        let mut plant = AxisPlant::new(0.1, 0.5);
        for _ in 0..2000 {
            plant.step(100.0, 0.001);
        }
        assert!((plant.rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_one_time_constant() {
        let mut plant = AxisPlant::new(0.1, 1.0);
        for _ in 0..100 {
            plant.step(100.0, 0.001);
        }
        // 1 - e^-1 within Euler error
        assert!((plant.rate() - 63.2).abs() < 0.5);
    }

    #[test]
    fn test_axes_are_independent() {
        let mut model = AirframeModel::new(
            AxisPlant::new(0.1, 1.0),
            AxisPlant::new(0.1, 1.0),
            AxisPlant::new(0.2, 1.0),
        );
        model.step(Axis::Roll, 100.0, 0.01);
        assert!(model.rate(Axis::Roll) > 0.0);
        assert_eq!(model.rate(Axis::Pitch), 0.0);
    }
}
