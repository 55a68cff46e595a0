use crate::config::sys_config;
use embedded_hal::PwmPin;
use wingtune::controller::AXIS_COUNT;

/*
input: controller output in [-pid_sum_limit, pid_sum_limit]
out: servo pulse width in us, centred at 1500
*/
pub fn output_to_pulse_us(output: f32, output_limit: f32) -> f32 {
    let normalized = (output / output_limit).clamp(-1.0, 1.0);
    sys_config::SERVO_CENTER_US + normalized * sys_config::SERVO_THROW_US
}

pub struct Servos<R, P, Y> {
    roll: R,
    pitch: P,
    yaw: Y,
}

impl<R, P, Y> Servos<R, P, Y>
where
    R: PwmPin<Duty = u16>,
    P: PwmPin<Duty = u16>,
    Y: PwmPin<Duty = u16>,
{
    pub fn new(roll: R, pitch: P, yaw: Y) -> Self {
        let mut servos = Self { roll, pitch, yaw };
        servos.roll.enable();
        servos.pitch.enable();
        servos.yaw.enable();
        servos.write(&[0.0; AXIS_COUNT], 1.0);
        servos
    }

    pub fn write(&mut self, outputs: &[f32; AXIS_COUNT], output_limit: f32) {
        let roll = duty(&self.roll, outputs[0], output_limit);
        self.roll.set_duty(roll);
        let pitch = duty(&self.pitch, outputs[1], output_limit);
        self.pitch.set_duty(pitch);
        let yaw = duty(&self.yaw, outputs[2], output_limit);
        self.yaw.set_duty(yaw);
    }
}

fn duty<C: PwmPin<Duty = u16>>(channel: &C, output: f32, output_limit: f32) -> u16 {
    let pulse_us = output_to_pulse_us(output, output_limit);
    let max_duty = channel.get_max_duty() as f32;
    (max_duty * pulse_us / sys_config::SERVO_FRAME_US as f32) as u16
}
