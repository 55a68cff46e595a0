use wingtune::autotune::TimeMs;

pub const SYSCLK_HZ: u32 = 48_000_000;
pub const UART_BAUD: u32 = 115_200;

pub const RATE_LOOP_PERIOD_MS: u64 = 1;
pub const SUPERVISOR_PERIOD_MS: u64 = 10;
pub const RATE_LOOP_DT_S: f32 = 0.001;
// wait for the servos to centre before flying the bench
pub const STARTUP_DELAY_MS: u64 = 1000;

// bench runs at cruise throttle, no TPA attenuation
pub const BENCH_THROTTLE: u16 = 1500;

pub const SERVO_PWM_HZ: u32 = 50;
pub const SERVO_FRAME_US: u32 = 20_000;
pub const SERVO_CENTER_US: f32 = 1_500.0;
// pulse width change for a full controller output
pub const SERVO_THROW_US: f32 = 500.0;

pub const DOUBLET_HOLD_MS: TimeMs = 500;
