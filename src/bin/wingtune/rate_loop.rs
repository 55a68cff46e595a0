use crate::app::{monotonics, rate_loop};
use crate::config::sys_config;
use rtic::mutex_prelude::*;
use systick_monotonic::fugit::Duration;
use wingtune::autotune::TimeMs;
use wingtune::controller::Axis;
use wingtune::rate_loop::rate_loop_tick;

pub fn rate_loop(cx: rate_loop::Context) {
    let now = monotonics::now().ticks() as TimeMs;
    let doublets = cx.local.doublets;
    let airframe = cx.local.airframe;

    let targets = Axis::ALL.map(|axis| doublets[axis.index()].demand(now));
    let gyro = Axis::ALL.map(|axis| airframe.rate(axis));

    let mut output_limit = 0.0;
    let outputs = (cx.shared.controllers, cx.shared.tuner).lock(|controllers, tuner| {
        output_limit = controllers.profile().pid_sum_limit;
        rate_loop_tick(
            controllers,
            tuner,
            &targets,
            &gyro,
            sys_config::BENCH_THROTTLE,
            now,
        )
    });

    for axis in Axis::ALL {
        airframe.step(axis, outputs[axis.index()], sys_config::RATE_LOOP_DT_S);
    }
    cx.local.servos.write(&outputs, output_limit);

    // run at 1 kHz
    rate_loop::spawn_after(Duration::<u64, 1, 1000>::millis(
        sys_config::RATE_LOOP_PERIOD_MS,
    ))
    .unwrap();
}
