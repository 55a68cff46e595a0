use crate::app::{monotonics, supervisor_task};
use crate::config::sys_config;
use rtic::mutex_prelude::*;
use systick_monotonic::fugit::Duration;
use wingtune::autotune::TimeMs;

fn switch_on<P>(pin: &P) -> bool
where
    P: embedded_hal::digital::v2::InputPin,
{
    pin.is_high().unwrap_or(false)
}

pub fn supervisor_task(cx: supervisor_task::Context) {
    let now = monotonics::now().ticks() as TimeMs;
    let modes = cx.local.modes;
    modes.armed = switch_on(&*cx.local.arm_switch);
    modes.autotune_requested = switch_on(&*cx.local.autotune_switch);

    (cx.shared.controllers, cx.shared.tuner).lock(|controllers, tuner| {
        tuner.update_state(modes, controllers, now);
        if !modes.armed {
            controllers.reset_integrators();
        }
    });

    if modes.autotune_active {
        cx.local.status_led.set_high();
    } else {
        cx.local.status_led.set_low();
    }

    // Run at 100Hz
    supervisor_task::spawn_after(Duration::<u64, 1, 1000>::millis(
        sys_config::SUPERVISOR_PERIOD_MS,
    ))
    .unwrap();
}
