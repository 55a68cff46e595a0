#![no_main]
#![no_std]

mod config;
mod rate_loop;
mod servo;
mod supervisor;

#[cfg(feature = "defmt")]
use defmt_rtt as _;

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [SPI1, SPI2])]
mod app {
    use crate::config::{sys_config, tuning};
    use crate::rate_loop::rate_loop;
    use crate::servo::Servos;
    use crate::supervisor::supervisor_task;
    use core::fmt::Write;
    use cortex_m::asm;
    use panic_write::PanicHandler;
    use stm32f4xx_hal::{
        gpio::{Input, Output, Pin, PushPull},
        pac::{TIM1, USART2},
        prelude::*,
        serial::{Config, Serial, Tx},
        timer::pwm::PwmChannel,
    };
    use systick_monotonic::{fugit::Duration, Systick};
    use wingtune::autotune::{AutotuneSupervisor, FlightModeFlags};
    use wingtune::controller::RateControllers;
    use wingtune::sim::{AirframeModel, DoubletGenerator};

    #[shared]
    struct Shared {
        controllers: RateControllers,
        tuner: AutotuneSupervisor,
    }

    #[local]
    struct Local {
        tx: core::pin::Pin<panic_write::PanicHandler<Tx<USART2>>>,
        airframe: AirframeModel,
        doublets: [DoubletGenerator; 3],
        servos: Servos<PwmChannel<TIM1, 0>, PwmChannel<TIM1, 1>, PwmChannel<TIM1, 2>>,
        modes: FlightModeFlags,
        arm_switch: Pin<'B', 0, Input>,
        autotune_switch: Pin<'B', 1, Input>,
        status_led: Pin<'A', 5, Output<PushPull>>,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<1000>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        // configure clocks
        let rcc = ctx.device.RCC.constrain();
        let mono = Systick::new(ctx.core.SYST, sys_config::SYSCLK_HZ);
        let clocks = rcc.cfgr.sysclk(sys_config::SYSCLK_HZ.Hz()).freeze();

        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();

        // set up uart tx
        let tx_pin = gpioa.pa2.into_alternate();
        let serial = Serial::tx(
            ctx.device.USART2,
            tx_pin,
            Config::default()
                .baudrate(sys_config::UART_BAUD.bps())
                .wordlength_8()
                .parity_none(),
            &clocks,
        )
        .unwrap();
        let mut tx = PanicHandler::new(serial);

        // aileron, elevator, rudder
        let channels = (
            gpioa.pa8.into_alternate(),
            gpioa.pa9.into_alternate(),
            gpioa.pa10.into_alternate(),
        );
        let (roll_pwm, pitch_pwm, yaw_pwm) = ctx
            .device
            .TIM1
            .pwm_hz(channels, sys_config::SERVO_PWM_HZ.Hz(), &clocks)
            .split();
        let servos = Servos::new(roll_pwm, pitch_pwm, yaw_pwm);

        // switches pull the pin high when on
        let arm_switch = gpiob.pb0.into_pull_down_input();
        let autotune_switch = gpiob.pb1.into_pull_down_input();
        let status_led = gpioa.pa5.into_push_pull_output();

        let tuner = match AutotuneSupervisor::new(tuning::autotune_config()) {
            Ok(tuner) => tuner,
            Err(e) => {
                writeln!(tx, "invalid autotune config: {}\r", e).unwrap();
                panic!("autotune config rejected");
            }
        };
        let controllers = RateControllers::new(
            tuning::PID_BANK,
            tuning::PID_PROFILE,
            tuning::RATE_PROFILE,
            sys_config::RATE_LOOP_DT_S,
        );

        let airframe = AirframeModel::new(
            tuning::ROLL_PLANT,
            tuning::PITCH_PLANT,
            tuning::YAW_PLANT,
        );
        let doublets = tuning::DOUBLET_AMPLITUDE_DPS
            .map(|amplitude| DoubletGenerator::new(amplitude, sys_config::DOUBLET_HOLD_MS));

        writeln!(tx, "system initialized\r").unwrap();

        rate_loop::spawn_after(Duration::<u64, 1, 1000>::millis(
            sys_config::STARTUP_DELAY_MS,
        ))
        .unwrap();
        supervisor_task::spawn_after(Duration::<u64, 1, 1000>::millis(
            sys_config::STARTUP_DELAY_MS,
        ))
        .unwrap();

        (
            Shared { controllers, tuner },
            Local {
                tx,
                airframe,
                doublets,
                servos,
                modes: FlightModeFlags::default(),
                arm_switch,
                autotune_switch,
                status_led,
            },
            init::Monotonics(mono),
        )
    }

    extern "Rust" {
        #[task(priority = 2, local = [airframe, doublets, servos], shared = [controllers, tuner])]
        fn rate_loop(cx: rate_loop::Context);

        #[task(priority = 1, local = [modes, arm_switch, autotune_switch, status_led], shared = [controllers, tuner])]
        fn supervisor_task(cx: supervisor_task::Context);
    }

    #[idle(local = [tx])]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            asm::nop();
        }
    }
}
