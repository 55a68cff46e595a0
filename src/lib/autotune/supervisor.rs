use super::axis_state::AxisTuneState;
use super::committer::GainCommitter;
use super::config::AutotuneConfig;
use super::error::ConfigError;
use super::modes::ModeSource;
use super::policy;
use super::regime::{self, AxisLimits};
use super::TimeMs;
use crate::controller::{Axis, GainStore, Gains, AXIS_COUNT};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RateSample {
    pub desired_rate: f32,
    pub reached_rate: f32,
    // P + FF, integrator excluded
    pub output: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TuningSession {
    axes: [AxisTuneState; AXIS_COUNT],
    committer: GainCommitter,
}

impl TuningSession {
    fn start<S: GainStore>(store: &S, config: &AutotuneConfig, now: TimeMs) -> TuningSession {
        let axes = Axis::ALL.map(|axis| AxisTuneState::new(store.gains(axis), now));
        let baseline = axes.map(|state| state.gains);
        TuningSession {
            axes,
            committer: GainCommitter::new(baseline, now, config.save_period_ms),
        }
    }

    pub fn axis(&self, axis: Axis) -> &AxisTuneState {
        &self.axes[axis.index()]
    }

    pub fn committer(&self) -> &GainCommitter {
        &self.committer
    }

    pub fn working_gains(&self) -> [Gains; AXIS_COUNT] {
        self.axes.map(|state| state.gains)
    }

    fn update_axis<S: GainStore>(
        &mut self,
        config: &AutotuneConfig,
        store: &mut S,
        axis: Axis,
        limits: &AxisLimits,
        sample: &RateSample,
        now: TimeMs,
    ) -> bool {
        let state = &mut self.axes[axis.index()];

        if regime::is_saturated(sample.output, limits.output_limit) {
            state.mark_saturated();
        }

        let new_regime = regime::classify(
            sample.desired_rate,
            sample.reached_rate,
            limits.max_desired_rate,
            config.demand_threshold,
        );
        let left = state.regime;
        if !policy::apply_transition(config, state, new_regime, now) {
            return false;
        }

        info!(
            "autotune {} left {}: FF {} P {} I {}",
            axis,
            left,
            state.gains.d,
            state.gains.p,
            state.gains.i
        );
        GainCommitter::push(store, &self.working_gains());
        true
    }
}

pub struct AutotuneSupervisor {
    config: AutotuneConfig,
    session: Option<TuningSession>,
}

impl AutotuneSupervisor {
    pub fn new(config: AutotuneConfig) -> Result<AutotuneSupervisor, ConfigError> {
        config.validate()?;
        Ok(AutotuneSupervisor {
            config,
            session: None,
        })
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&TuningSession> {
        self.session.as_ref()
    }

    // Run once per supervisor cycle.
    pub fn update_state<M, S>(&mut self, modes: &mut M, store: &mut S, now: TimeMs)
    where
        M: ModeSource,
        S: GainStore,
    {
        if modes.autotune_requested() && modes.armed() {
            if let Some(session) = self.session.as_mut() {
                let current = session.working_gains();
                session.committer.checkpoint(store, &current, now);
            } else {
                self.session = Some(TuningSession::start(store, &self.config, now));
                modes.set_autotune_active(true);
                info!("autotune started at {} ms", now);
            }
        } else {
            if let Some(session) = self.session.take() {
                // drop anything tuned since the last checkpoint
                session.committer.restore(store);
                info!("autotune stopped at {} ms", now);
            }
            modes.set_autotune_active(false);
        }
    }

    // Run once per control tick for each axis. No-op without an active session.
    // Returns true if the axis gains changed and were pushed.
    pub fn update_axis<S: GainStore>(
        &mut self,
        store: &mut S,
        axis: Axis,
        limits: &AxisLimits,
        sample: &RateSample,
        now: TimeMs,
    ) -> bool {
        match self.session.as_mut() {
            Some(session) => session.update_axis(&self.config, store, axis, limits, sample, now),
            None => false,
        }
    }
}
