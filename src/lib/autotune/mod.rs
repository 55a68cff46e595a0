pub mod axis_state;
pub mod committer;
pub mod config;
pub mod error;
pub mod modes;
pub mod policy;
pub mod regime;
pub mod supervisor;

pub use axis_state::AxisTuneState;
pub use committer::GainCommitter;
pub use config::AutotuneConfig;
pub use error::ConfigError;
pub use modes::{FlightModeFlags, ModeSource};
pub use regime::{AxisLimits, Regime};
pub use supervisor::{AutotuneSupervisor, RateSample, TuningSession};

// Milliseconds since boot, wraps after ~49 days.
pub type TimeMs = u32;
