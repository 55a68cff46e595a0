// Error codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ZeroSavePeriod,
    FfBounds,
    IBounds,
    StepSize,
    DemandThreshold,
    GainRatio,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ConfigError::ZeroSavePeriod => "save period must be non-zero",
            ConfigError::FfBounds => "FF bounds must satisfy 0 < min <= max",
            ConfigError::IBounds => "I bounds must satisfy 0 < min <= max",
            ConfigError::StepSize => "gain steps must be positive and decrease below 100%",
            ConfigError::DemandThreshold => "demand threshold must be in (0, 1]",
            ConfigError::GainRatio => "P ratio and I response time must be positive",
        };
        f.write_str(msg)
    }
}
