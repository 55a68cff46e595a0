pub trait ModeSource {
    fn armed(&self) -> bool;
    fn autotune_requested(&self) -> bool;
    fn set_autotune_active(&mut self, active: bool);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlightModeFlags {
    pub armed: bool,
    pub autotune_requested: bool,
    pub autotune_active: bool,
}

impl ModeSource for FlightModeFlags {
    fn armed(&self) -> bool {
        self.armed
    }

    fn autotune_requested(&self) -> bool {
        self.autotune_requested
    }

    fn set_autotune_active(&mut self, active: bool) {
        self.autotune_active = active;
    }
}
