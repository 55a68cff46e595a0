pub const AXIS_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    Roll = 0,
    Pitch = 1,
    Yaw = 2,
}

impl Axis {
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::Roll, Axis::Pitch, Axis::Yaw];

    pub fn index(self) -> usize {
        self as usize
    }

    // roll and pitch are limited by the angle mode inclination, yaw is not
    pub fn has_angle_limit(self) -> bool {
        matches!(self, Axis::Roll | Axis::Pitch)
    }
}
