pub mod airframe;
pub mod doublet;

pub use airframe::{AirframeModel, AxisPlant};
pub use doublet::DoubletGenerator;
