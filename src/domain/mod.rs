// Domain layer: entities and ports. No dependencies beyond std/serde/chrono.

pub mod model;
pub mod ports;
