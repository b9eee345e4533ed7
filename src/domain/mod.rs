// Domain layer: item and test-case models plus the attribute provider port.

pub mod model;
pub mod ports;
