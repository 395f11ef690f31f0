// Domain layer: run data model and ports (interfaces).

pub mod model;
pub mod ports;
