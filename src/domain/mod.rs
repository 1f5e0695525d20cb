// Domain layer: entity model and ports (interfaces) consumed by the core.

pub mod model;
pub mod ports;
