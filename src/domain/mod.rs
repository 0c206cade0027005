// Domain layer: entities, time windows and the ports the core talks through.

pub mod model;
pub mod ports;
pub mod window;
