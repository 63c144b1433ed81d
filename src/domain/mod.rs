// Domain layer: game values and the ports the session talks through.

pub mod model;
pub mod ports;
