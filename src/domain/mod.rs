// Domain layer: request/result models and the ports the service depends on.

pub mod model;
pub mod parser;
pub mod ports;
