// Domain layer: models, scoring and the ports the service and views depend on.

pub mod model;
pub mod ports;
pub mod scoring;
