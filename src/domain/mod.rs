// Domain layer: remote resource records and the seams the client is built on.

pub mod model;
pub mod ports;
