// Domain layer: models, column definitions and ports (interfaces).

pub mod model;
pub mod ports;
pub mod schema;
