// Domain layer: quiz models and ports (interfaces). No knowledge of any concrete data store.

pub mod model;
pub mod ports;
