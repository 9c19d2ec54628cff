// Domain layer: wire models and ports (interfaces). No HTTP server or filesystem code here.

pub mod model;
pub mod ports;
