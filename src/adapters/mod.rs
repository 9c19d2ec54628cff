// Adapters layer: concrete implementations for external systems (storage backends, HTTP server).

pub mod http;
pub mod storage;
