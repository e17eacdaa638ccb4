//! HTTP server for tubemux: a thin axum layer over the core pipeline.

pub mod api;
pub mod state;
