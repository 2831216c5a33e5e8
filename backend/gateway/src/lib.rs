//! medrelay Gateway HTTP API Server
//!
//! Relays measurement records to the prediction service and, when enabled,
//! scrapes measurements from uploaded lab sheets via OCR.

pub mod cors;
pub mod error;
pub mod extract;
pub mod health_api;
pub mod predict;
pub mod server;

#[cfg(test)]
mod test_support;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
