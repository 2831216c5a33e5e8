//! Clients for the remote prediction service.

pub mod http;
pub mod mock;

pub use http::HttpPredictor;
pub use mock::MockPredictor;
