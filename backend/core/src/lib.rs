pub mod error;
pub mod traits;
pub mod types;

pub use error::RelayError;
pub use traits::{Predictor, TextExtractor};
pub use types::{ExtractedFields, MeasurementField, MeasurementRecord, PredictionResult};
