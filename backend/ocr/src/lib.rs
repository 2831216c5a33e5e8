//! Optical Character Recognition (OCR)
//!
//! Bridges an external Tesseract-compatible binary and scrapes labeled
//! measurement values out of the text it produces.

pub mod fields;
pub mod lookup;
pub mod mock;
pub mod scratch;
pub mod tesseract;

pub use fields::extract_fields;
pub use lookup::find_executable;
pub use mock::MockExtractor;
pub use scratch::ScratchFile;
pub use tesseract::TesseractExtractor;
