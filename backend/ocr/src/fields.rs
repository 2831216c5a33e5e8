//! Labeled field scraping.
//!
//! Lab sheets print values as `Label: value`. Each field has one
//! case-insensitive pattern; the first match anywhere in the text wins.

use medrelay_core::{ExtractedFields, MeasurementField};
use once_cell::sync::Lazy;
use regex::Regex;

static FIELD_PATTERNS: Lazy<Vec<(MeasurementField, Regex)>> = Lazy::new(|| {
    MeasurementField::ALL
        .iter()
        .map(|field| {
            let number = if field.is_integral() {
                r"(\d+)"
            } else {
                r"(\d+\.?\d*)"
            };
            let pattern = format!(r"(?i){}:\s*{}", field.as_str(), number);
            (*field, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Pull every recognisable measurement out of raw OCR text.
///
/// Fields that don't match, or whose numeral doesn't parse, are left out.
pub fn extract_fields(text: &str) -> ExtractedFields {
    let mut extracted = ExtractedFields::new();
    if text.trim().is_empty() {
        return extracted;
    }

    for (field, re) in FIELD_PATTERNS.iter() {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        if let Ok(value) = caps[1].parse::<f64>() {
            extracted.insert(*field, value);
        }
    }

    extracted
}
