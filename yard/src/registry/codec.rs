//! Encoding of the section list for the variables column.
//!
//! The environments table stores the ordered section list as a JSON
//! blob. All serialization of that blob lives here, so the rest of the
//! registry deals only in typed [`Section`] values.

use crate::environment::Section;
use crate::error::Result;

/// Encodes sections to the JSON blob stored in the variables column.
///
/// # Errors
///
/// Returns a serialization error if encoding fails.
pub(super) fn encode_sections(sections: &[Section]) -> Result<String> {
    Ok(serde_json::to_string(sections)?)
}

/// Decodes the variables column blob back into ordered sections.
///
/// # Errors
///
/// Returns a serialization error if the blob is not valid.
pub(super) fn decode_sections(blob: &str) -> Result<Vec<Section>> {
    Ok(serde_json::from_str(blob)?)
}
