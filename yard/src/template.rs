//! Configuration template parsing and encoding.
//!
//! Environment configuration templates are plain-text files of
//! `KEY=VALUE` lines grouped into named sections. A section starts with a
//! banner of the form:
//!
//! ```text
//! # <108 asterisks>
//! #                 SECTION NAME
//! # <108 asterisks>
//! ```
//!
//! Everything that is neither a recognized header nor a well-formed
//! variable line inside an open section is silently dropped.

use std::fs;
use std::path::Path;

use crate::environment::Section;
use crate::error::Result;

/// The fixed banner line that frames a section header.
pub const SECTION_DELIMITER: &str = "# ************************************************************************************************************";

/// Parses a configuration template into ordered sections.
///
/// A comment line is a section header only when the lines immediately
/// before and after it are both exact [`SECTION_DELIMITER`] lines. The
/// section name is the header text with the leading `#` and surrounding
/// whitespace stripped. Variable values are trimmed of whitespace and
/// surrounding double quotes. Variable lines outside any section are
/// dropped.
///
/// # Examples
///
/// ```
/// use yard::template::{parse_template, SECTION_DELIMITER};
///
/// let input = format!("{SECTION_DELIMITER}\n#   GATEWAY\n{SECTION_DELIMITER}\nAPI_PORT=8080\n");
/// let sections = parse_template(&input);
/// assert_eq!(sections[0].name, "GATEWAY");
/// assert_eq!(sections[0].variables["API_PORT"], "8080");
/// ```
#[must_use]
pub fn parse_template(input: &str) -> Vec<Section> {
    let lines: Vec<&str> = input.lines().collect();
    let mut sections: Vec<Section> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if let Some(comment) = line.trim().strip_prefix('#') {
            let framed = i > 0
                && lines[i - 1] == SECTION_DELIMITER
                && i + 1 < lines.len()
                && lines[i + 1] == SECTION_DELIMITER;
            if framed {
                sections.push(Section::new(comment.trim()));
            }
        } else if let Some((key, value)) = line.split_once('=') {
            if let Some(section) = sections.last_mut() {
                let value = value.trim().trim_matches('"');
                section
                    .variables
                    .insert(key.trim().to_string(), value.to_string());
            }
        }
    }

    sections
}

/// Encodes sections into the flat `KEY=VALUE` form consumed by backends.
///
/// Sections are flattened in order, one variable per line, with no
/// section markers.
#[must_use]
pub fn encode_env(sections: &[Section]) -> String {
    sections
        .iter()
        .flat_map(|section| {
            section
                .variables
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads and parses a configuration template from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_template_file(path: &Path) -> Result<Vec<Section>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_template(&contents))
}
