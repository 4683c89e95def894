//! Record line codec
//!
//! One contact per line: `name number group`.

use crate::error::{DirectoryError, Result};
use crate::index::Contact;

/// Number of fields in a record line
pub const FIELD_COUNT: usize = 3;

/// Parse one line of the data file.
///
/// Returns `Ok(None)` for blank lines. `line_no` is 1-based and only used
/// for error reporting.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Contact>> {
    let fields: Vec<&str> = line.split_ascii_whitespace().collect();

    match fields.as_slice() {
        [] => Ok(None),
        [name, number, group] => Ok(Some(Contact::new(*name, *number, *group))),
        _ => Err(DirectoryError::InvalidRecord {
            line: line_no,
            reason: format!(
                "expected {} fields (name number group), found {}",
                FIELD_COUNT,
                fields.len()
            ),
        }),
    }
}

/// Render a record as a single `\n`-terminated line
pub fn format_record(name: &str, number: &str, group: &str) -> String {
    format!("{} {} {}\n", name, number, group)
}

/// Check that a value can live in one whitespace-delimited field
pub fn validate_field(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(DirectoryError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }

    if value.chars().any(char::is_whitespace) {
        return Err(DirectoryError::InvalidField {
            field,
            reason: format!("{:?} contains whitespace", value),
        });
    }

    Ok(())
}
