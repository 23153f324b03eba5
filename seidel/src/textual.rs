mod parser;

use std::str::FromStr;

use winnow::Parser;

use crate::{Error, System, textual::parser::parse_whole_row};

/// Read the rows of an augmented matrix from a plain-text table.
///
/// One matrix row per line, numbers separated by commas and/or whitespace.
/// Blank lines and lines starting with `#` are skipped.
/// ```text
/// # 4x + y + z = 7, etc.
/// 4, 1, 1, 7
/// 1, 3, 1, 6
/// 1, 1, 5, 8
/// ```
pub fn parse_rows(input: &str) -> Result<Vec<Vec<f64>>, Error> {
    let mut rows = Vec::new();
    for (line_number, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = parse_whole_row
            .parse(line)
            .map_err(|e| Error::Parse(format!("line {}: {e}", line_number + 1)))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Parse a plain-text table (see [`parse_rows`]) into a validated [`System`].
pub fn parse_system(input: &str) -> Result<System, Error> {
    let rows = parse_rows(input)?;
    Ok(System::from_rows(&rows)?)
}

impl FromStr for System {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_system(s)
    }
}
