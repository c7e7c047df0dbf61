//! Loader for radar object CSV logs.
//!
//! The log has one header row followed by one row per time step. Every
//! field is a numeric literal, so the whole file is read into a
//! [`ColumnTable`] of `f64` columns.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use log::{debug, info};
use thiserror::Error;

use super::table::{ColumnTable, TableError};

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Empty file: {0}")]
    EmptyFile(PathBuf),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Duplicate header: {0}")]
    DuplicateHeader(String),

    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Malformed value at line {line}, column '{column}': {value:?} is not a number")]
    MalformedValue {
        line: u64,
        column: String,
        value: String,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Load a radar log CSV into a column table.
///
/// # Errors
///
/// Fails on the first row whose field count differs from the header
/// (`MalformedRow`) or the first field that is not a numeric literal
/// (`MalformedValue`). No partial table is returned.
pub fn load_radar_log<P: AsRef<Path>>(path: P) -> Result<ColumnTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_radar_log(BufReader::new(file))
        .map_err(|e| match e {
            LoaderError::EmptyFile(_) => LoaderError::EmptyFile(path.to_path_buf()),
            other => other,
        })?;

    info!(
        "Loaded {}: {} headers, {} time steps",
        path.display(),
        table.num_columns(),
        table.num_rows()
    );
    Ok(table)
}

/// Read a radar log from any reader. See [`load_radar_log`].
pub fn read_radar_log<R: Read>(reader: R) -> Result<ColumnTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(LoaderError::EmptyFile(PathBuf::new()));
    }

    let mut seen = HashSet::with_capacity(headers.len());
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(LoaderError::DuplicateHeader(header.clone()));
        }
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != headers.len() {
            return Err(LoaderError::MalformedRow {
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }

        for ((field, column), header) in record.iter().zip(columns.iter_mut()).zip(&headers) {
            let value = parse_numeric_literal(field).ok_or_else(|| LoaderError::MalformedValue {
                line,
                column: header.clone(),
                value: field.to_string(),
            })?;
            column.push(value);
        }
    }

    debug!("Parsed {} columns", headers.len());

    let mut table = ColumnTable::new();
    for (header, values) in headers.into_iter().zip(columns) {
        table.insert(header, values)?;
    }
    Ok(table)
}

/// Parse one CSV field as a numeric literal.
///
/// Accepts decimal integers, floats with optional exponent and the
/// `0x`/`0o`/`0b` integer forms, each with at most one leading sign. Words
/// such as `inf` or `nan`, empty fields and integers with leading zeros
/// (`010`) are rejected.
pub fn parse_numeric_literal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (negative, digits) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let radix = match digits.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };

    let magnitude = match radix {
        Some(radix) => {
            let body = &digits[2..];
            if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            i64::from_str_radix(body, radix).ok()? as f64
        }
        None => {
            if !is_decimal_literal(digits) {
                return None;
            }
            digits.parse::<f64>().ok()?
        }
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// Unsigned decimal literal: `digits[.digits][(e|E)[sign]digits]`, with at
/// least one mantissa digit. A plain integer may not have leading zeros.
fn is_decimal_literal(text: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&text[..i], Some(&text[i + 1..])),
        None => (text, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (mantissa, None),
    };

    if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
        return false;
    }
    if int_part.is_empty() && frac_part.map_or(true, str::is_empty) {
        return false;
    }
    if frac_part.is_none()
        && exponent.is_none()
        && int_part.len() > 1
        && int_part.starts_with('0')
        && int_part.bytes().any(|b| b != b'0')
    {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_numeric_literal() {
        assert_eq!(parse_numeric_literal("42"), Some(42.0));
        assert_eq!(parse_numeric_literal(" -3.5 "), Some(-3.5));
        assert_eq!(parse_numeric_literal("1e3"), Some(1000.0));
        assert_eq!(parse_numeric_literal("+2.5E-1"), Some(0.25));
        assert_eq!(parse_numeric_literal(".5"), Some(0.5));
        assert_eq!(parse_numeric_literal("0x1F"), Some(31.0));
        assert_eq!(parse_numeric_literal("-0b101"), Some(-5.0));
        assert_eq!(parse_numeric_literal("0o17"), Some(15.0));
        assert_eq!(parse_numeric_literal("1."), Some(1.0));
        assert_eq!(parse_numeric_literal("0"), Some(0.0));
        assert_eq!(parse_numeric_literal("000"), Some(0.0));
        assert_eq!(parse_numeric_literal("010.5"), Some(10.5));
        assert_eq!(parse_numeric_literal("07e1"), Some(70.0));
        assert_eq!(parse_numeric_literal("-0").map(f64::is_sign_negative), Some(true));
    }

    #[test]
    fn test_parse_numeric_literal_rejects() {
        assert_eq!(parse_numeric_literal(""), None);
        assert_eq!(parse_numeric_literal("abc"), None);
        assert_eq!(parse_numeric_literal("nan"), None);
        assert_eq!(parse_numeric_literal("inf"), None);
        assert_eq!(parse_numeric_literal("-"), None);
        assert_eq!(parse_numeric_literal("1.2.3"), None);
        assert_eq!(parse_numeric_literal("0xZZ"), None);
        assert_eq!(parse_numeric_literal("0x"), None);
        assert_eq!(parse_numeric_literal("."), None);
        assert_eq!(parse_numeric_literal("1e"), None);
        assert_eq!(parse_numeric_literal("1e+"), None);
        assert_eq!(parse_numeric_literal("1-2"), None);
        assert_eq!(parse_numeric_literal("1.5e2.0"), None);
    }

    #[test]
    fn test_parse_numeric_literal_rejects_repeated_signs() {
        for text in ["--5", "+-5", "-+5", "++5", "0x-5", "0x+5", "-0x-5", "0b-1", "0o+7"] {
            assert_eq!(parse_numeric_literal(text), None, "{:?} should be rejected", text);
        }
    }

    #[test]
    fn test_parse_numeric_literal_rejects_leading_zeros() {
        assert_eq!(parse_numeric_literal("010"), None);
        assert_eq!(parse_numeric_literal("-007"), None);
    }

    #[test]
    fn test_repeated_sign_is_malformed_value() {
        let result = read_radar_log("a\n1\n--5\n".as_bytes());
        match result {
            Err(LoaderError::MalformedValue { line, column, value }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "a");
                assert_eq!(value, "--5");
            }
            other => panic!("expected MalformedValue, got {:?}", other),
        }
    }

    #[test]
    fn test_load_radar_log() -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "t,aObject[0].Kinematic.fDistX,aObject[0].General.uiLifeCycles").unwrap();
        writeln!(file, "0.0,10.5,1").unwrap();
        writeln!(file, "0.04,10.25,2").unwrap();
        writeln!(file, "0.08,10.0,3").unwrap();
        file.flush().unwrap();

        let table = load_radar_log(file.path())?;
        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.num_rows(), 3);
        assert_eq!(
            table.headers().collect::<Vec<_>>(),
            vec!["t", "aObject[0].Kinematic.fDistX", "aObject[0].General.uiLifeCycles"]
        );
        assert_eq!(
            table.get("aObject[0].General.uiLifeCycles"),
            Some(&[1.0, 2.0, 3.0][..])
        );
        for (_, values) in table.iter() {
            assert_eq!(values.len(), table.num_rows());
        }

        Ok(())
    }

    #[test]
    fn test_header_only_log_is_empty_table() -> Result<()> {
        let table = read_radar_log("a,b,c\n".as_bytes())?;
        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.num_rows(), 0);
        Ok(())
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let result = load_radar_log(file.path());
        match result {
            Err(LoaderError::EmptyFile(path)) => assert_eq!(path, file.path()),
            other => panic!("expected EmptyFile, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_row() {
        let result = read_radar_log("a,b\n1,2\n3\n".as_bytes());
        match result {
            Err(LoaderError::MalformedRow {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }

        let result = read_radar_log("a,b\n1,2,3\n".as_bytes());
        assert!(matches!(result, Err(LoaderError::MalformedRow { found: 3, .. })));
    }

    #[test]
    fn test_malformed_value() {
        let result = read_radar_log("a,b\n1,2\n3,oops\n".as_bytes());
        match result {
            Err(LoaderError::MalformedValue {
                line,
                column,
                value,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "b");
                assert_eq!(value, "oops");
            }
            other => panic!("expected MalformedValue, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_header() {
        let result = read_radar_log("a,b,a\n1,2,3\n".as_bytes());
        assert!(matches!(result, Err(LoaderError::DuplicateHeader(h)) if h == "a"));
    }
}
