//! CSV engine — a single-pass tokenizer over a configurable separator, plus
//! the delimited-text serializer.
//!
//! The tokenizer walks the input once, left to right, with one boolean of
//! state: a quoted-span flag that **toggles** on every literal `"` (it does
//! not pair-match). While the flag is set, neither the separator nor the row
//! delimiter is structural. Quote characters themselves are accumulated into
//! the pending cell and stripped later by the scalar classifier, which also
//! decides whether a finished cell is an `i32`, `i64`, `f32`, `f64`, or a
//! string.
//!
//! # Key design decisions
//!
//! - **Parsing is total**: a cell that looks numeric but fails every numeric
//!   parse degrades to a string; the only pathological input is an unclosed
//!   quoted span, which consumes to end of input and yields one oversized
//!   trailing cell rather than an error.
//! - **Fixed serialization form**: [`Csv`]'s `Display` always joins cells
//!   with `", "` and rows with `\n`, regardless of the separator the document
//!   was parsed with. The asymmetry is deliberate and load-bearing for the
//!   round-trip property.
//! - **No sign, no exponent**: the numeric grammar is ASCII digits and `.`
//!   only, so `-5` and `1e3` classify as strings.

use std::fmt;

use crate::value::{write_f32, write_f64, Value};

/// Default field separator.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Default row delimiter.
pub const DEFAULT_ROW_DELIMITER: char = '\n';

/// A parsed CSV document: an ordered sequence of rows of typed cells.
///
/// Rows are independent sequences; the document does not enforce a uniform
/// column count. Cells hold scalar [`Value`]s — the CSV grammar has no tokens
/// for booleans or null, so a literal `true` or an empty cell is stored as
/// the string `"true"` / `""`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Csv {
    rows: Vec<Vec<Value>>,
}

impl Csv {
    /// Create an empty document.
    pub fn new() -> Self {
        Csv { rows: Vec::new() }
    }

    /// Parse with the default `","` separator and `'\n'` row delimiter.
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, DEFAULT_SEPARATOR, DEFAULT_ROW_DELIMITER)
    }

    /// Parse with an explicit separator and row delimiter.
    ///
    /// The separator is matched as a whole string at the current position;
    /// an empty separator never matches. Parsing never fails: every input
    /// yields a document.
    pub fn parse_with(text: &str, separator: &str, row_delimiter: char) -> Self {
        let mut rows: Vec<Vec<Value>> = Vec::new();
        let mut row: Vec<Value> = Vec::new();
        let mut cell = String::new();
        let mut in_quotes = false;

        let mut i = 0;
        while let Some(c) = text[i..].chars().next() {
            // The flag toggles before the structural checks, so a closing
            // quote re-arms separator recognition on the very next character.
            if c == '"' {
                in_quotes = !in_quotes;
            }

            if !in_quotes && !separator.is_empty() && text[i..].starts_with(separator) {
                i += separator.len();
                row.push(classify(&cell));
                cell.clear();
                continue;
            }

            if c == row_delimiter && !in_quotes {
                // Mid-input delimiters close the cell and row unconditionally,
                // so interior empty cells and empty rows are preserved.
                row.push(classify(&cell));
                cell.clear();
                rows.push(std::mem::take(&mut row));
            } else {
                cell.push(c);
            }
            i += c.len_utf8();
        }

        // Trailing empties are dropped: only non-empty pending text closes a
        // final cell, and only a non-empty row is appended.
        if !cell.is_empty() {
            row.push(classify(&cell));
        }
        if !row.is_empty() {
            rows.push(row);
        }

        Csv { rows }
    }

    /// The rows of the document.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the document has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Borrow the cell at `row` / `col`, where `col` is either a `usize`
    /// column index or a `&str` header name looked up in the first row.
    pub fn get(&self, row: usize, col: impl ColumnKey) -> Option<&Value> {
        let col = col.resolve(self)?;
        self.rows.get(row)?.get(col)
    }

    /// Cell narrowed to `i32` (any numeric variant converts).
    pub fn get_i32(&self, row: usize, col: impl ColumnKey) -> Option<i32> {
        self.get(row, col)?.as_i32()
    }

    /// Cell narrowed to `i64` (any numeric variant converts).
    pub fn get_i64(&self, row: usize, col: impl ColumnKey) -> Option<i64> {
        self.get(row, col)?.as_i64()
    }

    /// Cell narrowed to `f32` (any numeric variant converts).
    pub fn get_f32(&self, row: usize, col: impl ColumnKey) -> Option<f32> {
        self.get(row, col)?.as_f32()
    }

    /// Cell narrowed to `f64` (any numeric variant converts).
    pub fn get_f64(&self, row: usize, col: impl ColumnKey) -> Option<f64> {
        self.get(row, col)?.as_f64()
    }
}

/// Column selector for [`Csv::get`]: a positional index, or a header name
/// resolved against the first row.
pub trait ColumnKey {
    fn resolve(&self, csv: &Csv) -> Option<usize>;
}

impl ColumnKey for usize {
    fn resolve(&self, _csv: &Csv) -> Option<usize> {
        Some(*self)
    }
}

impl ColumnKey for &str {
    /// Exact, case-sensitive match against the string cells of the first row.
    fn resolve(&self, csv: &Csv) -> Option<usize> {
        csv.rows
            .first()?
            .iter()
            .position(|cell| cell.as_str() == Some(*self))
    }
}

/// Classify a raw cell token as a typed scalar.
///
/// Tokens made solely of ASCII digits and `.` take the numeric path,
/// preferring the 32-bit width and widening to 64-bit only when the 32-bit
/// parse fails. Everything else — including anything signed, exponent-form,
/// or quoted — falls through to the string path, which strips at most one
/// leading and one trailing `"` and undoubles any interior `""`.
fn classify(token: &str) -> Value {
    if token.is_empty() {
        return Value::String(String::new());
    }

    if token.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        if token.contains('.') {
            if let Ok(f) = token.parse::<f32>() {
                return Value::Float32(f);
            }
            if let Ok(f) = token.parse::<f64>() {
                return Value::Float64(f);
            }
        } else {
            if let Ok(n) = token.parse::<i32>() {
                return Value::Int32(n);
            }
            if let Ok(n) = token.parse::<i64>() {
                return Value::Int64(n);
            }
        }
    }

    let mut s = token;
    if let Some(rest) = s.strip_prefix('"') {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix('"') {
        s = rest;
    }
    Value::String(s.replace("\"\"", "\""))
}

impl fmt::Display for Csv {
    /// Serialize to delimited text: numeric cells bare, every other cell
    /// double-quoted with interior `"` doubled, cells joined with the fixed
    /// `", "`, each row (including the last) followed by `\n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_cell(f, cell)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

fn write_cell(f: &mut fmt::Formatter<'_>, cell: &Value) -> fmt::Result {
    match cell {
        Value::Int32(n) => write!(f, "{n}"),
        Value::Int64(n) => write!(f, "{n}"),
        Value::Float32(x) => write_f32(f, *x),
        Value::Float64(x) => write_f64(f, *x),
        Value::String(s) => write_quoted(f, s),
        // Out-of-grammar cells (pushed by hand) render as quoted text.
        other => write_quoted(f, &other.to_string()),
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    f.write_str(&s.replace('"', "\"\""))?;
    f.write_str("\"")
}
