//! JSON engine — a textual normalization pass, a recursive-descent parser,
//! and a compact serializer.
//!
//! The pipeline is: raw text → [`normalize`] → key/value parse loop →
//! [`Map`]. Normalization deletes line breaks and the whitespace around
//! structural `:` and `,`, and wraps a top-level array as `{"":…}`, so the
//! parser proper only ever starts from an object and never has to skip
//! whitespace itself.
//!
//! # Key design decisions
//!
//! - **Read-only cursor**: the parser advances a byte position over an
//!   immutable `&str` instead of deleting from the front of a buffer, so no
//!   reallocation happens while scanning.
//! - **Noise-skipping key scanner**: the top-level loop finds the *next* `"`
//!   and discards everything before it — this is how `{`, `}` and the commas
//!   between entries are consumed, without dedicated grammar rules for them.
//! - **Total failure**: any malformed token aborts the whole parse. There is
//!   no string fallback for bad numbers and no skip-and-continue.
//! - **Homogeneous bracket scanning**: the balanced-bracket scanner tracks
//!   one bracket type at a time (`{}` or `[]`), so cross-type nesting is not
//!   validated — interior content must balance its own bracket type.
//! - **Best-effort normalization**: the rewrites are textual, not lexical.
//!   They assume the rewritten whitespace patterns never appear meaningfully
//!   inside string content at exactly those boundaries; this is a known
//!   fragility of the format, kept as-is.

use std::fmt;

use crate::error::{ParseError, Result};
use crate::value::{write_f32, write_f64, Entry, Map, Value};

/// Parse JSON text into an ordered object.
///
/// Empty or all-whitespace input yields an empty map. A top-level array is
/// wrapped under the empty key, so `[1,2]` parses as `{"": [1, 2]}`.
///
/// Duplicate keys in the input overwrite in place: the entry keeps the
/// position of its first occurrence and the value of its last.
pub fn parse(text: &str) -> Result<Map> {
    let normalized = normalize(text);
    let mut cursor = Cursor::new(&normalized);
    parse_entries(&mut cursor)
}

/// Serialize a value as compact JSON text (single space after `:` and `,`,
/// no other whitespace). Equivalent to `value.to_string()`.
pub fn serialize(value: &Value) -> String {
    value.to_string()
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Best-effort textual cleanup applied once, before parsing:
///
/// 1. trim leading/trailing whitespace;
/// 2. delete every maximal whitespace run that contains a newline (line
///    breaks and surrounding indentation vanish entirely);
/// 3. collapse whitespace around a colon that follows a closing quote
///    (`"key" : ` → `"key":`);
/// 4. drop whitespace between a comma and a following quote (`, "k"` → `,"k"`);
/// 5. wrap a leading `[` as `{"":…}` so parsing always starts from an object.
fn normalize(input: &str) -> String {
    let mut text = strip_newline_runs(input.trim());
    text = tighten_colons(&text);
    text = tighten_commas(&text);
    if text.starts_with('[') {
        text = format!("{{\"\":{text}}}");
    }
    text
}

/// Pass 2: remove each maximal whitespace run that contains a `\n`; runs
/// without one are kept verbatim.
fn strip_newline_runs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            let mut run = String::new();
            run.push(c);
            let mut has_newline = c == '\n';
            while let Some(&next) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                has_newline |= next == '\n';
                run.push(next);
                chars.next();
            }
            if !has_newline {
                out.push_str(&run);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Pass 3: `"` ws* `:` ws* → `":`. The pattern bytes are all ASCII, so byte
/// scanning is safe; copied text moves char-by-char to keep UTF-8 intact.
fn tighten_colons(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while let Some(c) = s[i..].chars().next() {
        if c == '"' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b':' {
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                out.push_str("\":");
                i = j;
                continue;
            }
        }
        out.push(c);
        i += c.len_utf8();
    }
    out
}

/// Pass 4: `,` ws* `"` → `,"`.
fn tighten_commas(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while let Some(c) = s[i..].chars().next() {
        if c == ',' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'"' {
                out.push(',');
                i = j;
                continue;
            }
        }
        out.push(c);
        i += c.len_utf8();
    }
    out
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// A read-only position over normalized input. "Consume from the front"
/// operations advance `pos`; the text itself is never modified.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor { text, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `lit` if the remaining input starts with it.
    fn eat_literal(&mut self, lit: &str) -> bool {
        if self.text[self.pos..].starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }
}

/// The top-level key/value loop, shared by the document root and nested
/// object interiors: scan to the next quoted key, consume the structural
/// colon, dispatch the value, repeat until the cursor is exhausted.
fn parse_entries(cursor: &mut Cursor) -> Result<Map> {
    let mut map = Map::new();
    while let Some(key) = scan_string(cursor)? {
        // The character after the key is the structural colon.
        if cursor.bump().is_none() {
            return Err(ParseError::UnexpectedEndOfInput);
        }
        let value = parse_value(cursor)?;
        map.insert(key, value);
    }
    Ok(map)
}

/// Dispatch on the character under the cursor and parse one value.
fn parse_value(cursor: &mut Cursor) -> Result<Value> {
    let c = cursor.peek().ok_or(ParseError::UnexpectedEndOfInput)?;
    match c {
        '"' => {
            let s = scan_string(cursor)?.ok_or(ParseError::UnexpectedEndOfInput)?;
            Ok(Value::String(s))
        }
        '0'..='9' => parse_number(cursor),
        '[' => {
            let interior = scan_balanced(cursor, '[', ']')?;
            parse_array(&interior)
        }
        '{' => {
            let interior = scan_balanced(cursor, '{', '}')?;
            let mut inner = Cursor::new(&interior);
            parse_entries(&mut inner).map(Value::Object)
        }
        _ => {
            if cursor.eat_literal("true") {
                Ok(Value::Bool(true))
            } else if cursor.eat_literal("false") {
                Ok(Value::Bool(false))
            } else if cursor.eat_literal("null") {
                Ok(Value::Null)
            } else {
                Err(ParseError::UnexpectedCharacter { found: c })
            }
        }
    }
}

/// Parse a balanced-bracket interior as a comma-separated value sequence.
/// An empty interior is an empty array.
fn parse_array(interior: &str) -> Result<Value> {
    let mut cursor = Cursor::new(interior);
    let mut items = Vec::new();
    while !cursor.at_end() {
        items.push(parse_value(&mut cursor)?);
        if cursor.peek() == Some(',') {
            cursor.bump();
        }
    }
    Ok(Value::Array(items))
}

/// Accumulate a number token (ASCII digits and `.` only — no sign, no
/// exponent) and parse it, preferring the 32-bit width. Unlike the CSV
/// classifier there is no string fallback: exhausting both widths is fatal.
fn parse_number(cursor: &mut Cursor) -> Result<Value> {
    let mut token = String::new();
    while let Some(c) = cursor.peek() {
        if !c.is_ascii_digit() && c != '.' {
            break;
        }
        token.push(c);
        cursor.bump();
    }

    if token.contains('.') {
        if let Ok(f) = token.parse::<f32>() {
            return Ok(Value::Float32(f));
        }
        if let Ok(f) = token.parse::<f64>() {
            return Ok(Value::Float64(f));
        }
    } else {
        if let Ok(n) = token.parse::<i32>() {
            return Ok(Value::Int32(n));
        }
        if let Ok(n) = token.parse::<i64>() {
            return Ok(Value::Int64(n));
        }
    }
    Err(ParseError::MalformedNumber { token })
}

/// Scan to the next `"`, discarding whatever precedes it, then accumulate
/// verbatim (no escape handling) to the closing `"`.
///
/// `Ok(None)` means the input ran out before an opening quote — the caller's
/// loop is done. An opening quote with no closing quote is fatal.
fn scan_string(cursor: &mut Cursor) -> Result<Option<String>> {
    while let Some(c) = cursor.bump() {
        if c != '"' {
            continue;
        }
        let mut out = String::new();
        loop {
            match cursor.bump() {
                Some('"') => return Ok(Some(out)),
                Some(c) => out.push(c),
                None => return Err(ParseError::UnterminatedString),
            }
        }
    }
    Ok(None)
}

/// Consume an opening bracket and return the interior up to its depth-0
/// closer, tracking nesting for that one bracket type only.
fn scan_balanced(cursor: &mut Cursor, open: char, close: char) -> Result<String> {
    cursor.bump();
    let mut depth = 0usize;
    let mut interior = String::new();
    while let Some(c) = cursor.bump() {
        if c == open {
            depth += 1;
        } else if c == close {
            if depth == 0 {
                return Ok(interior);
            }
            depth -= 1;
        }
        interior.push(c);
    }
    Err(ParseError::UnterminatedContainer { open })
}

// ---------------------------------------------------------------------------
// Serializer
// ---------------------------------------------------------------------------

/// Render a value as compact JSON: `null`, bare booleans and numbers,
/// double-quoted strings with interior `"` doubled (no other escaping),
/// `[a, b]` arrays and `{"k": v}` objects.
pub(crate) fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Int32(n) => write!(f, "{n}"),
        Value::Int64(n) => write!(f, "{n}"),
        Value::Float32(x) => write_f32(f, *x),
        Value::Float64(x) => write_f64(f, *x),
        Value::String(s) => write_string(f, s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => write_map(f, map),
    }
}

/// Render an ordered object as `{"k1": v1, "k2": v2}` (empty → `{}`).
pub(crate) fn write_map(f: &mut fmt::Formatter<'_>, map: &Map) -> fmt::Result {
    f.write_str("{")?;
    for (i, Entry { key, value }) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_string(f, key)?;
        f.write_str(": ")?;
        write_value(f, value)?;
    }
    f.write_str("}")
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    f.write_str(&s.replace('"', "\"\""))?;
    f.write_str("\"")
}
