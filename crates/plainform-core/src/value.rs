//! Dynamic value model shared by the CSV and JSON engines.
//!
//! [`Value`] is a closed tagged union over everything either text format can
//! denote: null, booleans, 32/64-bit integers, 32/64-bit floats, strings,
//! arrays, and insertion-ordered objects. Exactly one variant is active at a
//! time; the only cross-variant movement is through the explicit numeric
//! narrowing accessors ([`Value::as_i32`] and friends).
//!
//! [`Map`] is the ordered object: a `Vec<(key, value)>`-shaped container with
//! unique keys, in-place overwrite, and iteration in insertion order. It
//! deliberately does not hash — objects in this domain are small and lookup
//! is a linear scan over exact string matches.

use std::fmt;

use crate::json;

/// A dynamically-typed value parsed from (or serialized to) CSV or JSON text.
///
/// Integers and floats keep their 32/64-bit width: the parsers prefer the
/// 32-bit form and widen to 64-bit only when the 32-bit parse fails, so
/// `"1"` is [`Value::Int32`] while `"2147483648"` is [`Value::Int64`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order.
    Object(Map),
}

impl Value {
    /// True for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for any of the four numeric variants.
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Int32(_) | Value::Int64(_) | Value::Float32(_) | Value::Float64(_)
        )
    }

    /// Narrow any numeric variant to `i32` (floats truncate toward zero).
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::Int32(n) => Some(n),
            Value::Int64(n) => Some(n as i32),
            Value::Float32(f) => Some(f as i32),
            Value::Float64(f) => Some(f as i32),
            _ => None,
        }
    }

    /// Narrow any numeric variant to `i64` (floats truncate toward zero).
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int32(n) => Some(n as i64),
            Value::Int64(n) => Some(n),
            Value::Float32(f) => Some(f as i64),
            Value::Float64(f) => Some(f as i64),
            _ => None,
        }
    }

    /// Narrow any numeric variant to `f32`.
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Value::Int32(n) => Some(n as f32),
            Value::Int64(n) => Some(n as f32),
            Value::Float32(f) => Some(f),
            Value::Float64(f) => Some(f as f32),
            _ => None,
        }
    }

    /// Narrow any numeric variant to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int32(n) => Some(n as f64),
            Value::Int64(n) => Some(n as f64),
            Value::Float32(f) => Some(f as f64),
            Value::Float64(f) => Some(f),
            _ => None,
        }
    }

    /// Borrow the string content, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Borrow the elements, if this is an `Array`.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the ordered object, if this is an `Object`.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Compact JSON rendering; see the serializer in [`crate::json`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_value(f, self)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float32(f)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

/// One key-value pair of an ordered object.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

/// An insertion-ordered `String → Value` mapping with unique keys.
///
/// - Inserting an existing key overwrites its value **in place**: the entry
///   keeps its original position. Inserting a new key appends at the end.
/// - Iteration (and the `keys`/`values` views) follows insertion order.
/// - Lookup is a case-sensitive exact match, linear over the entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    entries: Vec<Entry>,
}

impl Map {
    /// Create an empty map.
    pub fn new() -> Self {
        Map {
            entries: Vec::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Position of `key`, if present.
    fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Insert or overwrite.
    ///
    /// An existing key keeps its position and gets the new value (the old
    /// value is returned); a new key is appended and `None` is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.index_of(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].value, value)),
            None => {
                self.entries.push(Entry { key, value });
                None
            }
        }
    }

    /// Borrow the value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    /// Mutably borrow the value under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    /// Remove the entry under `key`, keeping the remaining entries in order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let i = self.index_of(key)?;
        Some(self.entries.remove(i).value)
    }

    /// True if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// True if any entry holds `value`.
    pub fn contains_value(&self, value: &Value) -> bool {
        self.entries.iter().any(|e| &e.value == value)
    }

    /// Iterate the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// The entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// The values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|e| &e.value)
    }

    /// `get` narrowed to a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// `get` narrowed to a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// `get` narrowed to a nested object.
    pub fn get_map(&self, key: &str) -> Option<&Map> {
        self.get(key)?.as_map()
    }

    /// `get` narrowed to an array.
    pub fn get_array(&self, key: &str) -> Option<&[Value]> {
        self.get(key)?.as_array()
    }

    /// `get` narrowed to `i32` (any numeric variant converts).
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.get(key)?.as_i32()
    }

    /// `get` narrowed to `i64` (any numeric variant converts).
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_i64()
    }

    /// `get` narrowed to `f32` (any numeric variant converts).
    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.get(key)?.as_f32()
    }

    /// `get` narrowed to `f64` (any numeric variant converts).
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Map {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl fmt::Display for Map {
    /// Compact JSON object rendering; see the serializer in [`crate::json`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_map(f, self)
    }
}

/// Render an `f32` in literal form. Whole finite values keep a trailing `.0`
/// so the text still contains a `.` and re-classifies as a float on the way
/// back in; everything else uses Rust's shortest round-trip form.
pub(crate) fn write_f32(f: &mut fmt::Formatter<'_>, x: f32) -> fmt::Result {
    if x.is_finite() && x.fract() == 0.0 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

/// `f64` counterpart of [`write_f32`].
pub(crate) fn write_f64(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_finite() && x.fract() == 0.0 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

/// Describe a domain type as an ordered field map.
///
/// This is the explicit stand-in for reflection-based field dumping: a type
/// opts in by listing its fields, in declaration order, as map entries. The
/// resulting [`Map`] feeds straight into the JSON serializer.
pub trait ToMap {
    fn to_map(&self) -> Map;
}
