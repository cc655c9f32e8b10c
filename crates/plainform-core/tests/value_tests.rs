use plainform_core::{Map, ToMap, Value};

// ============================================================================
// Ordered map semantics
// ============================================================================

#[test]
fn insert_appends_new_keys_in_order() {
    let mut map = Map::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, ["a", "b", "c"]);
}

#[test]
fn insert_overwrites_in_place() {
    let mut map = Map::new();
    map.insert("a", 1);
    map.insert("b", 2);
    let old = map.insert("a", 99);

    assert_eq!(old, Some(Value::Int32(1)));
    assert_eq!(map.len(), 2);
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, ["a", "b"], "overwrite must not move the entry");
    assert_eq!(map.get_i32("a"), Some(99));
}

#[test]
fn remove_preserves_remaining_order() {
    let mut map = Map::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);

    assert_eq!(map.remove("b"), Some(Value::Int32(2)));
    assert_eq!(map.remove("b"), None);
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, ["a", "c"]);
}

#[test]
fn iteration_visits_every_entry() {
    let mut map = Map::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);

    // All N entries, in order — including the last one.
    let seen: Vec<(&str, i32)> = map
        .iter()
        .map(|e| (e.key.as_str(), e.value.as_i32().unwrap()))
        .collect();
    assert_eq!(seen, [("a", 1), ("b", 2), ("c", 3)]);
}

#[test]
fn snapshot_views_follow_insertion_order() {
    let mut map = Map::new();
    map.insert("z", "last-alphabetically-first-inserted");
    map.insert("a", 1);

    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, ["z", "a"]);
    let values: Vec<&Value> = map.values().collect();
    assert_eq!(values[1], &Value::Int32(1));
    assert_eq!(map.entries()[0].key, "z");
}

#[test]
fn lookup_is_case_sensitive() {
    let mut map = Map::new();
    map.insert("Key", 1);
    assert!(map.contains_key("Key"));
    assert!(!map.contains_key("key"));
    assert_eq!(map.get("KEY"), None);
}

#[test]
fn contains_value_scans_entries() {
    let mut map = Map::new();
    map.insert("a", 1);
    map.insert("b", "two");
    assert!(map.contains_value(&Value::Int32(1)));
    assert!(map.contains_value(&Value::String("two".into())));
    assert!(!map.contains_value(&Value::Int32(2)));
}

#[test]
fn collect_and_extend_use_insert_semantics() {
    let mut map: Map = [("a", 1), ("b", 2)].into_iter().collect();
    map.extend([("a", 10), ("c", 3)]);

    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, ["a", "b", "c"]);
    assert_eq!(map.get_i32("a"), Some(10));
}

#[test]
fn clear_empties_the_map() {
    let mut map = Map::new();
    map.insert("a", 1);
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
}

// ============================================================================
// Numeric narrowing accessors
// ============================================================================

#[test]
fn every_numeric_variant_narrows_to_every_width() {
    let values = [
        Value::Int32(7),
        Value::Int64(7),
        Value::Float32(7.0),
        Value::Float64(7.0),
    ];
    for v in &values {
        assert_eq!(v.as_i32(), Some(7));
        assert_eq!(v.as_i64(), Some(7));
        assert_eq!(v.as_f32(), Some(7.0));
        assert_eq!(v.as_f64(), Some(7.0));
    }
}

#[test]
fn float_to_int_narrowing_truncates_toward_zero() {
    assert_eq!(Value::Float32(2.9).as_i32(), Some(2));
    assert_eq!(Value::Float64(2.9).as_i64(), Some(2));
}

#[test]
fn non_numeric_variants_do_not_narrow() {
    assert_eq!(Value::String("7".into()).as_i32(), None);
    assert_eq!(Value::Bool(true).as_f64(), None);
    assert_eq!(Value::Null.as_i64(), None);
    assert!(!Value::Null.is_number());
    assert!(Value::Null.is_null());
}

#[test]
fn typed_getters_narrow_through_the_map() {
    let mut inner = Map::new();
    inner.insert("d", true);

    let mut map = Map::new();
    map.insert("n", Value::Int64(5));
    map.insert("s", "text");
    map.insert("arr", Value::Array(vec![Value::Int32(1)]));
    map.insert("obj", inner);

    assert_eq!(map.get_i32("n"), Some(5));
    assert_eq!(map.get_f64("n"), Some(5.0));
    assert_eq!(map.get_str("s"), Some("text"));
    assert_eq!(map.get_array("arr").map(<[Value]>::len), Some(1));
    assert_eq!(map.get_map("obj").and_then(|m| m.get_bool("d")), Some(true));
    assert_eq!(map.get_bool("s"), None, "wrong-type getter yields None");
    assert_eq!(map.get_i32("missing"), None);
}

// ============================================================================
// ToMap bridge
// ============================================================================

struct Station {
    name: &'static str,
    platforms: i32,
    underground: bool,
}

impl ToMap for Station {
    fn to_map(&self) -> Map {
        let mut map = Map::new();
        map.insert("name", self.name);
        map.insert("platforms", self.platforms);
        map.insert("underground", self.underground);
        map
    }
}

#[test]
fn to_map_lists_fields_in_declaration_order() {
    let station = Station {
        name: "Central",
        platforms: 12,
        underground: false,
    };
    let map = station.to_map();
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, ["name", "platforms", "underground"]);
    assert_eq!(
        map.to_string(),
        r#"{"name": "Central", "platforms": 12, "underground": false}"#
    );
}
