//! Integration tests for the declaration-ordered map

use garm_foundation::{DeclMap, Name};

fn name(text: &str) -> Name {
    Name::new(text).unwrap()
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn iteration_follows_insertion_order() {
    let map = DeclMap::new()
        .try_insert(name("V_EXTRA"), 1000.0)
        .unwrap()
        .try_insert(name("L_0"), 1e4)
        .unwrap()
        .try_insert(name("R_0"), 200.0)
        .unwrap();

    let names: Vec<&str> = map.names().map(Name::as_str).collect();
    assert_eq!(names, vec!["V_EXTRA", "L_0", "R_0"]);
    assert_eq!(map.position("R_0"), Some(2));
}

// =============================================================================
// Immutability
// =============================================================================

#[test]
fn insert_leaves_original_untouched() {
    let before = DeclMap::new().try_insert(name("kf"), 1e-3).unwrap();
    let after = before.try_insert(name("kr"), 0.1).unwrap();

    assert_eq!(before.len(), 1);
    assert!(!before.contains("kr"));
    assert_eq!(after.len(), 2);
    assert_eq!(after.get("kr"), Some(&0.1));
}

#[test]
fn duplicate_insert_is_refused() {
    let map = DeclMap::new().try_insert(name("G"), ()).unwrap();
    assert!(map.try_insert(name("G"), ()).is_none());
    assert_eq!(map.len(), 1);
}

#[test]
fn vec_conversion_preserves_entries() {
    let map: DeclMap<u8> = vec![(name("a"), 1), (name("b"), 2)].try_into().unwrap();
    let back: Vec<(Name, u8)> = map.clone().into();
    assert_eq!(back, vec![(name("a"), 1), (name("b"), 2)]);
    assert_eq!(map.get_entry("b").map(|(n, v)| (n.as_str(), *v)), Some(("b", 2)));
}
