//! Comprehensive tests for mini-css
//!
//! Drives the manager end to end over the in-memory document.

use mini_css::{
    serialize, to_kebab_case, DeclarationMap, MemoryDocument, MemorySheet, StyleBody,
    StyleError, StyleSheetHandle, StyleSheetManager,
};

fn manager() -> StyleSheetManager<MemoryDocument> {
    let mut css = StyleSheetManager::new(MemoryDocument::new());
    css.create_style_sheet().unwrap();
    css
}

#[test]
fn test_create_style_sheet_attaches_element() {
    let css = manager();

    assert_eq!(css.host().head_len(), 1);
    assert!(css.style_element().unwrap().is_attached());
    assert!(css.get_rules().is_empty());
}

#[test]
fn test_serialize_segments() {
    let map = DeclarationMap::new()
        .with("backgroundColor", "red")
        .with("fontSize", "12px")
        .with("zIndex2", 4);

    let css = serialize(&map);
    let segments: Vec<&str> = css.split_terminator(';').collect();

    assert_eq!(segments.len(), map.len());
    for ((key, value), segment) in map.iter().zip(segments) {
        assert_eq!(segment, format!("{}:{}", to_kebab_case(key), value));
    }
}

#[test]
fn test_add_map_reads_back_normalized() {
    let mut css = manager();
    css.add(".x", DeclarationMap::new().with("color", "red")).unwrap();

    let rules = css.get_rules();
    assert_eq!(rules.len(), 1);
    assert!(rules[0].contains(".x"));
    assert!(rules[0].contains("color: red"));
}

#[test]
fn test_add_empty_map() {
    let mut css = manager();
    css.add(".empty", DeclarationMap::new()).unwrap();

    assert_eq!(css.get_rules().len(), 1);
    assert!(css.get_rules()[0].starts_with(".empty"));
}

#[test]
fn test_add_appends_in_order() {
    let mut css = manager();
    for selector in [".one", ".two", ".three"] {
        css.add(selector, "margin: 0;").unwrap();
    }

    let rules = css.get_rules();
    assert!(rules[0].starts_with(".one"));
    assert!(rules[1].starts_with(".two"));
    assert!(rules[2].starts_with(".three"));
}

#[test]
fn test_remove_first() {
    let mut css = manager();
    css.add(".a", "color: red;")
        .unwrap()
        .add(".b", "color: green;")
        .unwrap()
        .add(".c", "color: blue;")
        .unwrap();

    css.remove(0).unwrap();

    let rules = css.get_rules();
    assert_eq!(rules.len(), 2);
    assert!(rules.iter().all(|rule| !rule.contains(".a")));
    assert!(rules[0].starts_with(".b"));
}

#[test]
fn test_remove_out_of_range() {
    let mut css = manager();
    css.add(".a", "color: red;").unwrap();

    let err = css.remove(3).err().unwrap();
    assert_eq!(err, StyleError::InvalidIndex { index: 3, len: 1 });
    assert_eq!(css.get_rules().len(), 1);
}

#[test]
fn test_get_is_substring_match() {
    let mut css = manager();
    css.add(".foo", "color: red;")
        .unwrap()
        .add(".foobar", "color: green;")
        .unwrap()
        .add(".bar", "margin: 0;")
        .unwrap();

    let found = css.get("foo");
    assert_eq!(found.len(), 2);
    assert!(found[0].starts_with(".foo "));
    assert!(found[1].starts_with(".foobar"));

    // Matches declaration text too, not only selectors
    assert_eq!(css.get("margin").len(), 1);
    assert!(css.get("missing").is_empty());
}

#[test]
fn test_get_on_empty_and_unset_sheet() {
    let css = manager();
    assert!(css.get("anything").is_empty());

    let unset = StyleSheetManager::new(MemoryDocument::new());
    assert!(unset.get("anything").is_empty());
    assert!(unset.get_rules().is_empty());
}

#[test]
fn test_add_before_sheet_inserts_nothing() {
    let mut css = StyleSheetManager::new(MemoryDocument::new());
    let err = css.add(".x", DeclarationMap::new().with("color", "red")).err().unwrap();

    assert!(matches!(err, StyleError::Uninitialized { .. }));
    assert_eq!(css.host().head_len(), 0);
}

#[test]
fn test_inject_overwrites_added_rules() {
    let mut css = manager();
    css.add(".a", "color: red;").unwrap().add(".b", "color: green;").unwrap();

    // Named colors read back in their shortest form (`blue` becomes `#00f`), red stays `red`
    css.inject("body{color:red;}").unwrap();

    let rules = css.get_rules();
    assert_eq!(rules.len(), 1);
    assert!(rules[0].starts_with("body"));
    assert!(rules[0].contains("color: red"));

    // Later adds land in the injected sheet
    css.add(".c", "margin: 0;").unwrap();
    assert_eq!(css.get_rules().len(), 2);
}

#[test]
fn test_inject_drops_invalid_rules() {
    let mut css = manager();
    css.inject("p { margin: 0; } 42 { color: red; }").unwrap();

    let rules = css.get_rules();
    assert!(rules.iter().any(|rule| rule.starts_with("p")));
    assert!(rules.iter().all(|rule| !rule.contains("42")));
}

#[test]
fn test_with_existing_sheet() {
    let sheet = MemorySheet::new();
    sheet.insert_rule(".pre { color: red; }", 0).unwrap();

    let mut css = StyleSheetManager::with_sheet(MemoryDocument::new(), sheet.clone());
    css.add(".post", "color: blue;").unwrap();

    assert_eq!(sheet.rule_count(), 2);
    assert_eq!(css.get_rules(), sheet.rules());
}

#[test]
fn test_set_sheet_redirects_writes() {
    let mut css = manager();
    let original = css.sheet().unwrap().clone();
    let other = MemorySheet::new();

    css.set_sheet(other.clone()).add(".x", "color: red;").unwrap();

    assert_eq!(original.rule_count(), 0);
    assert_eq!(other.rule_count(), 1);
}

#[test]
fn test_two_managers_share_sheet() {
    let mut first = manager();
    let sheet = first.sheet().unwrap().clone();
    let mut second = StyleSheetManager::with_sheet(MemoryDocument::new(), sheet);

    first.add(".a", "color: red;").unwrap();
    second.add(".b", "color: blue;").unwrap();
    second.remove(0).unwrap();

    let rules = first.get_rules();
    assert_eq!(rules.len(), 1);
    assert!(rules[0].starts_with(".b"));
}

#[test]
fn test_dynamic_style_body() {
    let mut css = manager();
    let body = StyleBody::try_from(serde_json::json!({ "paddingTop": "4px", "color": "red" })).unwrap();
    css.add(".dyn", body).unwrap();

    assert_eq!(css.get(".dyn").len(), 1);
    assert!(css.get_rules()[0].contains("padding-top"));

    let err = StyleBody::try_from(serde_json::json!(42)).unwrap_err();
    assert!(matches!(err, StyleError::TypeMismatch { .. }));
}

#[test]
fn test_get_matches_spaced_string_values() {
    let mut css = manager();
    css.add(".quote", "content: \"a    b\";").unwrap();

    assert_eq!(css.get("\"a    b\"").len(), 1);
}
