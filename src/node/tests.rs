use std::collections::HashMap;
use std::sync::Arc;

use super::*;
use crate::parser::Parser;
use crate::resolver::TableResolver;

fn parse_block(input: &str) -> Block {
    Parser::new(input)
        .expect("lexer failed")
        .parse_file()
        .expect("parse failed")
}

fn tree(input: &str) -> DocumentTree {
    DocumentTree::from_block("test.txt", parse_block(input))
}

fn tree_with_variables(input: &str) -> DocumentTree {
    let mut table = HashMap::new();
    table.insert("@tier1cost".to_string(), "100".to_string());
    table.insert("@always".to_string(), "yes".to_string());
    DocumentTree::with_resolver("test.txt", parse_block(input), Arc::new(TableResolver::new(table)))
}

const SPECIES_CLASSES: &str = r#"
HUM = {
    archetype = BIOLOGICAL
    playable = { always = yes }
}
MACHINE = {
    archetype = MACHINE
}
HUM = {
    archetype = BIOLOGICAL_ALT
}
"#;

#[test]
fn test_root_is_the_file_node() {
    let tree = tree(SPECIES_CLASSES);
    let root = tree.root();
    assert_eq!(root.key(), "test.txt");
    assert!(root.parent().is_none());
}

#[test]
fn test_get_node_returns_first_match() {
    let tree = tree(SPECIES_CLASSES);
    let hum = tree.root().get_node("HUM").expect("HUM should exist");
    assert_eq!(hum.get_raw_key_value("archetype"), Some("BIOLOGICAL"));
}

#[test]
fn test_get_node_absent_key() {
    let tree = tree(SPECIES_CLASSES);
    assert!(tree.root().get_node("ROBOT").is_none());
}

#[test]
fn test_get_nodes_preserves_duplicates_in_document_order() {
    let tree = tree(SPECIES_CLASSES);
    let hums = tree.root().get_nodes("HUM");
    assert_eq!(hums.len(), 2);
    assert_eq!(hums[0].get_raw_key_value("archetype"), Some("BIOLOGICAL"));
    assert_eq!(hums[1].get_raw_key_value("archetype"), Some("BIOLOGICAL_ALT"));
    // the singular form returns exactly the first of them
    assert_eq!(tree.root().get_node("HUM"), Some(hums[0]));
}

#[test]
fn test_parent_back_reference() {
    let tree = tree(SPECIES_CLASSES);
    let root = tree.root();
    let playable = root
        .get_node("HUM")
        .and_then(|hum| hum.get_node("playable"))
        .expect("playable should exist");
    assert_eq!(playable.parent().unwrap().key(), "HUM");
    assert_eq!(playable.parent().unwrap().parent().unwrap(), root);
}

#[test]
fn test_act_on_nodes_runs_per_match() {
    let tree = tree(SPECIES_CLASSES);
    let mut seen = Vec::new();
    let mut no_match = 0;
    tree.root().act_on_nodes_or_else(
        "HUM",
        |node| seen.push(node.get_raw_key_value("archetype").unwrap().to_string()),
        || no_match += 1,
    );
    assert_eq!(seen, vec!["BIOLOGICAL", "BIOLOGICAL_ALT"]);
    assert_eq!(no_match, 0);
}

#[test]
fn test_act_on_nodes_no_match_runs_once() {
    let tree = tree(SPECIES_CLASSES);
    let mut seen = 0;
    let mut no_match = 0;
    tree.root()
        .act_on_nodes_or_else("playable", |_| seen += 1, || no_match += 1);
    assert_eq!(seen, 0);
    assert_eq!(no_match, 1);
}

#[test]
fn test_get_key_value_resolves_variables() {
    let tree = tree_with_variables("trait_thrifty = { cost = @tier1cost }");
    let node = tree.root().get_node("trait_thrifty").unwrap();
    assert_eq!(node.get_raw_key_value("cost"), Some("@tier1cost"));
    assert_eq!(node.get_key_value("cost"), Some("100".to_string()));
}

#[test]
fn test_get_key_value_unknown_variable_degrades_to_raw() {
    let tree = tree_with_variables("t = { cost = @undefined }");
    let node = tree.root().get_node("t").unwrap();
    assert_eq!(node.get_key_value("cost"), Some("@undefined".to_string()));
}

#[test]
fn test_get_key_value_absent_key_is_none() {
    let tree = tree_with_variables("t = { cost = 1 }");
    let node = tree.root().get_node("t").unwrap();
    assert_eq!(node.get_key_value("weight"), None);
    assert_eq!(node.get_raw_key_value("weight"), None);
}

#[test]
fn test_get_key_value_or_default() {
    let tree = tree_with_variables("t = { cost = @tier1cost }");
    let node = tree.root().get_node("t").unwrap();
    assert_eq!(node.get_key_value_or_default("cost", 5), "100");
    assert_eq!(node.get_key_value_or_default("weight", 5), "5");
}

#[test]
fn test_default_value_goes_through_the_resolver_too() {
    // Observed contract: the default is resolved like any raw value, so a
    // default that reads like a variable token gets substituted.
    let tree = tree_with_variables("t = { }");
    let node = tree.root().get_node("t").unwrap();
    assert_eq!(node.get_key_value_or_default("cost", "@tier1cost"), "100");
}

#[test]
fn test_act_on_key_values_sees_every_resolved_match() {
    let tree = tree_with_variables("t = { flag = @always flag = no other = 1 }");
    let node = tree.root().get_node("t").unwrap();
    let mut seen = Vec::new();
    node.act_on_key_values("flag", |value| seen.push(value.to_string()));
    assert_eq!(seen, vec!["yes", "no"]);
}

#[test]
fn test_resolved_pairs_mirror_raw_pairs() {
    let tree = tree_with_variables("t = { a = @tier1cost b = 2 a = 3 }");
    let node = tree.root().get_node("t").unwrap();
    let raw = node.raw_key_values();
    let resolved = node.key_values();
    assert_eq!(raw.len(), resolved.len());
    for (r, kv) in raw.iter().zip(resolved) {
        assert_eq!(r.key, kv.key);
    }
    assert_eq!(resolved[0].value, "100");
    assert_eq!(resolved[2].value, "3");
}

#[test]
fn test_identity_resolver_resolved_equals_raw() {
    let tree = tree("t = { a = @whatever b = 2 }");
    let node = tree.root().get_node("t").unwrap();
    for (r, kv) in node.raw_key_values().iter().zip(node.key_values()) {
        assert_eq!(r.value, kv.value);
    }
}

#[test]
fn test_resolved_pairs_cached_across_resolver_swap() {
    // The resolved view is memoized per node; swapping the resolver after
    // first access must not recompute it.
    let mut tree = tree("t = { cost = @tier1cost }");
    let before = tree.root().get_node("t").unwrap().key_values()[0]
        .value
        .clone();
    assert_eq!(before, "@tier1cost");

    let mut table = HashMap::new();
    table.insert("@tier1cost".to_string(), "100".to_string());
    tree.set_resolver(Arc::new(TableResolver::new(table)));

    let node = tree.root().get_node("t").unwrap();
    assert_eq!(node.key_values()[0].value, "@tier1cost"); // stale by design
    assert_eq!(node.get_key_value("cost"), Some("100".to_string())); // uncached path
}

#[test]
fn test_scalar_values_and_comments() {
    let tree = tree("# header\nlist = { alpha beta }");
    assert_eq!(tree.root().values(), ["# header"]);
    let list = tree.root().get_node("list").unwrap();
    assert_eq!(list.values(), ["alpha", "beta"]);
}

#[test]
fn test_key_comparison_is_case_sensitive() {
    let tree = tree("HUM = { } hum = { lower = yes }");
    assert!(tree.root().get_node("HUM").unwrap().get_node("lower").is_none());
    assert_eq!(
        tree.root().get_node("hum").unwrap().get_raw_key_value("lower"),
        Some("yes")
    );
}

#[test]
fn test_key_value_node_back_reference() {
    let tree = tree("t = { cost = 1 }");
    let node = tree.root().get_node("t").unwrap();
    let kv = &node.raw_key_values()[0];
    assert_eq!(tree.node(kv.node_id()), node);
}
