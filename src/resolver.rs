use std::collections::HashMap;

use crate::node::DocumentTree;

/// Maps a variable token to its replacement text.
///
/// Resolution is fail-soft: text with no table entry comes back unchanged,
/// so callers can always use the result whether or not a substitution
/// happened. Implementations must be pure over their table and input.
pub trait VariableResolver: Send + Sync {
    fn resolve(&self, text: &str) -> String;
}

/// Resolver that performs no substitution at all. Every tree built without
/// an explicit resolver uses this, so key-value lookups never fail for want
/// of one.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl VariableResolver for IdentityResolver {
    fn resolve(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Resolver backed by a table of `@variable` definitions.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    table: HashMap<String, String>,
}

impl TableResolver {
    /// Build from an already-materialized table. Keys include the leading
    /// `@`, exactly as they appear in script text.
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    /// Collect `@variable = value` definitions from the root pairs of
    /// already-parsed trees, e.g. the files under `common/scripted_variables`.
    /// Later definitions overwrite earlier ones, file order deciding.
    pub fn from_trees<'a>(trees: impl IntoIterator<Item = &'a DocumentTree>) -> Self {
        let mut table = HashMap::new();
        for tree in trees {
            for kv in tree.root().raw_key_values() {
                if kv.key.starts_with('@') {
                    table.insert(kv.key.clone(), kv.value.clone());
                }
            }
        }
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl VariableResolver for TableResolver {
    fn resolve(&self, text: &str) -> String {
        self.table
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
