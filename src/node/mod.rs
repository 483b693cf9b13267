use std::fmt;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use serde::Serialize;

use crate::ast::Block;
use crate::resolver::{IdentityResolver, VariableResolver};

/// Handle for a node inside its [`DocumentTree`] arena.
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// A plain `key = value` entry as it appears in the file, value unresolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    #[serde(skip)]
    node: NodeId,
}

impl KeyValue {
    /// The node this pair belongs to; pass to [`DocumentTree::node`] to get
    /// the handle back. Non-owning, an id only.
    pub fn node_id(&self) -> NodeId {
        self.node
    }
}

/// A `key = value` entry with its value passed through the tree's variable
/// resolver. Same shape as [`KeyValue`] so consumers can treat both alike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedKeyValue {
    pub key: String,
    pub value: String,
    #[serde(skip)]
    node: NodeId,
}

impl ResolvedKeyValue {
    pub fn node_id(&self) -> NodeId {
        self.node
    }
}

struct NodeData {
    key: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    raw_pairs: Vec<KeyValue>,
    scalars: Vec<String>,
    /// Resolved view of `raw_pairs`, computed on first access and kept for
    /// the tree's lifetime. Swapping the resolver afterwards does NOT
    /// recompute entries already resolved.
    resolved: OnceCell<Vec<ResolvedKeyValue>>,
}

/// One parsed file: an arena of nodes rooted at the file node.
///
/// Structure is fixed at construction; the only interior mutation is the
/// per-node memoized resolved-pair view, which is why the tree is meant for
/// single-threaded traversal (parse in parallel across files instead).
pub struct DocumentTree {
    nodes: Vec<NodeData>,
    resolver: Arc<dyn VariableResolver>,
}

impl DocumentTree {
    /// Build a tree from a raw parsed block, with the identity resolver.
    pub fn from_block(key: impl Into<String>, block: Block) -> Self {
        Self::with_resolver(key, block, Arc::new(IdentityResolver))
    }

    /// Build a tree from a raw parsed block. The resolver instance is shared
    /// by every node of the tree.
    pub fn with_resolver(
        key: impl Into<String>,
        block: Block,
        resolver: Arc<dyn VariableResolver>,
    ) -> Self {
        let mut tree = DocumentTree {
            nodes: Vec::new(),
            resolver,
        };
        tree.insert(key.into(), block, None);
        tree
    }

    fn insert(&mut self, key: String, block: Block, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let Block {
            children,
            pairs,
            values,
        } = block;
        self.nodes.push(NodeData {
            key,
            parent,
            children: Vec::new(),
            raw_pairs: pairs
                .into_iter()
                .map(|(key, value)| KeyValue { key, value, node: id })
                .collect(),
            scalars: values,
            resolved: OnceCell::new(),
        });
        let child_ids: Vec<NodeId> = children
            .into_iter()
            .map(|(child_key, child_block)| self.insert(child_key, child_block, Some(id)))
            .collect();
        self.nodes[id.0 as usize].children = child_ids;
        id
    }

    /// The node representing the whole file.
    pub fn root(&self) -> DocumentNode<'_> {
        DocumentNode {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Handle for an id previously obtained from this tree.
    pub fn node(&self, id: NodeId) -> DocumentNode<'_> {
        debug_assert!((id.0 as usize) < self.nodes.len());
        DocumentNode { tree: self, id }
    }

    pub fn resolver(&self) -> &Arc<dyn VariableResolver> {
        &self.resolver
    }

    /// Swap the resolver for the whole tree.
    ///
    /// Must happen before any resolved-pair access: nodes whose resolved
    /// view was already computed keep the old values. Raw lookups and
    /// `get_key_value` pick up the new resolver either way.
    pub fn set_resolver(&mut self, resolver: Arc<dyn VariableResolver>) {
        self.resolver = resolver;
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0 as usize]
    }
}

impl fmt::Debug for DocumentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentTree")
            .field("root", &self.nodes.first().map(|n| n.key.as_str()))
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// Read-only handle to one node of a [`DocumentTree`].
///
/// Cheap to copy; borrows the tree, so it cannot outlive it and never keeps
/// any part of the tree alive on its own.
#[derive(Clone, Copy)]
pub struct DocumentNode<'t> {
    tree: &'t DocumentTree,
    id: NodeId,
}

impl<'t> DocumentNode<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'t str {
        &self.data().key
    }

    /// The containing node; `None` for the file-root node.
    pub fn parent(&self) -> Option<DocumentNode<'t>> {
        let tree = self.tree;
        self.data().parent.map(|id| DocumentNode { tree, id })
    }

    /// Child nodes in document order. Duplicate keys are expected and
    /// preserved; keys like `OR` repeat freely.
    pub fn children(&self) -> impl Iterator<Item = DocumentNode<'t>> + use<'t> {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| DocumentNode { tree, id })
    }

    /// All `key = value` pairs with their raw, unresolved values, in
    /// document order.
    pub fn raw_key_values(&self) -> &'t [KeyValue] {
        &self.data().raw_pairs
    }

    /// All `key = value` pairs with `@variable` values resolved.
    ///
    /// Computed through the tree's resolver on first access and cached for
    /// the tree's lifetime. Same length and key order as
    /// [`raw_key_values`](Self::raw_key_values).
    pub fn key_values(&self) -> &'t [ResolvedKeyValue] {
        let data = self.data();
        data.resolved.get_or_init(|| {
            data.raw_pairs
                .iter()
                .map(|kv| ResolvedKeyValue {
                    key: kv.key.clone(),
                    value: self.tree.resolver.resolve(&kv.value),
                    node: kv.node,
                })
                .collect()
        })
    }

    /// Free-standing values in the node: list entries and retained comments.
    pub fn values(&self) -> &'t [String] {
        &self.data().scalars
    }

    /// First child node with the given key, in document order.
    ///
    /// Use with caution when keys repeat; only the first match is visible
    /// here. Use [`get_nodes`](Self::get_nodes) for all of them.
    pub fn get_node(&self, key: &str) -> Option<DocumentNode<'t>> {
        self.children().find(|node| node.key() == key)
    }

    /// All child nodes with the given key, in document order.
    pub fn get_nodes(&self, key: &str) -> Vec<DocumentNode<'t>> {
        self.children().filter(|node| node.key() == key).collect()
    }

    /// Run `perform` on every child node with the given key, in order.
    pub fn act_on_nodes(&self, key: &str, perform: impl FnMut(DocumentNode<'t>)) {
        self.act_on_nodes_or_else(key, perform, || {});
    }

    /// Run `perform` on every child node with the given key; if none match,
    /// run `if_no_match` once instead.
    pub fn act_on_nodes_or_else(
        &self,
        key: &str,
        mut perform: impl FnMut(DocumentNode<'t>),
        if_no_match: impl FnOnce(),
    ) {
        let mut matched = false;
        for node in self.children().filter(|node| node.key() == key) {
            matched = true;
            perform(node);
        }
        if !matched {
            if_no_match();
        }
    }

    /// Value of the first pair with the given key, unresolved. `None` when
    /// the key is absent, never an empty string standing in for "not found".
    pub fn get_raw_key_value(&self, key: &str) -> Option<&'t str> {
        self.raw_key_values()
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| kv.value.as_str())
    }

    /// Value of the first pair with the given key, passed through the
    /// tree's resolver. An absent key is `None`; no substitution is
    /// attempted on a missing key.
    pub fn get_key_value(&self, key: &str) -> Option<String> {
        self.get_raw_key_value(key)
            .map(|value| self.tree.resolver.resolve(value))
    }

    /// Like [`get_key_value`](Self::get_key_value), but an absent key yields
    /// the supplied default instead.
    ///
    /// The default is itself passed through the resolver, so a default that
    /// reads like a `@variable` token gets substituted. Deliberate: callers
    /// use variables as defaults.
    pub fn get_key_value_or_default(&self, key: &str, default: impl ToString) -> String {
        let raw = match self.get_raw_key_value(key) {
            Some(value) => value.to_string(),
            None => default.to_string(),
        };
        self.tree.resolver.resolve(&raw)
    }

    /// Run `perform` on the resolved value of every pair with the given key,
    /// in document order.
    pub fn act_on_key_values(&self, key: &str, mut perform: impl FnMut(&str)) {
        for kv in self.key_values().iter().filter(|kv| kv.key == key) {
            perform(&kv.value);
        }
    }
}

impl fmt::Debug for DocumentNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentNode")
            .field("key", &self.key())
            .field("id", &self.id)
            .finish()
    }
}

impl PartialEq for DocumentNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<'t> DocumentNode<'t> {
    fn data(&self) -> &'t NodeData {
        self.tree.data(self.id)
    }
}

#[cfg(test)]
mod tests;
