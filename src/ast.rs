/// Raw structural tree produced by the parser: one `{ ... }` block, or the
/// whole file at the top level.
///
/// Keys repeat freely in this dialect (logical operators like `OR` and `NOT`
/// are keys), so everything is an ordered sequence in document order rather
/// than a map. The document model consumes this as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    /// Nested blocks, `key = { ... }`.
    pub children: Vec<(String, Block)>,
    /// Plain `key = value` pairs, values unresolved.
    pub pairs: Vec<(String, String)>,
    /// Free-standing tokens in the block: list entries and comments.
    pub values: Vec<String>,
}
