pub mod ast;
pub mod builder;
pub mod discovery;
pub mod error;
pub mod export;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod resolver;

pub use builder::DocumentBuilder;
pub use discovery::find_files_in_tree;
pub use error::ScriptError;
pub use node::{DocumentNode, DocumentTree, KeyValue, NodeId, ResolvedKeyValue};
pub use resolver::{IdentityResolver, TableResolver, VariableResolver};
