use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::node::DocumentTree;
use crate::parser::Parser;
use crate::resolver::{IdentityResolver, VariableResolver};
use crate::ScriptError;

/// Facade that turns discovered file paths into [`DocumentTree`]s, attaching
/// the configured variable resolver to each.
pub struct DocumentBuilder {
    resolver: Arc<dyn VariableResolver>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Builder whose trees resolve nothing (identity resolver).
    pub fn new() -> Self {
        Self {
            resolver: Arc::new(IdentityResolver),
        }
    }

    /// Builder whose trees share the given resolver, one instance across
    /// every tree it produces.
    pub fn with_resolver(resolver: Arc<dyn VariableResolver>) -> Self {
        Self { resolver }
    }

    /// Parse a single script file into a document tree rooted at the file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<DocumentTree, ScriptError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScriptError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => path.to_string_lossy().to_string(),
        };
        self.parse_str(&content, &name)
    }

    /// Parse script text directly, no file I/O. The root node takes `name`
    /// as its key.
    pub fn parse_str(&self, input: &str, name: &str) -> Result<DocumentTree, ScriptError> {
        let mut parser = Parser::new(input)?;
        let block = parser.parse_file()?;
        Ok(DocumentTree::with_resolver(
            name,
            block,
            Arc::clone(&self.resolver),
        ))
    }

    /// Parse a batch of files into a path-keyed map of trees. Paths are used
    /// as map keys verbatim; treat the map as a lookup structure.
    ///
    /// With `continue_on_failure` false (the usual case) the first failing
    /// file aborts the whole batch. With it true a failing file is logged,
    /// left out of the map, and the batch carries on.
    pub fn parse_files<I, P>(
        &self,
        paths: I,
        continue_on_failure: bool,
    ) -> Result<IndexMap<PathBuf, DocumentTree>, ScriptError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut parsed = IndexMap::new();
        for path in paths {
            let path: PathBuf = path.into();
            match self.parse_file(&path) {
                Ok(tree) => {
                    debug!("parsed {}", path.display());
                    parsed.insert(path, tree);
                }
                Err(e) if continue_on_failure => {
                    warn!("skipping {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(parsed)
    }
}
