//! Construction of navigation trees from their persisted forms.
//!
//! Accepted inputs:
//! - declarative JSON: a bare forest, or `{"tree": <forest>, "index": [...]}`
//! - a generated script declaring `NAVTREE`, `NAVTREEINDEX`, `SYNCONMSG`, `SYNCOFFMSG`
//!
//! Loading is all-or-nothing: nodes are collected in a private builder that is
//! only turned into a [`NavTree`] once every node has been validated.

use std::path::Path;
use std::sync::Arc;

use generational_arena::Index;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::error::{ApplicationError, ApplicationResult};
use super::error_ext::IoResultExt;
use super::script::{read_variables, ScriptVars};
use super::source::{DirectorySource, ScriptSource};
use crate::config::Settings;
use crate::domain::{
    ChildSlot, DomainError, NavDocument, NavIndex, NavTree, NavTreeBuilder, NodeData,
    SyncMessages,
};

const SYNC_ON_VARIABLE: &str = "SYNCONMSG";
const SYNC_OFF_VARIABLE: &str = "SYNCOFFMSG";

/// Loads navigation documents, optionally resolving deferred child scripts.
pub struct NavTreeLoader {
    tree_variable: String,
    index_variable: String,
    strict_deferred: bool,
    source: Option<Arc<dyn ScriptSource>>,
}

impl Default for NavTreeLoader {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl NavTreeLoader {
    /// Loader without a script source: deferred references stay unresolved.
    pub fn new(settings: &Settings) -> Self {
        Self {
            tree_variable: settings.tree_variable.clone(),
            index_variable: settings.index_variable.clone(),
            strict_deferred: settings.strict_deferred,
            source: None,
        }
    }

    /// Resolve deferred child scripts through `source`.
    pub fn with_source(mut self, source: Arc<dyn ScriptSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Parse a declarative forest.
    #[instrument(level = "debug", skip_all)]
    pub fn load_tree_json(&self, text: &str) -> ApplicationResult<NavTree> {
        let value = parse_json(text, "<input>")?;
        self.build_tree(&value, "<input>")
    }

    /// Parse a declarative document: a bare forest or `{"tree": .., "index": ..}`.
    #[instrument(level = "debug", skip_all)]
    pub fn load_document_json(&self, text: &str) -> ApplicationResult<NavDocument> {
        let value = parse_json(text, "<input>")?;
        match &value {
            Value::Array(_) => Ok(NavDocument::new(
                self.build_tree(&value, "<input>")?,
                NavIndex::default(),
            )),
            Value::Object(map) => {
                let forest = map
                    .get("tree")
                    .ok_or_else(|| DomainError::malformed("<input>", "missing \"tree\" member"))?;
                let tree = self.build_tree(forest, "tree")?;
                let index = match map.get("index") {
                    Some(index) => build_index(index, "index")?,
                    None => NavIndex::default(),
                };
                Ok(NavDocument::new(tree, index))
            }
            other => Err(DomainError::malformed(
                "<input>",
                format!("expected an array or an object, found {}", kind(other)),
            )
            .into()),
        }
    }

    /// Parse a generated navigation script.
    #[instrument(level = "debug", skip_all)]
    pub fn load_script(&self, text: &str) -> ApplicationResult<NavDocument> {
        let vars = read_variables(text)?;

        let forest = vars
            .json(&self.tree_variable)
            .ok_or_else(|| {
                DomainError::malformed(
                    self.tree_variable.as_str(),
                    "variable is not declared in script",
                )
            })?
            .map_err(|e| DomainError::malformed(self.tree_variable.as_str(), e.to_string()))?;
        let tree = self.build_tree(&forest, &self.tree_variable)?;

        let index = match vars.json(&self.index_variable) {
            Some(parsed) => {
                let value = parsed.map_err(|e| {
                    DomainError::malformed(self.index_variable.as_str(), e.to_string())
                })?;
                build_index(&value, &self.index_variable)?
            }
            None => NavIndex::default(),
        };

        let mut document = NavDocument::new(tree, index);
        if let Some(sync) = sync_messages(&vars)? {
            document = document.with_sync(sync);
        }
        info!(
            "Loaded navigation tree: {} nodes, {} index entries",
            document.tree.len(),
            document.index.len()
        );
        Ok(document)
    }

    /// Read a script (`.js`) or declarative document (`.json`) from disk.
    #[instrument(level = "debug", skip(self))]
    pub fn load_path(&self, path: &Path) -> ApplicationResult<NavDocument> {
        let text = std::fs::read_to_string(path).with_path_context("read navigation file", path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            self.load_document_json(&text)
        } else {
            self.load_script(&text)
        }
    }

    fn build_tree(&self, forest: &Value, path: &str) -> ApplicationResult<NavTree> {
        let nodes = forest.as_array().ok_or_else(|| {
            DomainError::malformed(path, format!("forest must be an array, found {}", kind(forest)))
        })?;

        let mut builder = NavTreeBuilder::new();
        let mut resolving = Vec::new();
        self.insert_nodes(&mut builder, nodes, path, None, &mut resolving)?;
        Ok(builder.build())
    }

    fn insert_nodes(
        &self,
        builder: &mut NavTreeBuilder,
        nodes: &[Value],
        path: &str,
        parent: Option<Index>,
        resolving: &mut Vec<String>,
    ) -> ApplicationResult<()> {
        for (pos, node) in nodes.iter().enumerate() {
            let node_path = format!("{}[{}]", path, pos);
            self.insert_node(builder, node, &node_path, parent, resolving)?;
        }
        Ok(())
    }

    fn insert_node(
        &self,
        builder: &mut NavTreeBuilder,
        node: &Value,
        path: &str,
        parent: Option<Index>,
        resolving: &mut Vec<String>,
    ) -> ApplicationResult<()> {
        let items = node.as_array().ok_or_else(|| {
            DomainError::malformed(path, format!("node must be an array, found {}", kind(node)))
        })?;
        if !(2..=3).contains(&items.len()) {
            return Err(DomainError::malformed(
                path,
                format!(
                    "expected [label, target, children], found {} elements",
                    items.len()
                ),
            )
            .into());
        }

        let label = match &items[0] {
            Value::String(label) => label.clone(),
            Value::Null => return Err(DomainError::malformed(path, "missing label").into()),
            other => {
                return Err(DomainError::malformed(
                    path,
                    format!("label must be a string, found {}", kind(other)),
                )
                .into())
            }
        };
        let target = match &items[1] {
            Value::String(target) => Some(target.clone()),
            Value::Null => None,
            other => {
                return Err(DomainError::malformed(
                    path,
                    format!("target must be a string or null, found {}", kind(other)),
                )
                .into())
            }
        };
        let data = NodeData { label, target };

        match items.get(2).unwrap_or(&Value::Null) {
            Value::Null => {
                builder.insert_node(data, ChildSlot::Null, parent);
            }
            Value::Array(children) => {
                let idx = builder.insert_node(data, ChildSlot::Inline, parent);
                self.insert_nodes(builder, children, &format!("{}[2]", path), Some(idx), resolving)?;
            }
            Value::String(name) => {
                self.insert_deferred(builder, data, name, path, parent, resolving)?;
            }
            other => {
                return Err(DomainError::malformed(
                    path,
                    format!(
                        "children must be an array, a script name or null, found {}",
                        kind(other)
                    ),
                )
                .into())
            }
        }
        Ok(())
    }

    fn insert_deferred(
        &self,
        builder: &mut NavTreeBuilder,
        data: NodeData,
        name: &str,
        path: &str,
        parent: Option<Index>,
        resolving: &mut Vec<String>,
    ) -> ApplicationResult<()> {
        if !is_script_name(name) {
            return Err(DomainError::malformed(
                path,
                format!("invalid child script name: {:?}", name),
            )
            .into());
        }

        let Some(source) = &self.source else {
            builder.insert_node(data, ChildSlot::Deferred(name.to_string()), parent);
            return Ok(());
        };

        if resolving.iter().any(|n| n == name) {
            return Err(DomainError::CycleDetected(name.to_string()).into());
        }

        let text = source.read_script(name).map_err(|e| ApplicationError::Io {
            context: format!("read child script {}", name),
            source: e,
        })?;
        let Some(text) = text else {
            if self.strict_deferred {
                return Err(DomainError::MissingScript(name.to_string()).into());
            }
            warn!("Child script {} not found, keeping deferred reference", name);
            builder.insert_node(data, ChildSlot::Deferred(name.to_string()), parent);
            return Ok(());
        };

        debug!("Resolving child script {}", name);
        let vars = read_variables(&text)?;
        let children = vars
            .json(name)
            .ok_or_else(|| DomainError::malformed(name, "variable is not declared in script"))?
            .map_err(|e| DomainError::malformed(name, e.to_string()))?;
        let children = children.as_array().ok_or_else(|| {
            DomainError::malformed(
                name,
                format!("child list must be an array, found {}", kind(&children)),
            )
        })?;

        let idx = builder.insert_node(data, ChildSlot::Inline, parent);
        resolving.push(name.to_string());
        self.insert_nodes(builder, children, name, Some(idx), resolving)?;
        resolving.pop();
        Ok(())
    }
}

/// Load a declarative forest with default settings.
pub fn load_tree(text: &str) -> ApplicationResult<NavTree> {
    NavTreeLoader::default().load_tree_json(text)
}

/// Load a generated script with default settings, leaving deferred references unresolved.
pub fn load_script(text: &str) -> ApplicationResult<NavDocument> {
    NavTreeLoader::default().load_script(text)
}

/// Load a file according to `settings`, resolving child scripts from the
/// file's directory when enabled.
pub fn load_path(path: &Path, settings: &Settings) -> ApplicationResult<NavDocument> {
    let mut loader = NavTreeLoader::new(settings);
    if settings.resolve_deferred {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        loader = loader.with_source(Arc::new(DirectorySource::new(dir)));
    }
    loader.load_path(path)
}

fn parse_json(text: &str, path: &str) -> ApplicationResult<Value> {
    serde_json::from_str(text).map_err(|e| DomainError::malformed(path, e.to_string()).into())
}

fn build_index(value: &Value, path: &str) -> ApplicationResult<NavIndex> {
    let entries = value.as_array().ok_or_else(|| {
        DomainError::malformed(path, format!("index must be an array, found {}", kind(value)))
    })?;
    entries
        .iter()
        .enumerate()
        .map(|(pos, entry)| {
            entry.as_str().map(str::to_string).ok_or_else(|| {
                ApplicationError::from(DomainError::malformed(
                    format!("{}[{}]", path, pos),
                    format!("index entry must be a string, found {}", kind(entry)),
                ))
            })
        })
        .collect::<ApplicationResult<Vec<_>>>()
        .and_then(|entries| {
            // chunk lookup is a binary search over the entries
            match entries.windows(2).position(|pair| pair[0] > pair[1]) {
                Some(pos) => Err(DomainError::malformed(
                    format!("{}[{}]", path, pos + 1),
                    format!(
                        "index entries must be sorted, {:?} follows {:?}",
                        entries[pos + 1],
                        entries[pos]
                    ),
                )
                .into()),
                None => Ok(NavIndex::new(entries)),
            }
        })
}

fn sync_messages(vars: &ScriptVars) -> ApplicationResult<Option<SyncMessages>> {
    match (vars.string(SYNC_ON_VARIABLE), vars.string(SYNC_OFF_VARIABLE)) {
        (Some(on), Some(off)) => Ok(Some(SyncMessages { on: on?, off: off? })),
        (Some(_), None) | (None, Some(_)) => {
            warn!(
                "Only one of {} and {} is declared, ignoring sync messages",
                SYNC_ON_VARIABLE, SYNC_OFF_VARIABLE
            );
            Ok(None)
        }
        (None, None) => Ok(None),
    }
}

/// Child script names become file names, so they must be plain identifiers.
fn is_script_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
