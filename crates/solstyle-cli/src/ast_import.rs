//! Import of syntax trees serialized as JSON by an external Solidity parser.
//!
//! Every JSON object with a string `type` field becomes a node. Its parent is
//! the nearest enclosing typed object. Untyped objects and arrays are searched
//! for nested nodes but do not create nodes themselves. Children keep the
//! order their fields appear in the JSON.

use serde_json::{Map, Value};
use solstyle_core::{Ast, AstError, Node, NodeId, Span, Visibility};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fields holding position data rather than child nodes.
const POSITION_FIELDS: &[&str] = &["loc", "range"];

/// Errors raised while importing a syntax tree.
#[derive(Debug, Error)]
pub enum ImportError {
    /// IO error reading the file.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not a node.
    #[error("Top-level JSON value has no string `type` field")]
    NotANode,

    /// A node could not be attached to the tree.
    #[error(transparent)]
    Ast(#[from] AstError),
}

/// Reads and imports a syntax tree file.
pub fn load_file(path: &Path) -> Result<Ast, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    from_json_str(&content)
}

/// Imports a syntax tree from a JSON string.
pub fn from_json_str(content: &str) -> Result<Ast, ImportError> {
    let value: Value = serde_json::from_str(content)?;
    from_value(&value)
}

/// Imports a syntax tree from a parsed JSON value.
pub fn from_value(value: &Value) -> Result<Ast, ImportError> {
    let Some(object) = value.as_object().filter(|o| type_name(o).is_some()) else {
        return Err(ImportError::NotANode);
    };

    let mut ast = Ast::new();
    import(&mut ast, None, object)?;
    Ok(ast)
}

fn type_name(object: &Map<String, Value>) -> Option<&str> {
    object.get("type").and_then(Value::as_str)
}

fn import(
    ast: &mut Ast,
    parent: Option<NodeId>,
    object: &Map<String, Value>,
) -> Result<(), ImportError> {
    let parent = match type_name(object) {
        Some(name) => {
            let node = to_node(name, object);
            Some(match parent {
                Some(parent) => ast.push_child(parent, node)?,
                None => ast.push_root(node),
            })
        }
        None => parent,
    };

    for (key, value) in object {
        if POSITION_FIELDS.contains(&key.as_str()) {
            continue;
        }
        import_value(ast, parent, value)?;
    }
    Ok(())
}

fn import_value(ast: &mut Ast, parent: Option<NodeId>, value: &Value) -> Result<(), ImportError> {
    match value {
        Value::Object(object) => import(ast, parent, object),
        Value::Array(items) => {
            for item in items {
                import_value(ast, parent, item)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn to_node(type_name: &str, object: &Map<String, Value>) -> Node {
    let str_field = |key: &str| object.get(key).and_then(Value::as_str);

    let mut node = Node::from_type_name(type_name);
    if let Some(name) = str_field("name") {
        node = node.with_name(name);
    }
    if let Some(kind) = str_field("kind") {
        node = node.with_kind(kind);
    }
    if let Some(visibility) = str_field("visibility").and_then(Visibility::from_name) {
        node = node.with_visibility(visibility);
    }
    let is_const = object
        .get("isDeclaredConst")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    node = node.with_const(is_const);
    if let Some(span) = span(object) {
        node = node.with_span(span);
    }
    node
}

/// Reads `loc.start` (0-based column) and the inclusive `range`.
fn span(object: &Map<String, Value>) -> Option<Span> {
    let start = object.get("loc")?.get("start")?;
    let line = as_usize(start.get("line")?)?;
    let column = as_usize(start.get("column")?)?;
    let span = Span::new(line, column + 1);

    let range = object
        .get("range")
        .and_then(Value::as_array)
        .and_then(|r| Some((as_usize(r.first()?)?, as_usize(r.get(1)?)?)));

    Some(match range {
        Some((begin, end)) if end >= begin => span.with_range(begin, end - begin + 1),
        _ => span,
    })
}

fn as_usize(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|n| usize::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solstyle_core::NodeType;

    const LIBRARY_JSON: &str = r#"{
        "type": "SourceUnit",
        "children": [
            {
                "type": "ContractDefinition",
                "name": "Math",
                "kind": "library",
                "baseContracts": [],
                "loc": { "start": { "line": 2, "column": 0 }, "end": { "line": 6, "column": 0 } },
                "range": [26, 120],
                "subNodes": [
                    {
                        "type": "FunctionDefinition",
                        "name": "_add",
                        "visibility": "internal",
                        "parameters": { "type": "ParameterList", "parameters": [] },
                        "body": { "type": "Block", "statements": [] },
                        "loc": { "start": { "line": 3, "column": 4 }, "end": { "line": 3, "column": 40 } },
                        "range": [45, 81]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn imports_nodes_with_parent_links() {
        let ast = from_json_str(LIBRARY_JSON).unwrap();
        let function = ast
            .nodes()
            .find(|n| n.node_type() == NodeType::FunctionDefinition)
            .unwrap();

        assert_eq!(function.name(), Some("_add"));
        assert_eq!(function.visibility(), Some(Visibility::Internal));
        let parent = function.parent().unwrap();
        assert_eq!(parent.kind(), Some("library"));
        assert_eq!(parent.parent().unwrap().node_type(), NodeType::SourceUnit);
        assert_eq!(function.children().count(), 2);
    }

    #[test]
    fn children_follow_field_order() {
        let ast = from_json_str(
            r#"{
                "type": "FunctionDefinition",
                "parameters": { "type": "ParameterList" },
                "returnParameters": { "type": "ParameterList" },
                "body": { "type": "Block" }
            }"#,
        )
        .unwrap();

        let children: Vec<NodeType> = ast
            .root()
            .unwrap()
            .children()
            .map(|n| n.node_type())
            .collect();
        assert_eq!(
            children,
            vec![
                NodeType::ParameterList,
                NodeType::ParameterList,
                NodeType::Block
            ]
        );
    }

    #[test]
    fn reads_spans() {
        let ast = from_json_str(LIBRARY_JSON).unwrap();
        let function = ast
            .nodes()
            .find(|n| n.node_type() == NodeType::FunctionDefinition)
            .unwrap();

        let span = function.span().unwrap();
        assert_eq!((span.line, span.column), (3, 5));
        assert_eq!((span.offset, span.length), (45, 37));
    }

    #[test]
    fn reads_constant_variables() {
        let ast = from_json_str(
            r#"{
                "type": "StateVariableDeclaration",
                "variables": [
                    { "type": "VariableDeclaration", "name": "_CAP", "visibility": "default", "isDeclaredConst": true }
                ]
            }"#,
        )
        .unwrap();

        let variable = ast.root().unwrap().children().next().unwrap();
        assert!(variable.is_declared_const());
        assert_eq!(variable.visibility(), Some(Visibility::Default));
        assert!(variable.span().is_none());
    }

    #[test]
    fn keeps_unknown_types() {
        let ast = from_json_str(r#"{ "type": "YulBlock", "operations": [] }"#).unwrap();
        let root = ast.root().unwrap();
        assert_eq!(root.node_type(), NodeType::Unknown);
        assert_eq!(root.type_name(), "YulBlock");
    }

    #[test]
    fn rejects_untyped_root() {
        assert!(matches!(
            from_json_str(r#"{ "children": [] }"#),
            Err(ImportError::NotANode)
        ));
        assert!(matches!(from_json_str("[1, 2]"), Err(ImportError::NotANode)));
        assert!(matches!(from_json_str("{"), Err(ImportError::Json(_))));
    }

    #[test]
    fn load_file_reports_missing_path() {
        let err = load_file(Path::new("/nonexistent/Token.sol.json")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
