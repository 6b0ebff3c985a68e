//! Arena-backed syntax tree handed over by the host parser.
//!
//! Nodes are stored in a flat vector and addressed by [`NodeId`]. Each node
//! keeps a non-owning link to its parent, set once when the node is pushed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a node inside an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

macro_rules! node_types {
    ($($variant:ident),* $(,)?) => {
        /// Discriminator of a syntax tree node.
        ///
        /// Variant names are the node type strings emitted by the Solidity
        /// parser; handlers are keyed on these tags.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeType {
            $(
                #[allow(missing_docs)]
                $variant,
            )*
            /// A node type this engine has no tag for.
            Unknown,
        }

        impl NodeType {
            /// Returns the node type string as emitted by the parser.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                    Self::Unknown => "Unknown",
                }
            }

            /// Maps a parser node type string onto a tag.
            ///
            /// Unrecognized names map to [`NodeType::Unknown`].
            #[must_use]
            pub fn from_name(name: &str) -> Self {
                match name {
                    $(stringify!($variant) => Self::$variant,)*
                    _ => Self::Unknown,
                }
            }
        }
    };
}

node_types!(
    SourceUnit,
    PragmaDirective,
    ImportDirective,
    ContractDefinition,
    InheritanceSpecifier,
    StateVariableDeclaration,
    UsingForDeclaration,
    StructDefinition,
    ModifierDefinition,
    ModifierInvocation,
    FunctionDefinition,
    EventDefinition,
    EnumDefinition,
    EnumValue,
    ParameterList,
    Parameter,
    VariableDeclaration,
    VariableDeclarationStatement,
    UserDefinedTypeName,
    ElementaryTypeName,
    Mapping,
    ArrayTypeName,
    FunctionTypeName,
    Block,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    ForStatement,
    DoWhileStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    EmitStatement,
    ThrowStatement,
    InlineAssemblyStatement,
    FunctionCall,
    MemberAccess,
    IndexAccess,
    BinaryOperation,
    UnaryOperation,
    Conditional,
    TupleExpression,
    Identifier,
    NumberLiteral,
    BooleanLiteral,
    StringLiteral,
    HexLiteral,
);

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared visibility of a function or variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// No visibility keyword was written.
    Default,
    /// `public`
    Public,
    /// `private`
    Private,
    /// `internal`
    Internal,
    /// `external`
    External,
}

impl Visibility {
    /// Parses a visibility keyword as emitted by the parser.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::Default),
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "internal" => Some(Self::Internal),
            "external" => Some(Self::External),
            _ => None,
        }
    }

    /// Returns the keyword for this visibility.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source position of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a span from a line and column, without byte range.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte range of this span.
    #[must_use]
    pub fn with_range(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A syntax tree node with the attributes rules inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    node_type: NodeType,
    type_name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Declared identifier, if the node has one.
    pub name: Option<String>,
    /// Declaration kind (`contract`, `interface`, `library`, ...).
    pub kind: Option<String>,
    /// Declared visibility.
    pub visibility: Option<Visibility>,
    /// Whether a variable is declared `constant`.
    pub is_declared_const: bool,
    /// Source position.
    pub span: Option<Span>,
}

impl Node {
    /// Creates a node with the given tag and no attributes.
    #[must_use]
    pub fn new(node_type: NodeType) -> Self {
        Self::from_parts(node_type, node_type.as_str().to_string())
    }

    /// Creates a node from a parser type string.
    ///
    /// The original string is kept so unknown types still display correctly.
    #[must_use]
    pub fn from_type_name(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self::from_parts(NodeType::from_name(&type_name), type_name)
    }

    fn from_parts(node_type: NodeType, type_name: String) -> Self {
        Self {
            node_type,
            type_name,
            parent: None,
            children: Vec::new(),
            name: None,
            kind: None,
            visibility: None,
            is_declared_const: false,
            span: None,
        }
    }

    /// Sets the declared name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declaration kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Marks the node as a `constant` declaration.
    #[must_use]
    pub fn with_const(mut self, is_declared_const: bool) -> Self {
        self.is_declared_const = is_declared_const;
        self
    }

    /// Sets the source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Returns the dispatch tag.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the type string reported by the parser.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the parent id, if any.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child ids in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Errors raised while building an [`Ast`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AstError {
    /// The parent id does not belong to this arena.
    #[error("parent node {0:?} does not exist")]
    UnknownParent(NodeId),
}

/// Arena of syntax tree nodes.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node without a parent and returns its id.
    pub fn push_root(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            ..node
        });
        id
    }

    /// Adds a node under `parent` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::UnknownParent`] if `parent` is not in this tree.
    pub fn push_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, AstError> {
        if parent.0 >= self.nodes.len() {
            return Err(AstError::UnknownParent(parent));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            ..node
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a handle to the node with the given id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { ast: self, id })
    }

    /// Returns the first root node.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.nodes().find(|n| n.node().parent.is_none())
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len()).map(move |i| NodeRef {
            ast: self,
            id: NodeId(i),
        })
    }
}

/// Borrowed handle to a node and the tree it lives in.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Returns the node id.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Returns the underlying node.
    #[must_use]
    pub fn node(self) -> &'a Node {
        &self.ast.nodes[self.id.0]
    }

    /// Returns the dispatch tag.
    #[must_use]
    pub fn node_type(self) -> NodeType {
        self.node().node_type
    }

    /// Returns the parser type string.
    #[must_use]
    pub fn type_name(self) -> &'a str {
        &self.node().type_name
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(self) -> Option<&'a str> {
        self.node().name.as_deref()
    }

    /// Returns the declaration kind.
    #[must_use]
    pub fn kind(self) -> Option<&'a str> {
        self.node().kind.as_deref()
    }

    /// Returns the declared visibility.
    #[must_use]
    pub fn visibility(self) -> Option<Visibility> {
        self.node().visibility
    }

    /// Returns whether the node is a `constant` declaration.
    #[must_use]
    pub fn is_declared_const(self) -> bool {
        self.node().is_declared_const
    }

    /// Returns the source span.
    #[must_use]
    pub fn span(self) -> Option<Span> {
        self.node().span
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.node().parent.and_then(|id| self.ast.get(id))
    }

    /// Iterates over the children in source order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> {
        let ast = self.ast;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { ast, id })
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("type", &self.type_name())
            .field("name", &self.name())
            .finish()
    }
}
