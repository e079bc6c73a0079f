//! Lowered syntax model consumed by the audit.
//!
//! Frontends lower their concrete parse trees into this closed set of node
//! shapes. Everything the audit does not care about becomes [`Node::Other`],
//! which still carries its children so nested `return` statements stay
//! reachable.

use std::fmt;
use std::sync::Arc;

/// 1-based line and byte column of a node's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A position resolved against the file it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Option<Arc<str>>,
    pub position: Position,
}

impl Location {
    pub fn new(file: Option<Arc<str>>, position: Position) -> Self {
        Self { file, position }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}", file, self.position),
            None => write!(f, "{}", self.position),
        }
    }
}

/// One parsed source file.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    pub path: Option<Arc<str>>,
    pub package: Option<String>,
    pub decls: Vec<Decl>,
}

impl SyntaxTree {
    pub fn new(path: Option<&str>) -> Self {
        Self {
            path: path.map(Arc::from),
            package: None,
            decls: Vec::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_decl(mut self, decl: Decl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Resolve a position inside this file.
    pub fn locate(&self, position: Position) -> Location {
        Location::new(self.path.clone(), position)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Function(func) => Some(func),
            Decl::Other { .. } => None,
        })
    }
}

/// Top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Function(FunctionDecl),
    /// Imports, types, vars, consts.
    Other { kind: &'static str, position: Position },
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    /// Position of the `func` keyword.
    pub position: Position,
    pub signature: Option<Signature>,
    /// `None` for declarations without a body (assembly stubs).
    pub body: Option<Vec<Node>>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            signature: None,
            body: None,
        }
    }

    pub fn with_results(mut self, results: Vec<ResultField>) -> Self {
        self.signature = Some(Signature { results });
        self
    }

    pub fn with_body(mut self, body: Vec<Node>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn has_error_result(&self) -> bool {
        self.error_result_index().is_some()
    }

    pub fn error_result_index(&self) -> Option<usize> {
        crate::classify::classify_function(self.signature.as_ref()).1
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub results: Vec<ResultField>,
}

/// One entry of a result list. `(a, b int)` is a single field with two names.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultField {
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl ResultField {
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }

    pub fn named<I, S>(names: I, ty: TypeExpr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty,
        }
    }

    /// Number of result values this field declares.
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A bare type name such as `error` or `int`.
    Named(String),
    /// Any other type; the source text is kept for display.
    Other(String),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named(name) => Some(name),
            TypeExpr::Other(_) => None,
        }
    }
}

/// Statement or expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Return(ReturnStmt),
    Call(CallExpr),
    Selector(SelectorExpr),
    Ident(Ident),
    Literal(Literal),
    Other(OtherNode),
}

impl Node {
    pub fn position(&self) -> Position {
        match self {
            Node::Return(node) => node.position,
            Node::Call(node) => node.position,
            Node::Selector(node) => node.position,
            Node::Ident(node) => node.position,
            Node::Literal(node) => node.position,
            Node::Other(node) => node.position,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Return(node) => node.results.iter().collect(),
            Node::Call(node) => std::iter::once(node.callee.as_ref())
                .chain(node.args.iter())
                .collect(),
            Node::Selector(node) => vec![node.operand.as_ref()],
            Node::Ident(_) | Node::Literal(_) => Vec::new(),
            Node::Other(node) => node.children.iter().collect(),
        }
    }

    pub fn ident(name: impl Into<String>, position: Position) -> Self {
        Node::Ident(Ident {
            name: name.into(),
            position,
        })
    }

    pub fn literal(kind: LiteralKind, text: impl Into<String>, position: Position) -> Self {
        Node::Literal(Literal {
            kind,
            text: text.into(),
            position,
        })
    }

    pub fn selector(operand: Node, member: impl Into<String>, position: Position) -> Self {
        Node::Selector(SelectorExpr {
            operand: Box::new(operand),
            member: member.into(),
            position,
        })
    }

    pub fn call(callee: Node, args: Vec<Node>, position: Position) -> Self {
        Node::Call(CallExpr {
            callee: Box::new(callee),
            args,
            position,
        })
    }

    pub fn ret(results: Vec<Node>, position: Position) -> Self {
        Node::Return(ReturnStmt { results, position })
    }

    pub fn other(kind: &'static str, children: Vec<Node>, position: Position) -> Self {
        Node::Other(OtherNode {
            kind,
            children,
            position,
        })
    }

    /// Move direct children into `out`, leaving `self` a leaf.
    fn detach_children(&mut self, out: &mut Vec<Node>) {
        match self {
            Node::Return(node) => out.append(&mut node.results),
            Node::Call(node) => {
                out.append(&mut node.args);
                if !node.callee.is_leaf() {
                    out.push(std::mem::replace(&mut *node.callee, Node::placeholder()));
                }
            }
            Node::Selector(node) => {
                if !node.operand.is_leaf() {
                    out.push(std::mem::replace(&mut *node.operand, Node::placeholder()));
                }
            }
            Node::Ident(_) | Node::Literal(_) => {}
            Node::Other(node) => out.append(&mut node.children),
        }
    }

    fn is_leaf(&self) -> bool {
        match self {
            Node::Return(node) => node.results.is_empty(),
            Node::Call(_) | Node::Selector(_) => false,
            Node::Ident(_) | Node::Literal(_) => true,
            Node::Other(node) => node.children.is_empty(),
        }
    }

    fn placeholder() -> Self {
        Node::ident(String::new(), Position::default())
    }
}

// Nesting depth is bounded only by the input, so dropping must not recurse.
impl Drop for Node {
    fn drop(&mut self) {
        if self.is_leaf() {
            return;
        }
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub results: Vec<Node>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Node>,
    pub args: Vec<Node>,
    pub position: Position,
}

/// `operand.member`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorExpr {
    pub operand: Box<Node>,
    pub member: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    Imaginary,
    Char,
    String,
}

/// Basic literal; `text` is the verbatim source, quotes included.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub text: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OtherNode {
    pub kind: &'static str,
    pub children: Vec<Node>,
    pub position: Position,
}
