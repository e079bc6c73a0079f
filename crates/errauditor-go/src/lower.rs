//! Lowering from the tree-sitter-go concrete tree to the audit syntax model.
//!
//! Only the shapes the audit inspects get a dedicated node; every other
//! construct is kept as [`Node::Other`] with its named children so that
//! returns inside `if`, `for`, `switch`, `select` and function literals are
//! still found. Comments are dropped.

use errauditor_core::syntax::{
    Decl, FunctionDecl, LiteralKind, Node, Position, ResultField, Signature, SyntaxTree, TypeExpr,
};
use errauditor_error::{Error, Result};
use tracing::trace;
use tree_sitter::{Node as TsNode, Tree};

use crate::token::*;

const RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

/// Lower a parsed file. Trees containing syntax errors are rejected.
pub fn lower_file(tree: &Tree, text: &str, path: Option<&str>) -> Result<SyntaxTree> {
    let root = tree.root_node();
    if root.has_error() {
        let at = first_error(root).map(position).unwrap_or_default();
        let shown = path.unwrap_or("<memory>");
        return Err(Error::parse_failed(format!("{shown}:{at}: syntax error"))
            .with_operation("go::lower_file")
            .with_context("path", shown));
    }

    let lowering = Lowering { text };
    let mut out = SyntaxTree::new(path);
    for child in named_children(root) {
        match child.kind() {
            PACKAGE_CLAUSE => {
                out.package = named_children(child)
                    .into_iter()
                    .find(|n| n.kind() == PACKAGE_IDENTIFIER)
                    .map(|n| lowering.text(n).to_string());
            }
            FUNCTION_DECLARATION | METHOD_DECLARATION => {
                out.decls.push(Decl::Function(lowering.function(child)));
            }
            kind => out.decls.push(Decl::Other {
                kind,
                position: position(child),
            }),
        }
    }
    Ok(out)
}

struct Lowering<'src> {
    text: &'src str,
}

impl<'src> Lowering<'src> {
    fn text(&self, node: TsNode<'_>) -> &'src str {
        self.text.get(node.byte_range()).unwrap_or_default()
    }

    fn function(&self, node: TsNode<'_>) -> FunctionDecl {
        let name = node
            .child_by_field_name(FIELD_NAME)
            .map(|n| self.text(n))
            .unwrap_or_default();
        let mut func = FunctionDecl::new(name, position(node));

        if let Some(result) = node.child_by_field_name(FIELD_RESULT) {
            func.signature = Some(Signature {
                results: self.results(result),
            });
        }
        if let Some(body) = node.child_by_field_name(FIELD_BODY) {
            func.body = Some(self.nodes(body));
        }

        trace!(name = %func.name, position = %func.position, "lowered function");
        func
    }

    /// `error`, `*T` or `(a, b int, err error)`.
    fn results(&self, result: TsNode<'_>) -> Vec<ResultField> {
        if result.kind() != PARAMETER_LIST {
            return vec![ResultField::unnamed(self.type_expr(result))];
        }

        let mut fields = Vec::new();
        for decl in named_children(result) {
            if decl.kind() != PARAMETER_DECLARATION {
                continue;
            }
            let Some(ty) = decl.child_by_field_name(FIELD_TYPE) else {
                continue;
            };
            let mut cursor = decl.walk();
            let names: Vec<&str> = decl
                .children_by_field_name(FIELD_NAME, &mut cursor)
                .map(|n| self.text(n))
                .collect();
            fields.push(ResultField::named(names, self.type_expr(ty)));
        }
        fields
    }

    fn type_expr(&self, node: TsNode<'_>) -> TypeExpr {
        match node.kind() {
            TYPE_IDENTIFIER => TypeExpr::Named(self.text(node).to_string()),
            _ => TypeExpr::Other(self.text(node).to_string()),
        }
    }

    /// Lower the named children of `node`.
    fn nodes(&self, node: TsNode<'_>) -> Vec<Node> {
        named_children(node)
            .into_iter()
            .map(|child| self.node(child))
            .collect()
    }

    fn node(&self, node: TsNode<'_>) -> Node {
        stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || self.node_inner(node))
    }

    fn node_inner(&self, node: TsNode<'_>) -> Node {
        let at = position(node);
        match node.kind() {
            RETURN_STATEMENT => {
                let children = named_children(node);
                let results = if children.len() == 1 && children[0].kind() == EXPRESSION_LIST {
                    self.nodes(children[0])
                } else {
                    children.into_iter().map(|child| self.node(child)).collect()
                };
                Node::ret(results, at)
            }
            CALL_EXPRESSION => {
                let Some(callee) = node.child_by_field_name(FIELD_FUNCTION) else {
                    return self.other(node);
                };
                let args = node
                    .child_by_field_name(FIELD_ARGUMENTS)
                    .map(|args| self.nodes(args))
                    .unwrap_or_default();
                Node::call(self.node(callee), args, at)
            }
            SELECTOR_EXPRESSION => {
                let (Some(operand), Some(field)) = (
                    node.child_by_field_name(FIELD_OPERAND),
                    node.child_by_field_name(FIELD_FIELD),
                ) else {
                    return self.other(node);
                };
                Node::selector(self.node(operand), self.text(field), at)
            }
            IDENTIFIER | NIL | TRUE | FALSE | IOTA => Node::ident(self.text(node), at),
            INT_LITERAL => Node::literal(LiteralKind::Int, self.text(node), at),
            FLOAT_LITERAL => Node::literal(LiteralKind::Float, self.text(node), at),
            IMAGINARY_LITERAL => Node::literal(LiteralKind::Imaginary, self.text(node), at),
            RUNE_LITERAL => Node::literal(LiteralKind::Char, self.text(node), at),
            INTERPRETED_STRING_LITERAL | RAW_STRING_LITERAL => {
                Node::literal(LiteralKind::String, self.text(node), at)
            }
            _ => self.other(node),
        }
    }

    fn other(&self, node: TsNode<'_>) -> Node {
        Node::other(node.kind(), self.nodes(node), position(node))
    }
}

/// Named, non-comment children.
fn named_children(node: TsNode<'_>) -> Vec<TsNode<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != COMMENT)
        .collect()
}

fn position(node: TsNode<'_>) -> Position {
    let point = node.start_position();
    Position::new(point.row as u32 + 1, point.column as u32 + 1)
}

fn first_error(node: TsNode<'_>) -> Option<TsNode<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<TsNode<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}
