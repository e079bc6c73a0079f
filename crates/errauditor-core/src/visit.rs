//! Depth-first traversal over lowered statement trees.
//!
//! The walk is pre-order and follows source order, so a visitor sees an
//! enclosing node before anything nested in it. Recursion grows the stack on
//! demand, which keeps pathological nesting (long `else if` chains, generated
//! tables of closures) from overflowing.

use crate::syntax::Node;

const RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

/// Receives every node of a walk.
pub trait NodeVisitor<'a> {
    /// Called once per node before its children.
    ///
    /// Return `false` to skip the node's children.
    fn visit(&mut self, node: &'a Node) -> bool;
}

impl<'a, F> NodeVisitor<'a> for F
where
    F: FnMut(&'a Node) -> bool,
{
    fn visit(&mut self, node: &'a Node) -> bool {
        self(node)
    }
}

/// Walk a sequence of sibling nodes (usually a function body).
pub fn walk_nodes<'a, V: NodeVisitor<'a>>(nodes: &'a [Node], visitor: &mut V) {
    for node in nodes {
        walk_node(node, visitor);
    }
}

pub fn walk_node<'a, V: NodeVisitor<'a>>(node: &'a Node, visitor: &mut V) {
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || {
        if !visitor.visit(node) {
            return;
        }
        for child in node.children() {
            walk_node(child, visitor);
        }
    });
}
