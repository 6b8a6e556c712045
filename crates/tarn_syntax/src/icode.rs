//! Intermediate-code tree for the Tarn frontend.
//!
//! Parsing produces a tree of typed nodes that later stages (type checker,
//! interpreter) walk by kind and children. Nodes live in a [`Vec`]-backed
//! arena owned by [`ICode`] and are referenced by [`NodeId`] index, which
//! makes "attach this child unless it is already attached" an explicit,
//! testable operation rather than a pointer-identity accident.
//!
//! ## Notes
//! - Children are ordered; insertion order is structural order.
//! - A node is only ever appended to; nothing mutates a node's existing
//!   children after the owning parse step finishes.
//! - Dropping the [`ICode`] drops every node, attached or not.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::lexer::tokens::{Span, TokenValue};

/// Kind of intermediate-code node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    // ========== Statements ==========
    Compound,
    Assign,
    If,
    Loop,
    /// Accumulates the guard conditions of a `Loop`; the loop exits when any
    /// child expression evaluates true.
    Test,
    NoOp,
    /// Neutral placeholder produced when no construct parser matched. It keeps
    /// the tree structurally valid; downstream stages detect it by kind.
    Error,

    // ========== Expressions ==========
    Variable,
    IntegerConstant,
    RealConstant,
    StringConstant,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Subtract,
    Multiply,
    FloatDivide,
    IntegerDivide,
    Modulo,
    And,
    Or,
    Not,
    Negate,
}

/// Index of a node in its owning [`ICode`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Keys for node-specific attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttrKey {
    /// Identifier name (`Variable` nodes).
    Id,
    /// 1-based source line, set on statement nodes for diagnostics.
    Line,
    /// Literal value (`IntegerConstant` / `RealConstant` / `StringConstant`).
    Value,
}

/// Attribute payload.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Integer(i64),
    Real(f64),
    Str(String),
}

impl From<TokenValue> for AttrValue {
    fn from(value: TokenValue) -> Self {
        match value {
            TokenValue::Integer(i) => AttrValue::Integer(i),
            TokenValue::Real(r) => AttrValue::Real(r),
            TokenValue::Str(s) => AttrValue::Str(s),
        }
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Integer(i) => write!(f, "{i}"),
            AttrValue::Real(r) => write!(f, "{r}"),
            AttrValue::Str(s) => f.write_str(s),
        }
    }
}

impl std::fmt::Display for AttrKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AttrKey::Id => "id",
            AttrKey::Line => "line",
            AttrKey::Value => "value",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NodeData {
    kind: NodeKind,
    span: Span,
    children: Vec<NodeId>,
    attrs: BTreeMap<AttrKey, AttrValue>,
}

/// Arena of intermediate-code nodes; the single writer during a parse run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ICode {
    nodes: Vec<NodeData>,
}

impl ICode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node of the given kind with no children.
    pub fn node(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            span,
            children: Vec::new(),
            attrs: BTreeMap::new(),
        });
        id
    }

    /// Append `child` to `parent`'s ordered child list.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.data_mut(parent).children.push(child);
    }

    /// Append `child` to `parent` unless it is already a child.
    ///
    /// Returns `true` if the child was attached by this call. Used where one
    /// shared node accumulates material across several grammar fragments (the
    /// `Test` node of a `Loop`) and must end up attached exactly once.
    pub fn attach_unique(&mut self, parent: NodeId, child: NodeId) -> bool {
        let data = self.data_mut(parent);
        if data.children.contains(&child) {
            return false;
        }
        data.children.push(child);
        true
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.data(id).kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.data(id).span
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    /// Set (or replace) one attribute.
    pub fn set_attr(&mut self, id: NodeId, key: AttrKey, value: AttrValue) {
        self.data_mut(id).attrs.insert(key, value);
    }

    pub fn attr(&self, id: NodeId, key: AttrKey) -> Option<&AttrValue> {
        self.data(id).attrs.get(&key)
    }

    /// Total number of nodes allocated, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render the subtree under `root` as an indented listing, one node per
    /// line: kind name followed by `key=value` attributes in key order.
    pub fn dump(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.dump_node(root, 0, &mut out);
        // Drop the final newline so callers can embed the listing directly.
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let data = self.data(id);
        for _ in 0..depth {
            out.push_str("  ");
        }
        let _ = write!(out, "{:?}", data.kind);
        for (key, value) in &data.attrs {
            let _ = write!(out, " {key}={value}");
        }
        out.push('\n');
        for &child in &data.children {
            self.dump_node(child, depth + 1, out);
        }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0 as usize]
    }

    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(0, 0)
    }

    #[test]
    fn children_preserve_insertion_order() {
        let mut icode = ICode::new();
        let parent = icode.node(NodeKind::Compound, span());
        let a = icode.node(NodeKind::NoOp, span());
        let b = icode.node(NodeKind::NoOp, span());
        icode.add_child(parent, a);
        icode.add_child(parent, b);
        assert_eq!(icode.children(parent), &[a, b]);
    }

    #[test]
    fn attach_unique_attaches_exactly_once() {
        let mut icode = ICode::new();
        let loop_node = icode.node(NodeKind::Loop, span());
        let test_node = icode.node(NodeKind::Test, span());
        assert!(icode.attach_unique(loop_node, test_node));
        assert!(!icode.attach_unique(loop_node, test_node));
        assert!(!icode.attach_unique(loop_node, test_node));
        assert_eq!(icode.children(loop_node), &[test_node]);
    }

    #[test]
    fn dump_renders_kinds_and_attrs() {
        let mut icode = ICode::new();
        let assign = icode.node(NodeKind::Assign, span());
        let var = icode.node(NodeKind::Variable, span());
        icode.set_attr(var, AttrKey::Id, AttrValue::Str("x".into()));
        let value = icode.node(NodeKind::IntegerConstant, span());
        icode.set_attr(value, AttrKey::Value, AttrValue::Integer(1));
        icode.add_child(assign, var);
        icode.add_child(assign, value);
        assert_eq!(
            icode.dump(assign),
            "Assign\n  Variable id=x\n  IntegerConstant value=1"
        );
    }
}
