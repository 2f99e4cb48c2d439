//! The operation node and its construction descriptor.
//!
//! `OpNode` is the single base representation shared by both concrete IR
//! forms. The form-specific traversal payload lives in [`OpForm`]: a
//! graph-form node may branch to successor blocks, a tree-form node may own
//! nested regions. Everything else (name, location, attributes, operands,
//! result types) is stored once, uniformly for both forms.

use cranelift_entity::EntityList;
use smallvec::SmallVec;

use crate::attrs::{AttrMap, Attribute};
use crate::location::Location;
use crate::refs::{BlockId, RegionId, TypeId, ValueId};
use crate::symbol::Symbol;

/// Which concrete IR form a node belongs to. Fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Free-floating instruction in a control-flow graph.
    Graph,
    /// Statement nested in a block tree.
    Tree,
}

/// Form-specific payload of a node.
#[derive(Clone, Debug)]
pub enum OpForm {
    /// Graph-form: may transfer control to successor blocks.
    Graph { successors: SmallVec<[BlockId; 2]> },
    /// Tree-form: may own nested regions.
    Tree { regions: SmallVec<[RegionId; 2]> },
}

impl OpForm {
    pub fn kind(&self) -> OpKind {
        match self {
            OpForm::Graph { .. } => OpKind::Graph,
            OpForm::Tree { .. } => OpKind::Tree,
        }
    }
}

/// Data for a single operation node in the arena.
///
/// Operand and result-type lists are pool-backed `EntityList`s; use the
/// accessors on [`Context`](crate::Context) to read them.
pub struct OpNode {
    pub dialect: Symbol,
    pub name: Symbol,
    pub location: Option<Location>,
    pub attrs: AttrMap,
    pub operands: EntityList<ValueId>,
    pub result_types: EntityList<TypeId>,
    pub form: OpForm,
    pub parent_block: Option<BlockId>,
}

impl OpNode {
    /// Format the full name as "dialect.name".
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.dialect, self.name)
    }

    pub fn kind(&self) -> OpKind {
        self.form.kind()
    }
}

/// Transient descriptor for a node under construction.
///
/// Accumulates the pieces of a new node (operands, result types, attributes,
/// form payload) before [`build`](OpBuilder::build) hands them to the arena.
/// Stack-bound by design; never store one in a collection. No validation
/// happens here; shape checking is the business of external verify hooks.
pub struct OpBuilder {
    kind: OpKind,
    dialect: Symbol,
    name: Symbol,
    location: Option<Location>,
    operands: Vec<ValueId>,
    result_types: Vec<TypeId>,
    attrs: AttrMap,
    successors: SmallVec<[BlockId; 2]>,
    regions: SmallVec<[RegionId; 2]>,
}

impl OpBuilder {
    /// Start describing a graph-form node.
    pub fn graph(dialect: Symbol, name: Symbol) -> Self {
        Self::with_kind(OpKind::Graph, dialect, name)
    }

    /// Start describing a tree-form node.
    pub fn tree(dialect: Symbol, name: Symbol) -> Self {
        Self::with_kind(OpKind::Tree, dialect, name)
    }

    pub fn with_kind(kind: OpKind, dialect: Symbol, name: Symbol) -> Self {
        Self {
            kind,
            dialect,
            name,
            location: None,
            operands: Vec::new(),
            result_types: Vec::new(),
            attrs: AttrMap::new(),
            successors: SmallVec::new(),
            regions: SmallVec::new(),
        }
    }

    /// Parse "dialect.name" and start a descriptor of the given kind.
    ///
    /// # Panics
    ///
    /// Panics if `full_name` contains no `.` separator.
    pub fn named(kind: OpKind, full_name: &str) -> Self {
        let (dialect, name) = full_name
            .split_once('.')
            .expect("operation name must be 'dialect.name'");
        Self::with_kind(
            kind,
            Symbol::from_dynamic(dialect),
            Symbol::from_dynamic(name),
        )
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn operand(mut self, value: ValueId) -> Self {
        self.operands.push(value);
        self
    }

    pub fn operands(mut self, values: impl IntoIterator<Item = ValueId>) -> Self {
        self.operands.extend(values);
        self
    }

    pub fn result(mut self, ty: TypeId) -> Self {
        self.result_types.push(ty);
        self
    }

    pub fn results(mut self, tys: impl IntoIterator<Item = TypeId>) -> Self {
        self.result_types.extend(tys);
        self
    }

    pub fn attr(mut self, name: impl Into<Symbol>, value: Attribute) -> Self {
        self.attrs.set(name.into(), value);
        self
    }

    /// Add a successor block.
    ///
    /// # Panics
    ///
    /// Panics on a tree-form descriptor; only graph-form nodes branch.
    pub fn successor(mut self, block: BlockId) -> Self {
        assert!(
            self.kind == OpKind::Graph,
            "successors are a graph-form feature; this descriptor is tree-form",
        );
        self.successors.push(block);
        self
    }

    /// Add a nested region.
    ///
    /// # Panics
    ///
    /// Panics on a graph-form descriptor; only tree-form nodes nest.
    pub fn region(mut self, region: RegionId) -> Self {
        assert!(
            self.kind == OpKind::Tree,
            "regions are a tree-form feature; this descriptor is graph-form",
        );
        self.regions.push(region);
        self
    }

    /// Hand the descriptor to the arena; shorthand for
    /// [`Context::create_op`](crate::Context::create_op).
    pub fn build(self, ctx: &mut crate::Context) -> crate::refs::OpId {
        ctx.create_op(self)
    }

    pub(crate) fn into_parts(self) -> OpBuilderParts {
        let form = match self.kind {
            OpKind::Graph => OpForm::Graph {
                successors: self.successors,
            },
            OpKind::Tree => OpForm::Tree {
                regions: self.regions,
            },
        };
        OpBuilderParts {
            dialect: self.dialect,
            name: self.name,
            location: self.location,
            operands: self.operands,
            result_types: self.result_types,
            attrs: self.attrs,
            form,
        }
    }
}

/// Finalized descriptor contents consumed by `Context::create_op`.
pub(crate) struct OpBuilderParts {
    pub dialect: Symbol,
    pub name: Symbol,
    pub location: Option<Location>,
    pub operands: Vec<ValueId>,
    pub result_types: Vec<TypeId>,
    pub attrs: AttrMap,
    pub form: OpForm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_accumulates_incrementally() {
        let parts = OpBuilder::tree(Symbol::new("test"), Symbol::new("x"))
            .attr("flag", Attribute::Bool(true))
            .into_parts();
        assert_eq!(parts.form.kind(), OpKind::Tree);
        assert_eq!(parts.attrs.len(), 1);
        assert!(parts.operands.is_empty());
        assert!(parts.location.is_none());
    }

    #[test]
    fn named_splits_dialect_and_name() {
        let parts = OpBuilder::named(OpKind::Graph, "arith.add").into_parts();
        assert_eq!(parts.dialect, "arith");
        assert_eq!(parts.name, "add");
        assert_eq!(parts.form.kind(), OpKind::Graph);
    }

    #[test]
    #[should_panic(expected = "graph-form feature")]
    fn tree_descriptor_rejects_successors() {
        use cranelift_entity::EntityRef;
        let _ = OpBuilder::tree(Symbol::new("test"), Symbol::new("x")).successor(BlockId::new(0));
    }

    #[test]
    #[should_panic(expected = "tree-form feature")]
    fn graph_descriptor_rejects_regions() {
        use cranelift_entity::EntityRef;
        let _ = OpBuilder::graph(Symbol::new("test"), Symbol::new("x")).region(RegionId::new(0));
    }
}
