//! The owning arena for all IR entities.
//!
//! `Context` stores operation nodes, values, blocks, and regions in
//! `PrimaryMap`s; operand and result-type lists use `EntityList + ListPool`
//! for compact per-node storage. Nodes never own the values they reference
//! (the context does), so erasing a node leaves its operand values intact,
//! and a stale id is an indexing concern rather than a dangling pointer.
//!
//! Single-threaded by design: mutation goes through `&mut self`, shared
//! reads are safe.

use cranelift_entity::{EntityList, ListPool, PrimaryMap, SecondaryMap};
use smallvec::SmallVec;
use thiserror::Error;

use crate::attrs::{AttrMap, Attribute, RemoveResult};
use crate::diagnostics::{self, Diagnostic, Severity};
use crate::location::{Location, PathInterner, Span};
use crate::node::{OpBuilder, OpForm, OpKind, OpNode};
use crate::refs::{BlockId, OpId, RegionId, TypeId, ValueDef, ValueId};
use crate::registry::{self, AbstractOp};
use crate::symbol::Symbol;
use crate::types::TypeInterner;

/// Data for a single SSA value.
pub struct ValueData {
    pub def: ValueDef,
    pub ty: TypeId,
}

/// Data for a basic block.
pub struct BlockData {
    pub location: Option<Location>,
    pub arg_types: Vec<TypeId>,
    pub ops: SmallVec<[OpId; 4]>,
    pub parent_region: Option<RegionId>,
}

/// Data for a region (list of blocks nested under a tree-form node).
pub struct RegionData {
    pub location: Option<Location>,
    pub blocks: SmallVec<[BlockId; 4]>,
    pub parent_op: Option<OpId>,
}

/// Error from [`Context::set_operand`] with an out-of-range index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("operand index {index} out of range: {op} has {len} operand(s)")]
pub struct OperandIndexError {
    pub op: OpId,
    pub index: usize,
    pub len: usize,
}

/// Arena-based IR context. Owns every node, value, block, and region,
/// plus the type and path interners.
pub struct Context {
    ops: PrimaryMap<OpId, OpNode>,
    values: PrimaryMap<ValueId, ValueData>,
    blocks: PrimaryMap<BlockId, BlockData>,
    regions: PrimaryMap<RegionId, RegionData>,

    /// Type and path interners.
    pub types: TypeInterner,
    pub paths: PathInterner,

    /// Backing pools for EntityList storage.
    value_pool: ListPool<ValueId>,
    type_pool: ListPool<TypeId>,

    /// Result values allocated per operation, fixed at construction.
    result_values: SecondaryMap<OpId, EntityList<ValueId>>,
    /// Argument values allocated per block.
    block_arg_values: SecondaryMap<BlockId, EntityList<ValueId>>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            ops: PrimaryMap::new(),
            values: PrimaryMap::new(),
            blocks: PrimaryMap::new(),
            regions: PrimaryMap::new(),
            types: TypeInterner::new(),
            paths: PathInterner::new(),
            value_pool: ListPool::new(),
            type_pool: ListPool::new(),
            result_values: SecondaryMap::new(),
            block_arg_values: SecondaryMap::new(),
        }
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// Materialize a node from its construction descriptor.
    ///
    /// Allocates one result value per result type; result arity never
    /// changes afterwards. Tree-form regions are back-linked to the node.
    ///
    /// # Panics
    ///
    /// Panics if a region in the descriptor already belongs to another node.
    pub fn create_op(&mut self, descriptor: OpBuilder) -> OpId {
        let parts = descriptor.into_parts();

        let mut operands = EntityList::new();
        for value in &parts.operands {
            operands.push(*value, &mut self.value_pool);
        }
        let mut result_types = EntityList::new();
        for ty in &parts.result_types {
            result_types.push(*ty, &mut self.type_pool);
        }

        let regions: SmallVec<[RegionId; 2]> = match &parts.form {
            OpForm::Tree { regions } => regions.clone(),
            OpForm::Graph { .. } => SmallVec::new(),
        };

        let op = self.ops.push(OpNode {
            dialect: parts.dialect,
            name: parts.name,
            location: parts.location,
            attrs: parts.attrs,
            operands,
            result_types,
            form: parts.form,
            parent_block: None,
        });

        for &region in &regions {
            if let Some(existing) = self.regions[region].parent_op {
                panic!("create_op: {region} already belongs to {existing}; cannot reassign to {op}");
            }
            self.regions[region].parent_op = Some(op);
        }

        let mut result_list = EntityList::new();
        for (idx, ty) in parts.result_types.iter().enumerate() {
            let value = self.values.push(ValueData {
                def: ValueDef::OpResult(op, idx as u32),
                ty: *ty,
            });
            result_list.push(value, &mut self.value_pool);
        }
        self.result_values[op] = result_list;

        op
    }

    // ========================================================================
    // Node identity and metadata
    // ========================================================================

    /// Immutable access to the raw node data.
    pub fn node(&self, op: OpId) -> &OpNode {
        &self.ops[op]
    }

    pub fn dialect(&self, op: OpId) -> Symbol {
        self.ops[op].dialect
    }

    pub fn name(&self, op: OpId) -> Symbol {
        self.ops[op].name
    }

    /// The node's name as a (dialect, name) pair.
    pub fn op_name(&self, op: OpId) -> (Symbol, Symbol) {
        let node = &self.ops[op];
        (node.dialect, node.name)
    }

    /// Format the node's full name as "dialect.name".
    pub fn full_name(&self, op: OpId) -> String {
        self.ops[op].full_name()
    }

    /// The form the node was constructed with. Stable for its lifetime.
    pub fn op_kind(&self, op: OpId) -> OpKind {
        self.ops[op].kind()
    }

    pub fn location(&self, op: OpId) -> Option<Location> {
        self.ops[op].location
    }

    /// Registry entry for this node's name, if one was registered.
    pub fn registered_info(&self, op: OpId) -> Option<&'static AbstractOp> {
        let node = &self.ops[op];
        registry::lookup(node.dialect, node.name)
    }

    // ========================================================================
    // Operands
    // ========================================================================

    pub fn num_operands(&self, op: OpId) -> usize {
        self.ops[op].operands.len(&self.value_pool)
    }

    /// The operand at `index`, or `None` when out of range.
    pub fn operand(&self, op: OpId, index: usize) -> Option<ValueId> {
        self.ops[op]
            .operands
            .as_slice(&self.value_pool)
            .get(index)
            .copied()
    }

    /// Redirect the operand at `index` to a new value.
    pub fn set_operand(
        &mut self,
        op: OpId,
        index: usize,
        value: ValueId,
    ) -> Result<(), OperandIndexError> {
        let slice = self.ops[op].operands.as_mut_slice(&mut self.value_pool);
        match slice.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(OperandIndexError {
                op,
                index,
                len: slice.len(),
            }),
        }
    }

    pub(crate) fn operand_slice(&self, op: OpId) -> &[ValueId] {
        self.ops[op].operands.as_slice(&self.value_pool)
    }

    // ========================================================================
    // Results
    // ========================================================================

    pub fn num_results(&self, op: OpId) -> usize {
        self.result_values[op].len(&self.value_pool)
    }

    /// The result value at `index`, or `None` when out of range.
    pub fn result(&self, op: OpId, index: usize) -> Option<ValueId> {
        self.result_values[op]
            .as_slice(&self.value_pool)
            .get(index)
            .copied()
    }

    /// The declared type of the result at `index`.
    pub fn result_type(&self, op: OpId, index: usize) -> Option<TypeId> {
        self.ops[op]
            .result_types
            .as_slice(&self.type_pool)
            .get(index)
            .copied()
    }

    pub(crate) fn result_slice(&self, op: OpId) -> &[ValueId] {
        self.result_values[op].as_slice(&self.value_pool)
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    pub fn attr(&self, op: OpId, name: Symbol) -> Option<&Attribute> {
        self.ops[op].attrs.get(name)
    }

    /// Insert or replace an attribute; returns the replaced value if any.
    pub fn set_attr(
        &mut self,
        op: OpId,
        name: impl Into<Symbol>,
        value: Attribute,
    ) -> Option<Attribute> {
        self.ops[op].attrs.set(name.into(), value)
    }

    /// Remove an attribute, reporting whether it was present.
    pub fn remove_attr(&mut self, op: OpId, name: Symbol) -> RemoveResult {
        self.ops[op].attrs.remove(name)
    }

    pub fn attrs(&self, op: OpId) -> &AttrMap {
        &self.ops[op].attrs
    }

    // ========================================================================
    // Form-specific traversal
    // ========================================================================

    /// Successor blocks of a graph-form node; empty for tree-form.
    pub fn successors(&self, op: OpId) -> &[BlockId] {
        match &self.ops[op].form {
            OpForm::Graph { successors } => successors,
            OpForm::Tree { .. } => &[],
        }
    }

    /// Nested regions of a tree-form node; empty for graph-form.
    pub fn regions(&self, op: OpId) -> &[RegionId] {
        match &self.ops[op].form {
            OpForm::Tree { regions } => regions,
            OpForm::Graph { .. } => &[],
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    pub fn value_def(&self, value: ValueId) -> ValueDef {
        self.values[value].def
    }

    pub fn value_type(&self, value: ValueId) -> TypeId {
        self.values[value].ty
    }

    // ========================================================================
    // Blocks and regions
    // ========================================================================

    /// Create a block, allocating one argument value per argument type.
    pub fn create_block(&mut self, location: Option<Location>, arg_types: Vec<TypeId>) -> BlockId {
        let tys = arg_types.clone();
        let block = self.blocks.push(BlockData {
            location,
            arg_types,
            ops: SmallVec::new(),
            parent_region: None,
        });
        let mut arg_list = EntityList::new();
        for (idx, ty) in tys.into_iter().enumerate() {
            let value = self.values.push(ValueData {
                def: ValueDef::BlockArg(block, idx as u32),
                ty,
            });
            arg_list.push(value, &mut self.value_pool);
        }
        self.block_arg_values[block] = arg_list;
        block
    }

    pub fn block(&self, block: BlockId) -> &BlockData {
        &self.blocks[block]
    }

    /// The argument value at `index`, or `None` when out of range.
    pub fn block_arg(&self, block: BlockId, index: usize) -> Option<ValueId> {
        self.block_arg_values[block]
            .as_slice(&self.value_pool)
            .get(index)
            .copied()
    }

    pub fn block_args(&self, block: BlockId) -> &[ValueId] {
        self.block_arg_values[block].as_slice(&self.value_pool)
    }

    pub fn block_ops(&self, block: BlockId) -> &[OpId] {
        &self.blocks[block].ops
    }

    /// Append a node to the end of a block.
    ///
    /// # Panics
    ///
    /// Panics if the node already belongs to a block.
    pub fn push_op(&mut self, block: BlockId, op: OpId) {
        assert!(
            self.ops[op].parent_block.is_none(),
            "push_op: {op} already belongs to a block; detach it first",
        );
        self.ops[op].parent_block = Some(block);
        self.blocks[block].ops.push(op);
    }

    /// Detach a node from a block without destroying it.
    pub fn remove_op_from_block(&mut self, block: BlockId, op: OpId) {
        self.blocks[block].ops.retain(|o| *o != op);
        if self.ops[op].parent_block == Some(block) {
            self.ops[op].parent_block = None;
        }
    }

    /// Create a region from a list of blocks, back-linking each block.
    ///
    /// # Panics
    ///
    /// Panics if a block already belongs to another region.
    pub fn create_region(
        &mut self,
        location: Option<Location>,
        blocks: impl IntoIterator<Item = BlockId>,
    ) -> RegionId {
        let blocks: SmallVec<[BlockId; 4]> = SmallVec::from_iter(blocks);
        let region = self.regions.push(RegionData {
            location,
            blocks: blocks.clone(),
            parent_op: None,
        });
        for &block in &blocks {
            if let Some(existing) = self.blocks[block].parent_region {
                panic!(
                    "create_region: {block} already belongs to {existing}; cannot reassign to {region}",
                );
            }
            self.blocks[block].parent_region = Some(region);
        }
        region
    }

    pub fn region(&self, region: RegionId) -> &RegionData {
        &self.regions[region]
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Report a fatal inconsistency involving this node.
    ///
    /// Forwards to the process-wide diagnostic sink with the node's
    /// location. Under [`FatalPolicy::Abort`](crate::diagnostics::FatalPolicy)
    /// this call does not return; treat it as a possible abrupt exit.
    pub fn emit_error(&self, op: OpId, message: impl Into<String>) {
        self.emit(op, Severity::Error, message.into());
    }

    /// Report a warning involving this node.
    pub fn emit_warning(&self, op: OpId, message: impl Into<String>) {
        self.emit(op, Severity::Warning, message.into());
    }

    /// Report a note involving this node.
    pub fn emit_note(&self, op: OpId, message: impl Into<String>) {
        self.emit(op, Severity::Note, message.into());
    }

    fn emit(&self, op: OpId, severity: Severity, message: String) {
        let (path, span) = match self.ops[op].location {
            Some(loc) => (self.paths.get(loc.path).to_owned(), loc.span),
            None => (String::new(), Span::default()),
        };
        diagnostics::emit(Diagnostic {
            severity,
            message,
            path,
            span,
        });
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
