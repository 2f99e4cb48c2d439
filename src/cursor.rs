//! Index-based accessor iteration over a node's operands and results.
//!
//! Both iterators share one cursor shape, [`AccessorIter`], parameterized
//! by a [`NodeIndexed`] accessor. The cursor holds only the context borrow,
//! the node id, and a pair of indices; elements are fetched through the
//! by-index accessor on dereference, never cached. Bounds are snapshotted
//! at construction, and because the cursor borrows the `Context` immutably,
//! arity-changing mutation while iterating is rejected at compile time.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::context::Context;
use crate::refs::{OpId, ValueId};

/// A per-node collection addressable by index.
pub trait NodeIndexed {
    type Item: Copy;

    fn count(ctx: &Context, op: OpId) -> usize;

    /// Fetch the element at `index`. Callers guarantee `index < count`.
    fn at(ctx: &Context, op: OpId, index: usize) -> Self::Item;
}

/// Operand access: yields the values a node reads.
pub struct OperandAccess;

impl NodeIndexed for OperandAccess {
    type Item = ValueId;

    fn count(ctx: &Context, op: OpId) -> usize {
        ctx.num_operands(op)
    }

    fn at(ctx: &Context, op: OpId, index: usize) -> ValueId {
        ctx.operand_slice(op)[index]
    }
}

/// Result access: yields the values a node defines.
pub struct ResultAccess;

impl NodeIndexed for ResultAccess {
    type Item = ValueId;

    fn count(ctx: &Context, op: OpId) -> usize {
        ctx.num_results(op)
    }

    fn at(ctx: &Context, op: OpId, index: usize) -> ValueId {
        ctx.result_slice(op)[index]
    }
}

/// Double-ended cursor over one node's indexed collection.
pub struct AccessorIter<'ctx, A: NodeIndexed> {
    ctx: &'ctx Context,
    op: OpId,
    front: usize,
    back: usize,
    _access: PhantomData<A>,
}

pub type OperandIter<'ctx> = AccessorIter<'ctx, OperandAccess>;
pub type ResultIter<'ctx> = AccessorIter<'ctx, ResultAccess>;

impl<'ctx, A: NodeIndexed> AccessorIter<'ctx, A> {
    pub fn new(ctx: &'ctx Context, op: OpId) -> Self {
        Self {
            ctx,
            op,
            front: 0,
            back: A::count(ctx, op),
            _access: PhantomData,
        }
    }
}

impl<A: NodeIndexed> Iterator for AccessorIter<'_, A> {
    type Item = A::Item;

    fn next(&mut self) -> Option<A::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = A::at(self.ctx, self.op, self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<A::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<A: NodeIndexed> DoubleEndedIterator for AccessorIter<'_, A> {
    fn next_back(&mut self) -> Option<A::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(A::at(self.ctx, self.op, self.back))
    }
}

impl<A: NodeIndexed> ExactSizeIterator for AccessorIter<'_, A> {}
impl<A: NodeIndexed> FusedIterator for AccessorIter<'_, A> {}

impl Context {
    /// Iterate a node's operands front to back (or back to front via `rev`).
    pub fn operands(&self, op: OpId) -> OperandIter<'_> {
        AccessorIter::new(self, op)
    }

    /// Iterate a node's result values.
    pub fn results(&self, op: OpId) -> ResultIter<'_> {
        AccessorIter::new(self, op)
    }
}
