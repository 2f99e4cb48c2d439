//! Recursive traversal over tree-form nesting.
//!
//! Walks descend pre-order through a node's regions, each region's blocks,
//! and each block's operations. The callback steers the walk: return
//! `Continue(Advance)` to descend, `Continue(Skip)` to skip the current
//! node's regions, or `Break(b)` to stop the whole walk.

use std::ops::ControlFlow;

use crate::context::Context;
use crate::refs::{BlockId, OpId, RegionId};
use crate::view::OpView;

/// Whether to descend into the current node's regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkAction {
    /// Visit nested regions.
    Advance,
    /// Skip nested regions, continue with siblings.
    Skip,
}

/// Visit `op` and, unless skipped, everything nested under it.
pub fn walk_op<B>(
    ctx: &Context,
    op: OpId,
    f: &mut impl FnMut(&Context, OpId) -> ControlFlow<B, WalkAction>,
) -> ControlFlow<B> {
    match f(ctx, op)? {
        WalkAction::Skip => ControlFlow::Continue(()),
        WalkAction::Advance => {
            for &region in ctx.regions(op) {
                walk_region(ctx, region, f)?;
            }
            ControlFlow::Continue(())
        }
    }
}

/// Visit every operation in every block of `region`.
pub fn walk_region<B>(
    ctx: &Context,
    region: RegionId,
    f: &mut impl FnMut(&Context, OpId) -> ControlFlow<B, WalkAction>,
) -> ControlFlow<B> {
    for &block in &ctx.region(region).blocks {
        walk_block(ctx, block, f)?;
    }
    ControlFlow::Continue(())
}

/// Visit every operation in `block`, in block order.
pub fn walk_block<B>(
    ctx: &Context,
    block: BlockId,
    f: &mut impl FnMut(&Context, OpId) -> ControlFlow<B, WalkAction>,
) -> ControlFlow<B> {
    for &op in ctx.block_ops(block) {
        walk_op(ctx, op, f)?;
    }
    ControlFlow::Continue(())
}

/// Walk all nodes under `root`, calling `f` only for those viewable as `V`.
///
/// Non-matching nodes are still descended into.
pub fn walk_typed<V: OpView, B>(
    ctx: &Context,
    root: OpId,
    mut f: impl FnMut(&Context, V) -> ControlFlow<B>,
) -> ControlFlow<B> {
    walk_op(ctx, root, &mut |ctx, op| {
        if let Some(view) = ctx.get_as::<V>(op) {
            f(ctx, view)?;
        }
        ControlFlow::Continue(WalkAction::Advance)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::OpBuilder;
    use crate::symbol::Symbol;
    use crate::view::OpView;

    fn leaf(ctx: &mut Context, name: &'static str) -> OpId {
        ctx.create_op(OpBuilder::tree(Symbol::new("test"), Symbol::new(name)))
    }

    // root { region { block [a, mid { region { block [b] } }, c] } }
    fn build_nest(ctx: &mut Context) -> (OpId, Vec<OpId>) {
        let a = leaf(ctx, "a");
        let b = leaf(ctx, "b");
        let c = leaf(ctx, "c");

        let inner_block = ctx.create_block(None, vec![]);
        ctx.push_op(inner_block, b);
        let inner_region = ctx.create_region(None, [inner_block]);
        let mid = ctx.create_op(
            OpBuilder::tree(Symbol::new("test"), Symbol::new("mid")).region(inner_region),
        );

        let outer_block = ctx.create_block(None, vec![]);
        ctx.push_op(outer_block, a);
        ctx.push_op(outer_block, mid);
        ctx.push_op(outer_block, c);
        let outer_region = ctx.create_region(None, [outer_block]);
        let root = ctx.create_op(
            OpBuilder::tree(Symbol::new("test"), Symbol::new("root")).region(outer_region),
        );

        (root, vec![root, a, mid, b, c])
    }

    #[test]
    fn walk_visits_preorder() {
        let mut ctx = Context::new();
        let (root, expected) = build_nest(&mut ctx);

        let mut seen = Vec::new();
        let flow = walk_op(&ctx, root, &mut |_, op| {
            seen.push(op);
            ControlFlow::<(), _>::Continue(WalkAction::Advance)
        });
        assert!(flow.is_continue());
        assert_eq!(seen, expected);
    }

    #[test]
    fn skip_prunes_nested_regions() {
        let mut ctx = Context::new();
        let (root, all) = build_nest(&mut ctx);
        let mid = all[2];
        let b = all[3];

        let mut seen = Vec::new();
        let _ = walk_op(&ctx, root, &mut |ctx, op| {
            seen.push(op);
            ControlFlow::<(), _>::Continue(if ctx.name(op) == "mid" {
                WalkAction::Skip
            } else {
                WalkAction::Advance
            })
        });
        assert!(seen.contains(&mid));
        assert!(!seen.contains(&b));
    }

    #[test]
    fn break_stops_the_whole_walk() {
        let mut ctx = Context::new();
        let (root, all) = build_nest(&mut ctx);

        let found = walk_op(&ctx, root, &mut |ctx, op| {
            if ctx.name(op) == "b" {
                ControlFlow::Break(op)
            } else {
                ControlFlow::Continue(WalkAction::Advance)
            }
        });
        assert_eq!(found, ControlFlow::Break(all[3]));
    }

    #[derive(Clone, Copy)]
    struct Mid(OpId);

    impl OpView for Mid {
        const DIALECT: &'static str = "test";
        const NAME: &'static str = "mid";
        const FULL_NAME: &'static str = "test.mid";

        fn wrap(op: OpId) -> Self {
            Self(op)
        }

        fn op_id(&self) -> OpId {
            self.0
        }
    }

    #[test]
    fn typed_walk_filters_but_still_descends() {
        let mut ctx = Context::new();
        let (root, all) = build_nest(&mut ctx);

        let mut mids = Vec::new();
        let flow = walk_typed::<Mid, ()>(&ctx, root, |_, view| {
            mids.push(view.op_id());
            ControlFlow::Continue(())
        });
        assert!(flow.is_continue());
        assert_eq!(mids, vec![all[2]]);
    }
}
