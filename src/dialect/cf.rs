//! Control-flow dialect: graph-form terminators.

use crate::context::Context;
use crate::define_op_view;
use crate::location::Location;
use crate::node::OpBuilder;
use crate::refs::{BlockId, OpId};
use crate::registry::AbstractOp;
use crate::symbol::Symbol;
use crate::symbols;
use crate::view::OpView;

symbols! {
    DIALECT => "cf",
}

define_op_view! {
    /// Unconditional branch to a successor block.
    pub struct Br => "cf"."br"
}

impl Br {
    pub fn build(ctx: &mut Context, location: Option<Location>, target: BlockId) -> Self {
        let mut descriptor = OpBuilder::graph(DIALECT(), Symbol::new("br")).successor(target);
        if let Some(location) = location {
            descriptor = descriptor.location(location);
        }
        Self(ctx.create_op(descriptor))
    }

    pub fn target(&self, ctx: &Context) -> BlockId {
        match ctx.successors(self.0) {
            [target, ..] => *target,
            [] => panic!("{}: node has no successor", Self::FULL_NAME),
        }
    }
}

inventory::submit! {
    AbstractOp {
        dialect: "cf",
        name: "br",
        summary: "unconditional branch",
        verify: Some(verify_br),
    }
}

fn verify_br(ctx: &Context, op: OpId) -> Result<(), String> {
    if ctx.successors(op).len() != 1 {
        return Err(format!(
            "{} expects exactly 1 successor, found {}",
            ctx.full_name(op),
            ctx.successors(op).len(),
        ));
    }
    Ok(())
}
