//! Structured control-flow dialect: tree-form statements.

use crate::context::Context;
use crate::define_op_view;
use crate::location::Location;
use crate::node::OpBuilder;
use crate::refs::{OpId, RegionId};
use crate::registry::AbstractOp;
use crate::symbol::Symbol;
use crate::symbols;
use crate::view::OpView;

symbols! {
    DIALECT => "scf",
}

define_op_view! {
    /// Execute a single nested region.
    pub struct Execute => "scf"."execute"
}

impl Execute {
    pub fn build(ctx: &mut Context, location: Option<Location>, body: RegionId) -> Self {
        let mut descriptor = OpBuilder::tree(DIALECT(), Symbol::new("execute")).region(body);
        if let Some(location) = location {
            descriptor = descriptor.location(location);
        }
        Self(ctx.create_op(descriptor))
    }

    pub fn body(&self, ctx: &Context) -> RegionId {
        match ctx.regions(self.0) {
            [body, ..] => *body,
            [] => panic!("{}: node has no body region", Self::FULL_NAME),
        }
    }
}

inventory::submit! {
    AbstractOp {
        dialect: "scf",
        name: "execute",
        summary: "execute a nested region",
        verify: Some(verify_execute),
    }
}

fn verify_execute(ctx: &Context, op: OpId) -> Result<(), String> {
    if ctx.regions(op).len() != 1 {
        return Err(format!(
            "{} expects exactly 1 region, found {}",
            ctx.full_name(op),
            ctx.regions(op).len(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::OpKind;

    #[test]
    fn execute_owns_its_body_region() {
        let mut ctx = Context::new();
        let block = ctx.create_block(None, vec![]);
        let body = ctx.create_region(None, [block]);

        let exec = Execute::build(&mut ctx, None, body);
        assert_eq!(exec.body(&ctx), body);
        assert_eq!(ctx.region(body).parent_op, Some(exec.op_id()));
        assert_eq!(ctx.op_kind(exec.op_id()), OpKind::Tree);
        assert!(ctx.successors(exec.op_id()).is_empty());
    }

    #[test]
    fn verify_rejects_missing_region() {
        let mut ctx = Context::new();
        let bad = ctx.create_op(OpBuilder::tree(DIALECT(), Symbol::new("execute")));

        let info = ctx.registered_info(bad).expect("scf.execute is registered");
        let verify = info.verify.expect("scf.execute has a verify hook");
        assert!(verify(&ctx, bad).is_err());
    }
}
