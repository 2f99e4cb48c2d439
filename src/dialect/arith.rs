//! Arithmetic dialect: graph-form compute instructions.

use crate::attrs::Attribute;
use crate::context::Context;
use crate::define_op_view;
use crate::location::Location;
use crate::node::OpBuilder;
use crate::refs::{OpId, TypeId, ValueId};
use crate::registry::AbstractOp;
use crate::symbol::Symbol;
use crate::symbols;
use crate::view::OpView;

symbols! {
    DIALECT => "arith",
    ATTR_VALUE => "value",
}

define_op_view! {
    /// Integer constant; the value lives in the `value` attribute.
    pub struct Const => "arith"."const"
}

impl Const {
    pub fn build(ctx: &mut Context, location: Option<Location>, value: i64, ty: TypeId) -> Self {
        let mut descriptor = OpBuilder::graph(DIALECT(), Symbol::new("const"))
            .result(ty)
            .attr(ATTR_VALUE(), Attribute::from(value));
        if let Some(location) = location {
            descriptor = descriptor.location(location);
        }
        Self(ctx.create_op(descriptor))
    }

    /// The constant's integer value, `None` if the attribute is missing
    /// or not an integer.
    pub fn value(&self, ctx: &Context) -> Option<i64> {
        match ctx.attr(self.0, ATTR_VALUE())? {
            Attribute::IntBits(bits) => Some(i64::from_ne_bytes(bits.to_ne_bytes())),
            _ => None,
        }
    }

    pub fn result(&self, ctx: &Context) -> ValueId {
        ctx.result(self.0, 0).unwrap_or_else(|| {
            panic!("{}: node has no result", Self::FULL_NAME);
        })
    }
}

macro_rules! binary_op {
    ($(#[$meta:meta])* $view:ident => $name:literal, $summary:literal) => {
        define_op_view! {
            $(#[$meta])*
            pub struct $view => "arith".$name
        }

        impl $view {
            pub fn build(
                ctx: &mut Context,
                location: Option<Location>,
                lhs: ValueId,
                rhs: ValueId,
                ty: TypeId,
            ) -> Self {
                let mut descriptor = OpBuilder::graph(DIALECT(), Symbol::new($name))
                    .operand(lhs)
                    .operand(rhs)
                    .result(ty);
                if let Some(location) = location {
                    descriptor = descriptor.location(location);
                }
                Self(ctx.create_op(descriptor))
            }

            pub fn lhs(&self, ctx: &Context) -> ValueId {
                self.nth_operand(ctx, 0)
            }

            pub fn rhs(&self, ctx: &Context) -> ValueId {
                self.nth_operand(ctx, 1)
            }

            pub fn result(&self, ctx: &Context) -> ValueId {
                ctx.result(self.0, 0).unwrap_or_else(|| {
                    panic!("{}: node has no result", Self::FULL_NAME);
                })
            }

            fn nth_operand(&self, ctx: &Context, index: usize) -> ValueId {
                ctx.operand(self.0, index).unwrap_or_else(|| {
                    panic!("{}: missing operand {index}", Self::FULL_NAME);
                })
            }
        }

        inventory::submit! {
            AbstractOp {
                dialect: "arith",
                name: $name,
                summary: $summary,
                verify: Some(verify_binary),
            }
        }
    };
}

binary_op! {
    /// Two-operand integer addition.
    Add => "add", "integer addition"
}
binary_op! {
    Sub => "sub", "integer subtraction"
}
binary_op! {
    Mul => "mul", "integer multiplication"
}

inventory::submit! {
    AbstractOp {
        dialect: "arith",
        name: "const",
        summary: "integer constant",
        verify: Some(verify_const),
    }
}

fn verify_binary(ctx: &Context, op: OpId) -> Result<(), String> {
    if ctx.num_operands(op) != 2 {
        return Err(format!(
            "{} expects 2 operands, found {}",
            ctx.full_name(op),
            ctx.num_operands(op),
        ));
    }
    if ctx.num_results(op) != 1 {
        return Err(format!(
            "{} expects 1 result, found {}",
            ctx.full_name(op),
            ctx.num_results(op),
        ));
    }
    Ok(())
}

fn verify_const(ctx: &Context, op: OpId) -> Result<(), String> {
    if ctx.attr(op, ATTR_VALUE()).is_none() {
        return Err(format!("{} requires a 'value' attribute", ctx.full_name(op)));
    }
    if ctx.num_results(op) != 1 {
        return Err(format!(
            "{} expects 1 result, found {}",
            ctx.full_name(op),
            ctx.num_results(op),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::OpKind;
    use crate::registry;
    use crate::types::TypeData;

    fn i32_type(ctx: &mut Context) -> TypeId {
        ctx.types
            .intern(TypeData::new(Symbol::new("core"), Symbol::new("i32")))
    }

    #[test]
    fn const_round_trips_its_value() {
        let mut ctx = Context::new();
        let i32_ty = i32_type(&mut ctx);

        let c = Const::build(&mut ctx, None, -7, i32_ty);
        assert_eq!(c.value(&ctx), Some(-7));
        assert_eq!(ctx.value_type(c.result(&ctx)), i32_ty);
        assert_eq!(ctx.op_kind(c.op_id()), OpKind::Graph);
    }

    #[test]
    fn add_exposes_named_operands() {
        let mut ctx = Context::new();
        let i32_ty = i32_type(&mut ctx);
        let one = Const::build(&mut ctx, None, 1, i32_ty);
        let two = Const::build(&mut ctx, None, 2, i32_ty);
        let (lhs, rhs) = (one.result(&ctx), two.result(&ctx));

        let add = Add::build(&mut ctx, None, lhs, rhs, i32_ty);
        assert_eq!(add.lhs(&ctx), lhs);
        assert_eq!(add.rhs(&ctx), rhs);
        assert_eq!(ctx.num_operands(add.op_id()), 2);
    }

    // The full protocol in one scenario: construct, downcast, tweak an
    // attribute the view does not know about, read operands, clean up.
    #[test]
    fn add_with_overflow_attribute_scenario() {
        let mut ctx = Context::new();
        let i32_ty = i32_type(&mut ctx);
        let one = Const::build(&mut ctx, None, 1, i32_ty).result(&ctx);
        let two = Const::build(&mut ctx, None, 2, i32_ty).result(&ctx);

        let op = Add::build(&mut ctx, None, one, two, i32_ty).op_id();
        ctx.set_attr(op, "overflow", Attribute::from("wrap"));

        let add: Add = ctx.get_as(op).expect("arith.add should downcast");
        assert_eq!(add.lhs(&ctx), one);
        assert_eq!(add.rhs(&ctx), two);
        assert_eq!(
            ctx.attr(op, Symbol::new("overflow")),
            Some(&Attribute::String("wrap".into()))
        );
        assert!(ctx.get_as::<Sub>(op).is_none());

        ctx.remove_attr(op, Symbol::new("overflow"));
        assert_eq!(ctx.attr(op, Symbol::new("overflow")), None);
    }

    #[test]
    fn verify_hooks_check_arity() {
        let mut ctx = Context::new();
        let i32_ty = i32_type(&mut ctx);
        let one = Const::build(&mut ctx, None, 1, i32_ty).result(&ctx);

        // A malformed arith.add built through the raw descriptor.
        let bad = ctx.create_op(
            OpBuilder::graph(DIALECT(), Symbol::new("add"))
                .operand(one)
                .result(i32_ty),
        );

        let info = ctx.registered_info(bad).expect("arith.add is registered");
        let verify = info.verify.expect("arith.add has a verify hook");
        let err = verify(&ctx, bad).unwrap_err();
        assert!(err.contains("expects 2 operands"));

        let good = Add::build(&mut ctx, None, one, one, i32_ty);
        assert_eq!(verify(&ctx, good.op_id()), Ok(()));
    }

    #[test]
    fn registry_summary_is_available() {
        let info = registry::lookup(Symbol::new("arith"), Symbol::new("const"))
            .expect("arith.const should be registered");
        assert_eq!(info.summary, "integer constant");
    }
}
