//! Strongly-typed views over operation nodes.
//!
//! A view is a `Copy` newtype around an [`OpId`] that exposes op-specific
//! accessors (named operands, well-known attributes) on top of the generic
//! node contract. Casting never copies or re-allocates node data: a
//! successful downcast wraps the same id, and accessors read through the
//! context like any generic caller would.

use thiserror::Error;

use crate::context::Context;
use crate::refs::OpId;

/// A downcast that did not match.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CastError {
    #[error("expected '{expected}' operation, found '{actual}'")]
    WrongOperation {
        expected: &'static str,
        actual: String,
    },
}

/// Typed view of one operation kind.
///
/// Implementors provide the name constants and the two id conversions;
/// `matches` and `from_op` come for free. Override `matches` when the view
/// is conditional on more than the name (an attribute, say); it must stay
/// a pure predicate with no side effects.
pub trait OpView: Sized + Copy {
    const DIALECT: &'static str;
    const NAME: &'static str;
    /// Full "dialect.name" string, for diagnostics.
    const FULL_NAME: &'static str;

    /// Wrap an id without checking. Use [`from_op`](Self::from_op) unless
    /// the node is already known to match.
    fn wrap(op: OpId) -> Self;

    /// The wrapped node id.
    fn op_id(&self) -> OpId;

    /// Whether the node can be viewed as `Self`. Pure.
    fn matches(ctx: &Context, op: OpId) -> bool {
        ctx.dialect(op) == Self::DIALECT && ctx.name(op) == Self::NAME
    }

    /// Checked downcast.
    fn from_op(ctx: &Context, op: OpId) -> Result<Self, CastError> {
        if Self::matches(ctx, op) {
            Ok(Self::wrap(op))
        } else {
            Err(CastError::WrongOperation {
                expected: Self::FULL_NAME,
                actual: ctx.full_name(op),
            })
        }
    }
}

impl Context {
    /// Downcast a node to a typed view, `None` when it does not match.
    pub fn get_as<V: OpView>(&self, op: OpId) -> Option<V> {
        V::from_op(self, op).ok()
    }

    /// Whether the node matches the view's predicate.
    pub fn is<V: OpView>(&self, op: OpId) -> bool {
        V::matches(self, op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::Attribute;
    use crate::node::OpBuilder;
    use crate::symbol::Symbol;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Marker(OpId);

    impl OpView for Marker {
        const DIALECT: &'static str = "test";
        const NAME: &'static str = "marker";
        const FULL_NAME: &'static str = "test.marker";

        fn wrap(op: OpId) -> Self {
            Self(op)
        }

        fn op_id(&self) -> OpId {
            self.0
        }
    }

    // View conditional on an attribute, not just the name.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct SealedMarker(OpId);

    impl OpView for SealedMarker {
        const DIALECT: &'static str = "test";
        const NAME: &'static str = "marker";
        const FULL_NAME: &'static str = "test.marker";

        fn wrap(op: OpId) -> Self {
            Self(op)
        }

        fn op_id(&self) -> OpId {
            self.0
        }

        fn matches(ctx: &Context, op: OpId) -> bool {
            ctx.dialect(op) == Self::DIALECT
                && ctx.name(op) == Self::NAME
                && ctx.attr(op, Symbol::new("sealed")) == Some(&Attribute::Bool(true))
        }
    }

    #[test]
    fn matching_node_downcasts() {
        let mut ctx = Context::new();
        let op = ctx.create_op(OpBuilder::graph(Symbol::new("test"), Symbol::new("marker")));

        assert!(ctx.is::<Marker>(op));
        let view: Marker = ctx.get_as(op).expect("should downcast");
        assert_eq!(view.op_id(), op);
    }

    #[test]
    fn mismatched_node_is_rejected_with_both_names() {
        let mut ctx = Context::new();
        let op = ctx.create_op(OpBuilder::graph(Symbol::new("test"), Symbol::new("other")));

        assert!(!ctx.is::<Marker>(op));
        assert_eq!(ctx.get_as::<Marker>(op), None);
        let err = Marker::from_op(&ctx, op).unwrap_err();
        assert_eq!(
            err,
            CastError::WrongOperation {
                expected: "test.marker",
                actual: "test.other".to_owned(),
            }
        );
    }

    #[test]
    fn overridden_matches_can_inspect_attributes() {
        let mut ctx = Context::new();
        let plain = ctx.create_op(OpBuilder::graph(Symbol::new("test"), Symbol::new("marker")));
        let sealed = ctx.create_op(
            OpBuilder::graph(Symbol::new("test"), Symbol::new("marker"))
                .attr("sealed", Attribute::Bool(true)),
        );

        assert!(ctx.is::<Marker>(plain) && ctx.is::<Marker>(sealed));
        assert!(!ctx.is::<SealedMarker>(plain));
        assert!(ctx.is::<SealedMarker>(sealed));
    }
}
