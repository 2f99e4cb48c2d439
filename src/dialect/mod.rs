//! Built-in demonstration dialects.
//!
//! Each module defines typed views over a handful of operation names and
//! registers their descriptions with the registry. The views exercise the
//! downcast protocol end to end; nothing in the core depends on them.

pub mod arith;
pub mod cf;
pub mod scf;

/// Define a `Copy` newtype view over an operation name.
///
/// Generates the struct, its [`OpView`](crate::OpView) impl, and `Display`
/// as the full name. Builders and accessors are written by hand per op.
#[macro_export]
macro_rules! define_op_view {
    ($(#[$meta:meta])* $vis:vis struct $view:ident => $dialect:literal . $name:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis struct $view($crate::OpId);

        impl $crate::OpView for $view {
            const DIALECT: &'static str = $dialect;
            const NAME: &'static str = $name;
            const FULL_NAME: &'static str = concat!($dialect, ".", $name);

            fn wrap(op: $crate::OpId) -> Self {
                Self(op)
            }

            fn op_id(&self) -> $crate::OpId {
                self.0
            }
        }

        impl ::std::fmt::Display for $view {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<Self as $crate::OpView>::FULL_NAME)
            }
        }
    };
}
