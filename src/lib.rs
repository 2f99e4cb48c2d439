//! stem-ir: an arena-based operation-node IR substrate.
//!
//! One node abstraction, [`OpNode`], serves two concrete IR forms: graph-form
//! instructions that branch to successor blocks, and tree-form statements
//! that own nested regions. A [`Context`] arena owns every node, value,
//! block, and region; everything else refers to them through `u32` ids.
//!
//! The crate deliberately stops at the node contract. Verification rules,
//! textual parsing and printing, and pass pipelines belong to the tools
//! built on top.
//!
//! # Example
//!
//! ```
//! use stem_ir::dialect::arith;
//! use stem_ir::{Context, OpView, Symbol, TypeData};
//!
//! let mut ctx = Context::new();
//! let i32_ty = ctx
//!     .types
//!     .intern(TypeData::new(Symbol::new("core"), Symbol::new("i32")));
//!
//! let one = arith::Const::build(&mut ctx, None, 1, i32_ty).result(&ctx);
//! let two = arith::Const::build(&mut ctx, None, 2, i32_ty).result(&ctx);
//! let add = arith::Add::build(&mut ctx, None, one, two, i32_ty);
//!
//! assert_eq!(ctx.full_name(add.op_id()), "arith.add");
//! assert_eq!(ctx.operands(add.op_id()).count(), 2);
//! ```

pub mod attrs;
pub mod context;
pub mod cursor;
pub mod diagnostics;
pub mod dialect;
pub mod location;
pub mod node;
pub mod refs;
pub mod registry;
pub mod symbol;
pub mod types;
pub mod view;
pub mod walk;

pub use attrs::{AttrMap, Attribute, RemoveResult};
pub use context::{BlockData, Context, OperandIndexError, RegionData, ValueData};
pub use cursor::{AccessorIter, NodeIndexed, OperandAccess, OperandIter, ResultAccess, ResultIter};
pub use diagnostics::{Diagnostic, FatalPolicy, HandlerId, Severity};
pub use location::{Location, PathInterner, Span};
pub use node::{OpBuilder, OpForm, OpKind, OpNode};
pub use refs::{BlockId, OpId, PathId, RegionId, TypeId, ValueDef, ValueId};
pub use registry::AbstractOp;
pub use symbol::Symbol;
pub use types::{TypeData, TypeInterner};
pub use view::{CastError, OpView};
pub use walk::{WalkAction, walk_block, walk_op, walk_region, walk_typed};
