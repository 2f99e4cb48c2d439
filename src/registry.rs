//! Compile-time registry of abstract operation descriptions.
//!
//! Dialects register an [`AbstractOp`] per operation name via
//! `inventory::submit!` at the definition site; the entries are collected
//! into a lookup table on first access. Nodes themselves never consult the
//! registry: unregistered names construct and behave exactly like
//! registered ones. The registry only answers "is something known about
//! this name", for tools that want summaries or verify hooks.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::context::Context;
use crate::refs::OpId;
use crate::symbol::Symbol;

/// Statically registered description of one operation name.
pub struct AbstractOp {
    /// Dialect name, e.g. "arith".
    pub dialect: &'static str,
    /// Operation name within the dialect, e.g. "add".
    pub name: &'static str,
    /// One-line human-readable description.
    pub summary: &'static str,
    /// Optional structural check, run by external verification passes.
    pub verify: Option<fn(&Context, OpId) -> Result<(), String>>,
}

inventory::collect!(AbstractOp);

static INDEX: LazyLock<HashMap<(Symbol, Symbol), &'static AbstractOp>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for info in inventory::iter::<AbstractOp> {
        let key = (
            Symbol::from_dynamic(info.dialect),
            Symbol::from_dynamic(info.name),
        );
        index.insert(key, info);
    }
    index
});

/// Look up the registered description for `dialect.name`, if any.
pub fn lookup(dialect: Symbol, name: Symbol) -> Option<&'static AbstractOp> {
    INDEX.get(&(dialect, name)).copied()
}
