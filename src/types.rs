//! Type interning.
//!
//! Result types are interned per [`Context`](crate::Context): equal
//! `TypeData` always maps to the same `TypeId`, so type equality is id
//! equality.

use cranelift_entity::PrimaryMap;
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::refs::TypeId;
use crate::symbol::Symbol;

/// Data for a single interned type, named like an operation:
/// a dialect plus a name, with optional type parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeData {
    pub dialect: Symbol,
    pub name: Symbol,
    pub params: SmallVec<[TypeId; 4]>,
}

impl TypeData {
    pub fn new(dialect: Symbol, name: Symbol) -> Self {
        Self {
            dialect,
            name,
            params: SmallVec::new(),
        }
    }

    pub fn with_params(dialect: Symbol, name: Symbol, params: impl IntoIterator<Item = TypeId>) -> Self {
        Self {
            dialect,
            name,
            params: SmallVec::from_iter(params),
        }
    }
}

/// Deduplicating type interner.
pub struct TypeInterner {
    types: PrimaryMap<TypeId, TypeData>,
    dedup: HashMap<TypeData, TypeId>,
}

impl TypeInterner {
    pub fn new() -> Self {
        Self {
            types: PrimaryMap::new(),
            dedup: HashMap::new(),
        }
    }

    /// Intern a type, returning an existing id if the data matches.
    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&existing) = self.dedup.get(&data) {
            return existing;
        }
        let id = self.types.push(data.clone());
        self.dedup.insert(data, id);
        id
    }

    /// Look up type data by id.
    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.types[id]
    }

    /// Check whether `id` names the given dialect type.
    pub fn is_named(&self, id: TypeId, dialect: Symbol, name: Symbol) -> bool {
        let data = &self.types[id];
        data.dialect == dialect && data.name == name
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}
