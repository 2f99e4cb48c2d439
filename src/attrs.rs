//! Attribute values and the per-node attribute association.
//!
//! Attributes associate constant values with names on a node. A node is
//! expected to carry a handful of them (a dozen, not thousands), so the
//! association is an ordered list with linear-scan lookup rather than a
//! hashed container; the constant overhead of a scan beats hashing at that
//! size. At most one entry exists per name at any time.

use smallvec::SmallVec;

use crate::refs::TypeId;
use crate::symbol::Symbol;

/// Constant attribute value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Unit/nil value.
    Unit,
    Bool(bool),
    /// Integer constant stored as raw bits (signless).
    IntBits(u64),
    /// Float constant stored as raw bits.
    FloatBits(u64),
    String(String),
    Symbol(Symbol),
    Type(TypeId),
    /// List of attributes.
    List(Vec<Attribute>),
}

impl From<i64> for Attribute {
    fn from(value: i64) -> Self {
        Attribute::IntBits(u64::from_ne_bytes(value.to_ne_bytes()))
    }
}

impl From<u64> for Attribute {
    fn from(value: u64) -> Self {
        Attribute::IntBits(value)
    }
}

impl From<bool> for Attribute {
    fn from(value: bool) -> Self {
        Attribute::Bool(value)
    }
}

impl From<f64> for Attribute {
    fn from(value: f64) -> Self {
        Attribute::FloatBits(value.to_bits())
    }
}

impl From<Symbol> for Attribute {
    fn from(value: Symbol) -> Self {
        Attribute::Symbol(value)
    }
}

impl From<TypeId> for Attribute {
    fn from(value: TypeId) -> Self {
        Attribute::Type(value)
    }
}

impl From<String> for Attribute {
    fn from(value: String) -> Self {
        Attribute::String(value)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::String(value.to_string())
    }
}

impl From<Vec<Attribute>> for Attribute {
    fn from(value: Vec<Attribute>) -> Self {
        Attribute::List(value)
    }
}

/// Outcome of [`AttrMap::remove`]: distinguishes "just removed" from
/// "was already absent" without treating either as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveResult {
    Removed,
    NotFound,
}

/// Ordered name-to-value association for one node.
///
/// Entries keep insertion order. `set` replaces in place, so a name never
/// maps to two values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttrMap {
    entries: SmallVec<[(Symbol, Attribute); 4]>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the value for `name`, if present.
    pub fn get(&self, name: Symbol) -> Option<&Attribute> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Insert or replace the value for `name`.
    ///
    /// Returns the previous value when one was replaced.
    pub fn set(&mut self, name: Symbol, value: Attribute) -> Option<Attribute> {
        for (key, existing) in &mut self.entries {
            if *key == name {
                return Some(std::mem::replace(existing, value));
            }
        }
        self.entries.push((name, value));
        None
    }

    /// Remove the entry for `name` if it exists.
    pub fn remove(&mut self, name: Symbol) -> RemoveResult {
        match self.entries.iter().position(|(key, _)| *key == name) {
            Some(idx) => {
                self.entries.remove(idx);
                RemoveResult::Removed
            }
            None => RemoveResult::NotFound,
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Attribute)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

impl FromIterator<(Symbol, Attribute)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (Symbol, Attribute)>>(iter: I) -> Self {
        let mut map = AttrMap::new();
        for (name, value) in iter {
            map.set(name, value);
        }
        map
    }
}

impl<'a> IntoIterator for &'a AttrMap {
    type Item = (Symbol, &'a Attribute);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (Symbol, Attribute)>,
        fn(&'a (Symbol, Attribute)) -> (Symbol, &'a Attribute),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}
