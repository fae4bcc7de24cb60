/*!
(The internal representation of) an atom (aka. a 'variable').

Internally an atom is a u32 index, so atoms may be used as the indicies of a structure, e.g. `valuation[a]`.
Externally, in formulas and models, an atom is a name such as `p`, `chove`, or `kind_a`.

The mapping between the two is kept in an [AtomTable].
Interning is by name, so within one table the same name always resolves to the same atom:

```rust
# use logicbench::structures::atom::AtomTable;
let mut table = AtomTable::default();
let p = table.intern("p");
let q = table.intern("q");

assert_ne!(p, q);
assert_eq!(table.intern("p"), p);
assert_eq!(table.name_of(q), Some("q"));
```
*/

use std::collections::HashMap;

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The maximum instance of an atom.
pub const ATOM_MAX: Atom = i32::MAX.unsigned_abs();

/// A two-way map between atom names and atoms, with atoms issued in order of first occurrence.
#[derive(Clone, Debug, Default)]
pub struct AtomTable {
    names: Vec<String>,
    index: HashMap<String, Atom>,
}

impl AtomTable {
    /// The atom for `name`, issuing a fresh atom on first occurrence.
    pub fn intern(&mut self, name: &str) -> Atom {
        if let Some(atom) = self.index.get(name) {
            return *atom;
        }
        let atom = self.names.len() as Atom;
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), atom);
        atom
    }

    /// The atom for `name`, if the name has been interned.
    pub fn get(&self, name: &str) -> Option<Atom> {
        self.index.get(name).copied()
    }

    /// The name of `atom`, if the atom was issued by the table.
    pub fn name_of(&self, atom: Atom) -> Option<&str> {
        self.names.get(atom as usize).map(|name| name.as_str())
    }

    /// All names, in order of first occurrence.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|name| name.as_str())
    }

    /// A count of interned names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no name has been interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
