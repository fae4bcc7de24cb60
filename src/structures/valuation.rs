//! A valuation is a partial function from atoms to (boolean) values.
//!
//! The canonical representation is a slice of optional booleans indexed by atom.

use crate::structures::atom::Atom;

/// The canonical representation of a valuation.
pub type CValuation = Vec<Option<bool>>;

/// Methods for reading a valuation.
pub trait Valuation {
    /// The value of `atom`, or None if the atom has no value (or is outside the valuation).
    fn value_of(&self, atom: Atom) -> Option<bool>;

    /// An iterator over atoms without a value, in increasing order.
    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom>;

    /// A count of atoms in the valuation, valued or not.
    fn atom_count(&self) -> usize;
}

impl Valuation for [Option<bool>] {
    fn value_of(&self, atom: Atom) -> Option<bool> {
        self.get(atom as usize).copied().flatten()
    }

    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> {
        self.iter()
            .enumerate()
            .filter(|(_, value)| value.is_none())
            .map(|(atom, _)| atom as Atom)
    }

    fn atom_count(&self) -> usize {
        self.len()
    }
}

impl Valuation for Vec<Option<bool>> {
    fn value_of(&self, atom: Atom) -> Option<bool> {
        self.as_slice().value_of(atom)
    }

    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> {
        self.as_slice().unvalued_atoms()
    }

    fn atom_count(&self) -> usize {
        self.len()
    }
}
