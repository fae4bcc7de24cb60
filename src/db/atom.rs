/*!
A database of atom related things.

Each atom has a (possibly absent) value and, optionally, a name.
Atoms for named propositions are issued through [intern](AtomDB::intern), while atoms used to define subformulas during [encoding](crate::builder::encode) are issued through [fresh_atom](AtomDB::fresh_atom) and remain unnamed.
*/

use std::collections::{BTreeMap, HashMap};

use crate::{
    misc::log::targets::{self},
    structures::{
        atom::{Atom, ATOM_MAX},
        literal::CLiteral,
        valuation::{CValuation, Valuation},
    },
    types::err::{self},
};

#[derive(Default)]
pub struct AtomDB {
    /// The current (partial) valuation.
    valuation: CValuation,

    /// The name of each atom, if the atom was interned.
    names: Vec<Option<String>>,

    /// The atom of each interned name.
    index: HashMap<String, Atom>,
}

impl AtomDB {
    /// A fresh, unnamed, atom.
    pub fn fresh_atom(&mut self) -> Result<Atom, err::AtomDBError> {
        let atom = self.valuation.len();
        if atom >= ATOM_MAX as usize {
            log::error!(target: targets::ENCODING, "Atom limit reached");
            return Err(err::AtomDBError::AtomsExhausted);
        }
        self.valuation.push(None);
        self.names.push(None);
        Ok(atom as Atom)
    }

    /// The atom named `name`, issuing a fresh atom on the first occurrence of the name.
    pub fn intern(&mut self, name: &str) -> Result<Atom, err::AtomDBError> {
        if let Some(&atom) = self.index.get(name) {
            return Ok(atom);
        }
        let atom = self.fresh_atom()?;
        self.names[atom as usize] = Some(name.to_string());
        self.index.insert(name.to_string(), atom);
        Ok(atom)
    }

    /// The atom named `name`, if the name has been interned.
    pub fn atom_named(&self, name: &str) -> Option<Atom> {
        self.index.get(name).copied()
    }

    /// A count of all atoms, named or not.
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation.value_of(atom)
    }

    /// The value of `literal`, if the atom of the literal has a value.
    pub fn value_of_literal(&self, literal: CLiteral) -> Option<bool> {
        self.value_of(literal.atom())
            .map(|value| value == literal.polarity())
    }

    pub fn valuation(&self) -> &CValuation {
        &self.valuation
    }

    /// Values the atom of `literal` so `literal` is true.
    pub fn set_value(&mut self, literal: CLiteral) {
        if let Some(value) = self.valuation.get_mut(literal.atom() as usize) {
            *value = Some(literal.polarity());
        }
    }

    pub fn clear_value(&mut self, atom: Atom) {
        if let Some(value) = self.valuation.get_mut(atom as usize) {
            *value = None;
        }
    }

    /// The value of each valued named atom, by name.
    pub fn named_valuation(&self) -> BTreeMap<String, bool> {
        self.index
            .iter()
            .filter_map(|(name, &atom)| self.value_of(atom).map(|value| (name.clone(), value)))
            .collect()
    }
}

#[cfg(test)]
mod atom_db_tests {
    use super::*;

    #[test]
    fn interning_is_by_name() {
        let mut db = AtomDB::default();
        let p = db.intern("p").unwrap();
        let fresh = db.fresh_atom().unwrap();
        let q = db.intern("q").unwrap();

        assert_eq!(db.intern("p"), Ok(p));
        assert_eq!(db.count(), 3);
        assert_ne!(fresh, q);
        assert_eq!(db.atom_named("q"), Some(q));
    }

    #[test]
    fn named_valuation_skips_unnamed_and_unvalued() {
        let mut db = AtomDB::default();
        let p = db.intern("p").unwrap();
        let fresh = db.fresh_atom().unwrap();
        let _q = db.intern("q").unwrap();

        db.set_value(CLiteral::new(p, false));
        db.set_value(CLiteral::new(fresh, true));

        let named = db.named_valuation();
        assert_eq!(named.len(), 1);
        assert_eq!(named.get("p"), Some(&false));
    }
}
