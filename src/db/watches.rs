/*!
Watch lists, indexed by literal.

The list of a literal contains the keys of those clauses in which the literal is watched, and is examined when the literal becomes false.
*/

use crate::{db::ClauseKey, structures::literal::CLiteral};

#[derive(Default)]
pub struct Watches {
    lists: Vec<Vec<ClauseKey>>,
}

impl Watches {
    /// Ensures a list exists for both literals of every atom below `atom_count`.
    pub fn grow_to(&mut self, atom_count: usize) {
        let required = atom_count * 2;
        if self.lists.len() < required {
            self.lists.resize_with(required, Vec::default);
        }
    }

    pub fn watch(&mut self, literal: CLiteral, key: ClauseKey) {
        self.grow_to(literal.atom() as usize + 1);
        self.lists[literal.index()].push(key);
    }

    /// Takes the watch list of `literal`, leaving an empty list until the list is restored.
    /// To be used in conjunction with [restore](Watches::restore).
    pub fn take(&mut self, literal: CLiteral) -> Vec<ClauseKey> {
        match self.lists.get_mut(literal.index()) {
            Some(list) => std::mem::take(list),
            None => Vec::default(),
        }
    }

    /// Sets the watch list of `literal` to `list`.
    /// To be used in conjunction with [take](Watches::take).
    pub fn restore(&mut self, literal: CLiteral, list: Vec<ClauseKey>) {
        if let Some(existing) = self.lists.get_mut(literal.index()) {
            *existing = list;
        } else if !list.is_empty() {
            self.grow_to(literal.atom() as usize + 1);
            self.lists[literal.index()] = list;
        }
    }
}
