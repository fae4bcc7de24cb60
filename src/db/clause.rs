/*!
A database of clauses.

Unit clauses are kept as literals, and are asserted at the start of each solve.
Every other clause is stored in a [SlotMap], and accessed through a [ClauseKey].
The first two literals of a stored clause are the literals watched by the clause.
*/

use slotmap::SlotMap;

use crate::{
    db::ClauseKey,
    misc::log::targets::{self},
    structures::{clause::CClause, literal::CLiteral},
    types::err::{self},
};

#[derive(Default)]
pub struct ClauseDB {
    units: Vec<CLiteral>,
    clauses: SlotMap<ClauseKey, CClause>,
}

impl ClauseDB {
    pub fn store_unit(&mut self, literal: CLiteral) {
        log::trace!(target: targets::CLAUSE_DB, "Unit {literal}");
        self.units.push(literal);
    }

    /// Stores a clause of at least two literals, returning the key of the clause.
    pub fn store(&mut self, clause: CClause) -> Result<ClauseKey, err::ClauseDBError> {
        match clause.len() {
            0 => Err(err::ClauseDBError::EmptyClause),
            _ => {
                let key = self.clauses.insert(clause);
                Ok(key)
            }
        }
    }

    pub fn get(&self, key: ClauseKey) -> Result<&CClause, err::ClauseDBError> {
        self.clauses.get(key).ok_or(err::ClauseDBError::Missing)
    }

    pub fn get_mut(&mut self, key: ClauseKey) -> Result<&mut CClause, err::ClauseDBError> {
        self.clauses.get_mut(key).ok_or(err::ClauseDBError::Missing)
    }

    pub fn units(&self) -> &[CLiteral] {
        &self.units
    }

    /// A count of every clause, including units.
    pub fn count(&self) -> usize {
        self.units.len() + self.clauses.len()
    }
}
