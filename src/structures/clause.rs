//! Clauses, aka. a collection of literals, interpreted as the disjunction of those literals.
//!
//! The canonical representation of a clause is as a vector of literals.
//!
//! ```rust
//! # use logicbench::structures::literal::CLiteral;
//! # use logicbench::structures::clause::Clause;
//! let clause = vec![CLiteral::new(1, true), CLiteral::new(2, false), CLiteral::new(3, true)];
//!
//! assert_eq!(clause.as_dimacs(true), "1 -2 3 0");
//! assert!(!clause.is_tautology());
//! ```
//!
//! - The empty clause is always false (never true).
//! - Single literals are identified with the clause containing that literal (aka. a 'unit' clause).

use crate::structures::{atom::Atom, literal::CLiteral};

/// The canonical implementation of a clause.
pub type CClause = Vec<CLiteral>;

/// A literal, as a unit clause.
impl From<CLiteral> for CClause {
    fn from(literal: CLiteral) -> Self {
        vec![literal]
    }
}

/// The clause trait.
pub trait Clause {
    /// A string of the clause in DIMACS form, with the terminating `0` as optional.
    fn as_dimacs(&self, zero: bool) -> String;

    /// An iterator over all atoms in the clause, order is not guaranteed.
    fn atoms(&self) -> impl Iterator<Item = Atom>;

    /// True if the clause contains some literal and its negation.
    fn is_tautology(&self) -> bool;
}

impl Clause for CClause {
    fn as_dimacs(&self, zero: bool) -> String {
        let mut the_string = String::new();
        for literal in self {
            the_string.push_str(format!("{} ", literal.as_int()).as_str());
        }
        if zero {
            the_string.push('0');
        } else {
            the_string.pop();
        }
        the_string
    }

    fn atoms(&self) -> impl Iterator<Item = Atom> {
        self.iter().map(|literal| literal.atom())
    }

    fn is_tautology(&self) -> bool {
        self.iter().any(|literal| self.contains(&literal.negate()))
    }
}
