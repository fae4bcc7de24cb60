/*!
Tools for building a context.

# Basic methods

The library has three basic methods for building a context:
- [fresh_atom](crate::context::GenericContext::fresh_atom) and [intern](crate::context::GenericContext::intern), to obtain an atom.
- [add_clause](crate::context::GenericContext::add_clause), to add a clause.
- [assert_formula](crate::context::GenericContext::assert_formula), to add a [Formula](crate::structures::formula::Formula) through its [definitional encoding](crate::builder::encode).

And, formulas may be read from text with the [expression parser](crate::builder::expression).

# Examples

A clause built using basic methods.

```rust
# use logicbench::context::Context;
# use logicbench::config::Config;
# use logicbench::reports::Report;
# use logicbench::structures::{clause::CClause, literal::CLiteral};
#
let mut the_context = Context::from_config(Config::default());
let p = the_context.fresh_atom().unwrap();
let q = the_context.fresh_atom().unwrap();

let clause_a = CClause::from([CLiteral::new(p, true), CLiteral::new(q, false)]);
let clause_b = CClause::from([CLiteral::new(p, false), CLiteral::new(q, true)]);

assert!(the_context.add_clause(clause_a).is_ok());
assert!(the_context.add_clause(clause_b).is_ok());
assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
```

A formula, parsed and asserted.

```rust
# use logicbench::context::Context;
# use logicbench::config::Config;
# use logicbench::reports::Report;
# use logicbench::builder::expression::parse;
# use logicbench::structures::atom::AtomTable;
#
let mut table = AtomTable::default();
let formula = parse("And(p, Not(p))", &mut table).unwrap();

let mut the_context = Context::from_config(Config::default());
assert!(the_context.assert_formula(&formula).is_ok());
assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
```
*/

pub mod encode;
pub mod expression;

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::clause::{CClause, Clause},
    types::err::{self, ErrorKind},
};

/// Ok results when adding a clause to the context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added to the context.
    Added,

    /// The clause was a tautology (and so was not added to the context).
    Tautology,
}

impl<R: rand::Rng> GenericContext<R> {
    /// Adds a clause to the context, if the context accepts input.
    ///
    /// Duplicate literals are removed, and tautologies are not stored.
    /// The empty clause, and clauses over atoms not issued by the context, are errors.
    pub fn add_clause(&mut self, clause: impl Into<CClause>) -> Result<ClauseOk, ErrorKind> {
        self.ensure_input()?;

        let mut clause: CClause = clause.into();
        if clause.is_empty() {
            return Err(err::ClauseDBError::EmptyClause.into());
        }

        let atom_count = self.atom_db.count();
        if clause.atoms().any(|atom| atom as usize >= atom_count) {
            log::error!(target: targets::CLAUSE_DB, "Clause over an unknown atom: {}", clause.as_dimacs(false));
            return Err(err::ClauseDBError::UnknownAtom.into());
        }

        clause.sort_unstable();
        clause.dedup();

        if clause.is_tautology() {
            return Ok(ClauseOk::Tautology);
        }

        match clause.len() {
            1 => self.clause_db.store_unit(clause[0]),
            _ => {
                let (first, second) = (clause[0], clause[1]);
                let key = self.clause_db.store(clause)?;
                self.watches.watch(first, key);
                self.watches.watch(second, key);
            }
        }

        Ok(ClauseOk::Added)
    }
}
