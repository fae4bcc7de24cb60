use std::collections::{BTreeMap, HashMap};

use crate::{
    config::Config,
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail, watches::Watches},
    reports::Report,
    structures::{atom::Atom, formula::Formula, literal::CLiteral},
    types::err::{self, ErrorKind},
};

use super::{ContextState, Counters};

/// A generic context, parameratised to a source of randomness.
///
/// # Example
///
/// ```rust
/// # use logicbench::context::GenericContext;
/// # use logicbench::config::Config;
/// # use rand::SeedableRng;
/// let context = GenericContext::from_parts(Config::default(), rand::rngs::StdRng::seed_from_u64(7));
/// ```
pub struct GenericContext<R: rand::Rng> {
    /// The configuration of a context.
    pub config: Config,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The atom database.
    /// See [db::atom](crate::db::atom) for details.
    pub atom_db: AtomDB,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// Watch lists for each literal.
    pub watches: Watches,

    /// The trail of assignments.
    pub trail: Trail,

    /// The status of the context.
    pub state: ContextState,

    /// The source of rng.
    pub rng: R,

    /// The literal defining each encoded (compound) formula.
    pub(crate) definitions: HashMap<Formula, CLiteral>,
}

impl<R: rand::Rng> GenericContext<R> {
    /// A context from some configuration and source of randomness.
    pub fn from_parts(config: Config, rng: R) -> Self {
        Self {
            config,
            counters: Counters::default(),
            atom_db: AtomDB::default(),
            clause_db: ClauseDB::default(),
            watches: Watches::default(),
            trail: Trail::default(),
            state: ContextState::Input,
            rng,
            definitions: HashMap::default(),
        }
    }

    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        Report::from(self.state)
    }

    /// A fresh, unnamed, atom.
    pub fn fresh_atom(&mut self) -> Result<Atom, ErrorKind> {
        let atom = self.atom_db.fresh_atom()?;
        self.watches.grow_to(self.atom_db.count());
        Ok(atom)
    }

    /// The atom named `name`, issued fresh on the first occurrence of the name.
    pub fn intern(&mut self, name: &str) -> Result<Atom, ErrorKind> {
        let atom = self.atom_db.intern(name)?;
        self.watches.grow_to(self.atom_db.count());
        Ok(atom)
    }

    /// The value of `atom` on the current valuation.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.atom_db.value_of(atom)
    }

    /// The value of each named atom, if the context is satisfiable.
    pub fn named_valuation(&self) -> Result<BTreeMap<String, bool>, ErrorKind> {
        match self.state {
            ContextState::Satisfiable => Ok(self.atom_db.named_valuation()),
            _ => Err(ErrorKind::InvalidState),
        }
    }

    /// Values `literal` true and stores the assignment on the trail, to be propagated.
    pub(crate) fn assign(&mut self, literal: CLiteral) {
        self.atom_db.set_value(literal);
        self.trail.store_assignment(literal);
    }

    /// Ensures the context accepts input.
    pub(crate) fn ensure_input(&self) -> Result<(), ErrorKind> {
        match self.state {
            ContextState::Input => Ok(()),
            _ => Err(err::ClauseDBError::DecisionMade.into()),
        }
    }
}
