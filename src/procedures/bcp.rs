/*!
A context method for boolean constraint propagation.

See [GenericContext::bcp] for the relevant context method.

# Overview
Propagates each assignment on the trail which has not yet been propagated.

For an assignment making some literal *l* true, the clauses watching ¬*l* are examined.
For each clause, either:
- The other watched literal is true, and the clause is left as is.
- Some unwatched literal is not false, and the watch is moved to that literal.
- The other watched literal has no value, and is asserted by the clause.
- The other watched literal is false, and the clause conflicts with the valuation.

# Complications

The watch list under examination is [taken](crate::db::watches::Watches::take) from the watch database and [restored](crate::db::watches::Watches::restore) after examination.
While taken, watches are only added to lists of literals which are not false, and so never to the taken list.
*/

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::literal::CLiteral,
    types::err::{self},
};

impl<R: rand::Rng> GenericContext<R> {
    /// For documentation see [procedures::bcp](crate::procedures::bcp).
    ///
    /// # Soundness
    /// The implementation requires the literals at index 0 and 1 of each stored clause are the watched literals.
    pub fn bcp(&mut self) -> Result<(), err::BCPError> {
        while let Some(literal) = self.trail.next_to_propagate() {
            self.counters.total_propagations += 1;
            self.propagate_falsity(literal.negate())?;
        }
        Ok(())
    }

    /// Examines clauses watching `false_literal`, which has just been made false.
    fn propagate_falsity(&mut self, false_literal: CLiteral) -> Result<(), err::BCPError> {
        let mut watchers = self.watches.take(false_literal);
        let mut result = Ok(());
        let mut index = 0;

        'watch_loop: while index < watchers.len() {
            let key = watchers[index];
            let Ok(clause) = self.clause_db.get_mut(key) else {
                log::error!(target: targets::PROPAGATION, "Watched clause missing from the database");
                result = Err(err::BCPError::MissingClause);
                break 'watch_loop;
            };

            if clause[0] == false_literal {
                clause.swap(0, 1);
            }
            let other = clause[0];

            if self.atom_db.value_of_literal(other) == Some(true) {
                index += 1;
                continue 'watch_loop;
            }

            for candidate in 2..clause.len() {
                if self.atom_db.value_of_literal(clause[candidate]) != Some(false) {
                    clause.swap(1, candidate);
                    self.watches.watch(clause[1], key);
                    watchers.swap_remove(index);
                    continue 'watch_loop;
                }
            }

            match self.atom_db.value_of_literal(other) {
                None => {
                    log::trace!(target: targets::PROPAGATION, "{other} from {false_literal}");
                    self.atom_db.set_value(other);
                    self.trail.store_assignment(other);
                    index += 1;
                }

                Some(_) => {
                    log::trace!(target: targets::PROPAGATION, "Conflict on {false_literal}");
                    result = Err(err::BCPError::Conflict(key));
                    break 'watch_loop;
                }
            }
        }

        self.watches.restore(false_literal, watchers);
        result
    }
}
