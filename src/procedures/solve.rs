/*!
A procedure to determine the satisfiability of the formula in a context.

# Overview

The solve procedure alternates between propagation, decisions, and backtracking:
1. Every unit clause is asserted. A unit clause in conflict with another ends the solve as unsatisfiable.
2. Propagation is applied to every assignment yet to be propagated.
   - If propagation finds a conflict, [backtracking](crate::procedures::backtrack) flips the most recent unflipped decision, or the solve ends as unsatisfiable.
   - Otherwise, a [decision](crate::procedures::decision) is made on some unvalued atom, or the solve ends as satisfiable if every atom has a value.
3. The loop repeats, unless a conflict or time limit has been reached, in which case the solve ends with an unknown result.

For a solve with an unknown result, the context is left in the [Solving](crate::context::ContextState::Solving) state.

# Example

```rust
# use logicbench::context::Context;
# use logicbench::config::Config;
# use logicbench::reports::Report;
# use logicbench::structures::literal::CLiteral;
let mut the_context = Context::from_config(Config::default());

let p = the_context.intern("p").unwrap();
let q = the_context.intern("q").unwrap();

for (x, y) in [(true, true), (true, false), (false, true), (false, false)] {
    let _ = the_context.add_clause(vec![CLiteral::new(p, x), CLiteral::new(q, y)]);
}

assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
```
*/

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets::{self},
    reports::Report,
    types::err::{self, ErrorKind},
};

impl<R: rand::Rng> GenericContext<R> {
    /// Determines the satisfiability of the context, unless interrupted by some limit.
    ///
    /// Returns an error if the context has already been solved.
    pub fn solve(&mut self) -> Result<Report, ErrorKind> {
        match self.state {
            ContextState::Input => {}
            _ => return Err(err::StateError::SolveComplete.into()),
        }

        let start = std::time::Instant::now();
        let time_limit = self.config.time_limit.value;
        let conflict_limit = self.config.conflict_limit.value;

        self.state = ContextState::Solving;

        if !self.assert_units() {
            self.state = ContextState::Unsatisfiable(None);
            self.counters.time = start.elapsed();
            return Ok(self.report());
        }

        'solve_loop: loop {
            self.counters.total_iterations += 1;

            match self.bcp() {
                Ok(()) => {
                    if self.make_decision().is_none() {
                        self.state = ContextState::Satisfiable;
                        break 'solve_loop;
                    }
                }

                Err(err::BCPError::Conflict(key)) => {
                    self.counters.total_conflicts += 1;

                    if !self.backtrack() {
                        self.state = ContextState::Unsatisfiable(Some(key));
                        break 'solve_loop;
                    }

                    if conflict_limit > 0 && self.counters.total_conflicts >= conflict_limit {
                        log::info!(target: targets::BACKTRACK, "Conflict limit reached");
                        break 'solve_loop;
                    }
                }

                Err(e) => {
                    self.counters.time = start.elapsed();
                    return Err(e.into());
                }
            }

            if !time_limit.is_zero() && start.elapsed() > time_limit {
                log::info!(target: targets::BACKTRACK, "Time limit reached");
                break 'solve_loop;
            }
        }

        self.counters.time = start.elapsed();
        Ok(self.report())
    }

    /// Values the literal of each unit clause.
    ///
    /// Returns false if a pair of unit clauses conflict.
    fn assert_units(&mut self) -> bool {
        let units = self.clause_db.units().to_vec();
        for unit in units {
            match self.atom_db.value_of_literal(unit) {
                None => self.assign(unit),
                Some(true) => {}
                Some(false) => {
                    log::trace!(target: targets::PROPAGATION, "Conflicting unit {unit}");
                    return false;
                }
            }
        }
        true
    }
}
