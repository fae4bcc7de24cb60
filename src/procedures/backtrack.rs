/*!
Chronological backtracking.

On a conflict, levels are removed from the top of the trail until a level whose decision has not been flipped is found.
The decision of that level is then flipped, on a fresh level marked as flipped.

If every level has been flipped (or no decision was made) the conflict holds on every valuation, and the formula is unsatisfiable.
*/

use crate::{context::GenericContext, misc::log::targets::{self}};

impl<R: rand::Rng> GenericContext<R> {
    /// Backtracks to, and flips, the most recent unflipped decision.
    ///
    /// Returns false if there is no such decision.
    pub fn backtrack(&mut self) -> bool {
        while let Some((level, assignments)) = self.trail.forget_top_level() {
            for literal in &assignments {
                self.atom_db.clear_value(literal.atom());
            }

            if !level.flipped {
                if let Some(decision) = assignments.first() {
                    let flip = decision.negate();
                    log::trace!(target: targets::BACKTRACK, "Flip {decision} to {flip}");

                    self.counters.total_decisions += 1;
                    self.trail.open_level(true);
                    self.assign(flip);
                    return true;
                }
            }
        }

        false
    }
}
