/*!
Decisions --- choosing a value for some unvalued atom.

An atom is chosen either:
- At random from the unvalued atoms, with probability given by the [random_decision_bias](crate::config::Config::random_decision_bias).
- Otherwise, as the least unvalued atom.

The value given to the atom is `true` with probability given by the [polarity_lean](crate::config::Config::polarity_lean).

With the default configuration no randomness is consulted, and the decision made on a valuation is fixed.
*/

use rand::seq::IteratorRandom;

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::{atom::Atom, literal::CLiteral, valuation::Valuation},
};

impl<R: rand::Rng> GenericContext<R> {
    /// Chooses a decision literal, if some atom has no value.
    pub fn choose_decision(&mut self) -> Option<CLiteral> {
        let bias = self.config.random_decision_bias.value;
        let atom: Atom = if bias > 0.0 && self.rng.gen_bool(bias) {
            self.atom_db
                .valuation()
                .unvalued_atoms()
                .choose(&mut self.rng)?
        } else {
            self.atom_db.valuation().unvalued_atoms().next()?
        };

        let lean = self.config.polarity_lean.value;
        let polarity = lean > 0.0 && self.rng.gen_bool(lean);

        Some(CLiteral::new(atom, polarity))
    }

    /// Makes a decision on a fresh level, if some atom has no value.
    ///
    /// Returns the decision made, if any.
    pub fn make_decision(&mut self) -> Option<CLiteral> {
        let decision = self.choose_decision()?;
        log::trace!(target: targets::DECISION, "Decision {decision}");

        self.counters.total_decisions += 1;
        self.trail.open_level(false);
        self.assign(decision);
        Some(decision)
    }
}
