/*!
A definitional (aka. Tseitin) encoding of formulas into clauses.

Each compound subformula *φ* is given a fresh atom *x*, and clauses requiring *x* to be equivalent to *φ* are added to the context.
For an [And] of *a* and *b*, defined by *x*:
- ¬*x* ∨ *a*
- ¬*x* ∨ *b*
- *x* ∨ ¬*a* ∨ ¬*b*

For an [Or] of *a* and *b*, defined by *x*:
- ¬*x* ∨ *a* ∨ *b*
- *x* ∨ ¬*a*
- *x* ∨ ¬*b*

An implication from *a* to *b* is encoded as the disjunction of ¬*a* and *b*, and negation requires no fresh atom, as the negation of a formula is the negation of the literal defining the formula.

Definitions are recorded on the context, so a subformula occurring many times (or in many asserted formulas) is defined once.

[And]: crate::structures::formula::Formula::And
[Or]: crate::structures::formula::Formula::Or
*/

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::{formula::Formula, literal::CLiteral},
    types::err::ErrorKind,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Asserts `formula` is true, through a unit clause on the literal defining the formula.
    pub fn assert_formula(&mut self, formula: &Formula) -> Result<(), ErrorKind> {
        let literal = self.encode(formula)?;
        log::trace!(target: targets::ENCODING, "Asserted {formula} as {literal}");
        self.add_clause(vec![literal])?;
        Ok(())
    }

    /// A literal equivalent to `formula`, given the clauses added to define the subformulas of `formula`.
    pub fn encode(&mut self, formula: &Formula) -> Result<CLiteral, ErrorKind> {
        match formula {
            Formula::Atom(name) => Ok(CLiteral::new(self.intern(name)?, true)),

            Formula::Not(inner) => Ok(self.encode(inner)?.negate()),

            Formula::And(left, right) => {
                if let Some(&literal) = self.definitions.get(formula) {
                    return Ok(literal);
                }
                let a = self.encode(left)?;
                let b = self.encode(right)?;
                let x = CLiteral::new(self.fresh_atom()?, true);

                self.add_clause(vec![-x, a])?;
                self.add_clause(vec![-x, b])?;
                self.add_clause(vec![x, -a, -b])?;

                self.define(formula, x)
            }

            Formula::Or(left, right) => {
                if let Some(&literal) = self.definitions.get(formula) {
                    return Ok(literal);
                }
                let a = self.encode(left)?;
                let b = self.encode(right)?;
                self.define_disjunction(formula, a, b)
            }

            Formula::Implies(left, right) => {
                if let Some(&literal) = self.definitions.get(formula) {
                    return Ok(literal);
                }
                let a = self.encode(left)?.negate();
                let b = self.encode(right)?;
                self.define_disjunction(formula, a, b)
            }
        }
    }

    fn define_disjunction(
        &mut self,
        formula: &Formula,
        a: CLiteral,
        b: CLiteral,
    ) -> Result<CLiteral, ErrorKind> {
        let x = CLiteral::new(self.fresh_atom()?, true);

        self.add_clause(vec![-x, a, b])?;
        self.add_clause(vec![x, -a])?;
        self.add_clause(vec![x, -b])?;

        self.define(formula, x)
    }

    fn define(&mut self, formula: &Formula, literal: CLiteral) -> Result<CLiteral, ErrorKind> {
        log::trace!(target: targets::ENCODING, "{literal} := {formula}");
        self.definitions.insert(formula.clone(), literal);
        Ok(literal)
    }
}

#[cfg(test)]
mod encode_tests {
    use crate::{config::Config, context::Context, reports::Report, structures::formula::Formula};

    #[test]
    fn shared_subformulas_are_defined_once() {
        let mut the_context = Context::from_config(Config::default());
        let p_or_q = Formula::or(Formula::atom("p"), Formula::atom("q"));

        let first = the_context.encode(&p_or_q).unwrap();
        let second = the_context.encode(&Formula::and(p_or_q.clone(), p_or_q.clone())).unwrap();

        assert_ne!(first, second);
        assert_eq!(the_context.encode(&p_or_q).unwrap(), first);
        // p, q, the disjunction, and the conjunction.
        assert_eq!(the_context.atom_db.count(), 4);
    }

    #[test]
    fn excluded_middle_is_valid() {
        let p = Formula::atom("p");
        let excluded_middle = Formula::or(p.clone(), Formula::not(p));

        let mut the_context = Context::from_config(Config::default());
        assert!(the_context.assert_formula(&Formula::not(excluded_middle)).is_ok());
        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn implication_has_a_countermodel() {
        let implication = Formula::implies(Formula::atom("p"), Formula::atom("q"));

        let mut the_context = Context::from_config(Config::default());
        assert!(the_context.assert_formula(&Formula::not(implication)).is_ok());
        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

        let model = the_context.named_valuation().unwrap();
        assert_eq!(model.get("p"), Some(&true));
        assert_eq!(model.get("q"), Some(&false));
    }
}
