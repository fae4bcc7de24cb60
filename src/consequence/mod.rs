/*!
Logical consequence, by refutation.

A conclusion follows from some premises if and only if the premises together with the negation of the conclusion are unsatisfiable.
So, to check for consequence, a fresh [context](crate::context) is built, each premise and the negated conclusion are [asserted](crate::context::GenericContext::assert_formula), and the context is solved:
- If the context is unsatisfiable, the conclusion is entailed.
- If the context is satisfiable, the conclusion is not entailed, and the valuation of the context restricted to named atoms is a countermodel.
- If the solve stops at some configured limit, the result is [Unknown](Report::Unknown) and the conclusion is *not* reported as entailed.

Any error is returned as an error, and is not mistaken for a failed entailment.

```rust
# use logicbench::consequence::ConsequenceQuery;
# use logicbench::config::Config;
let modus_tollens = ConsequenceQuery::parse(&["Implies(p, q)", "Not(q)"], "Not(p)").unwrap();
assert!(modus_tollens.check(&Config::default()).unwrap().entailed);

let affirming_the_consequent = ConsequenceQuery::parse(&["Implies(p, q)", "q"], "p").unwrap();
let result = affirming_the_consequent.check(&Config::default()).unwrap();
assert!(!result.entailed);

let countermodel = result.model.unwrap();
assert_eq!(countermodel.get("p"), Some(&false));
assert_eq!(countermodel.get("q"), Some(&true));
```
*/

use std::collections::BTreeMap;

use crate::{
    builder::expression::{self},
    config::Config,
    context::Context,
    misc::log::targets::{self},
    reports::Report,
    structures::{atom::AtomTable, formula::Formula},
    types::err::{self, ErrorKind},
};

/// A valuation of named atoms.
pub type Model = BTreeMap<String, bool>;

/// The result of a consequence check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Consequence {
    /// Whether the conclusion follows from the premises.
    pub entailed: bool,

    /// The report of the solve of the premises together with the negated conclusion.
    pub status: Report,

    /// A countermodel, if the conclusion is not entailed.
    pub model: Option<Model>,
}

/// Determines whether `conclusion` follows from `premises`, with the default configuration.
pub fn is_consequence(premises: &[Formula], conclusion: &Formula) -> Result<Consequence, ErrorKind> {
    is_consequence_with(&Config::default(), premises, conclusion)
}

/// Determines whether `conclusion` follows from `premises`, with a context built from `config`.
pub fn is_consequence_with(
    config: &Config,
    premises: &[Formula],
    conclusion: &Formula,
) -> Result<Consequence, ErrorKind> {
    let mut the_context = Context::from_config(config.clone());

    for premise in premises {
        the_context.assert_formula(premise)?;
    }
    the_context.assert_formula(&Formula::not(conclusion.clone()))?;

    let status = the_context.solve()?;
    log::debug!(target: targets::CONSEQUENCE,
        "{status} after {} decisions and {} conflicts",
        the_context.counters.total_decisions,
        the_context.counters.total_conflicts
    );

    let consequence = match status {
        Report::Unsatisfiable => Consequence {
            entailed: true,
            status,
            model: None,
        },

        Report::Satisfiable => Consequence {
            entailed: false,
            status,
            model: Some(the_context.named_valuation()?),
        },

        Report::Unknown => Consequence {
            entailed: false,
            status,
            model: None,
        },
    };

    Ok(consequence)
}

/// Premises and a conclusion, parsed with a shared table of atoms.
#[derive(Clone, Debug)]
pub struct ConsequenceQuery {
    pub premises: Vec<Formula>,
    pub conclusion: Formula,
    pub atoms: AtomTable,
}

impl ConsequenceQuery {
    /// Parses each premise and the conclusion, with every occurrence of a name resolving to the same atom.
    pub fn parse(premises: &[&str], conclusion: &str) -> Result<Self, err::ParseError> {
        let mut atoms = AtomTable::default();
        let premises = expression::parse_all(premises.iter().copied(), &mut atoms)?;
        let conclusion = expression::parse(conclusion, &mut atoms)?;

        Ok(ConsequenceQuery {
            premises,
            conclusion,
            atoms,
        })
    }

    pub fn check(&self, config: &Config) -> Result<Consequence, ErrorKind> {
        is_consequence_with(config, &self.premises, &self.conclusion)
    }
}

#[cfg(test)]
mod consequence_tests {
    use super::*;

    #[test]
    fn modus_ponens() {
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let premises = [Formula::implies(p.clone(), q.clone()), p];

        let result = is_consequence(&premises, &q).unwrap();
        assert!(result.entailed);
        assert_eq!(result.status, Report::Unsatisfiable);
        assert!(result.model.is_none());
    }

    #[test]
    fn no_premises() {
        let p = Formula::atom("p");
        let tautology = Formula::implies(p.clone(), p.clone());

        assert!(is_consequence(&[], &tautology).unwrap().entailed);
        assert!(!is_consequence(&[], &p).unwrap().entailed);
    }

    #[test]
    fn inconsistent_premises_entail_anything() {
        let p = Formula::atom("p");
        let premises = [p.clone(), Formula::not(p)];

        assert!(is_consequence(&premises, &Formula::atom("q")).unwrap().entailed);
    }

    #[test]
    fn models_are_named_atoms_only() {
        let query = ConsequenceQuery::parse(&["Or(p, q)"], "p").unwrap();
        let result = query.check(&Config::default()).unwrap();

        assert!(!result.entailed);
        let model = result.model.unwrap();
        assert_eq!(model.keys().cloned().collect::<Vec<_>>(), vec!["p", "q"]);
        assert_eq!(model.get("p"), Some(&false));
    }

    #[test]
    fn parse_errors_are_errors() {
        assert!(matches!(
            ConsequenceQuery::parse(&["Implies(p)"], "q"),
            Err(err::ParseError::Arity { .. })
        ));
    }

    #[test]
    fn random_decisions_agree() {
        let mut config = Config::default();
        config.random_decision_bias.value = 1.0;
        config.polarity_lean.value = 0.5;
        config.seed.value = 42;

        let query = ConsequenceQuery::parse(
            &["Implies(p, q)", "Implies(r, s)", "Or(p, r)"],
            "Or(q, s)",
        )
        .unwrap();
        assert!(query.check(&config).unwrap().entailed);

        let query = ConsequenceQuery::parse(&["Implies(p, q)", "Implies(r, s)", "Or(p, r)"], "q").unwrap();
        assert!(!query.check(&config).unwrap().entailed);
    }
}
