/*!
The context --- to which formulas are added and within which solves take place.

Strictly, a [GenericContext] and a [Context].

The generic context is generic over the source of randomness, and a [Context] uses a seeded [StdRng](rand::rngs::StdRng).
[from_config](Context::from_config) is implemented for a context rather than a generic context to avoid requiring a source of randomness to be supplied alongside a config.

A context is used for one solve.
Clauses and formulas may be added only before the solve.

# Example
```rust
# use logicbench::context::Context;
# use logicbench::config::Config;
# use logicbench::reports::Report;
# use logicbench::structures::literal::CLiteral;
let mut the_context = Context::from_config(Config::default());

let p = the_context.intern("p").unwrap();
let q = the_context.intern("q").unwrap();

let p_q_clause = vec![CLiteral::new(p, true), CLiteral::new(q, true)];
assert!(the_context.add_clause(p_q_clause).is_ok());

let not_p = vec![CLiteral::new(p, false)];

assert!(the_context.add_clause(not_p).is_ok());
assert!(the_context.solve().is_ok());
assert_eq!(the_context.report(), Report::Satisfiable);

assert_eq!(the_context.value_of(p), Some(false));
assert_eq!(the_context.value_of(q), Some(true));
```
*/

mod counters;
pub use counters::Counters;
mod generic;
pub use generic::GenericContext;
mod specific;
pub use specific::Context;

use crate::db::ClauseKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The state of a context.
pub enum ContextState {
    /// The context allows input.
    Input,

    /// The consistency of the database is unknown.
    /// A context remains in this state if a solve stops at some limit.
    Solving,

    /// The database is known to be consistent, with a complete valuation.
    Satisfiable,

    /// The database is known to be inconsistent.
    /// The key of the clause falsified last is kept, if the inconsistency was found by propagation.
    Unsatisfiable(Option<ClauseKey>),
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Solving => write!(f, "Solving"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable(_) => write!(f, "Unsatisfiable"),
        }
    }
}
