//! Key structures, such as atoms, literals, clauses, and formulas.
//!
//! # Formulas and clauses
//!
//! Two representations of a propositional formula are used:
//!
//! - A [formula](formula::Formula) is a tree built from atoms with negation, conjunction, disjunction, and implication.
//!   This is the representation parsed from text and handed to the [consequence](crate::consequence) checker.
//! - A [clause](clause) is a disjunction of [literals](literal), and a collection of clauses is interpreted as their conjunction.
//!   This is the representation a [context](crate::context) reasons over.
//!
//! The [definitional encoding](crate::builder::encode) bridges the two, introducing a fresh atom for each compound subformula.
//!
//! ## (Boolean) values
//!
//! A (boolean) value is one of [true] or [false], and a valuation is a partial map from atoms to values.

pub mod atom;
pub mod clause;
pub mod formula;
pub mod literal;
pub mod valuation;
