//! Databases for holding information relevant to a solve.
//!
//! - [The atom database](crate::db::atom)
//!   + The valuation, and the names of those atoms which have a name.
//! - [The clause database](crate::db::clause)
//!   + Unit clauses, kept aside to be asserted at the start of a solve.
//!   + Every other clause, each indexed by a [ClauseKey].
//! - [The trail](crate::db::trail)
//!   + Assignments in order, split into decision levels, together with the head of the propagation queue.
//! - [Watches](crate::db::watches)
//!   + For each literal, the keys of clauses watching the literal.

pub mod atom;
pub mod clause;
pub mod trail;
pub mod watches;

slotmap::new_key_type! {
    /// A key to access a (non-unit) clause stored in the clause database.
    pub struct ClauseKey;
}
