//! Literals are atoms paired with a (boolean) polarity.
//!
//! ```rust
//! # use logicbench::structures::literal::CLiteral;
//! let literal = CLiteral::new(79, true);
//!
//! assert!(literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert!(!literal.negate().polarity());
//! assert_eq!(-literal, literal.negate());
//! ```
//!
//! Literals are ordered by atom and then polarity, with `false` (strictly) less than `true`.
//! This ordering is relied on when sorting and deduplicating clauses.

use crate::structures::atom::Atom;

/// The canonical representation of a literal, as an atom paired with a boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CLiteral {
    /// The atom of a literal.
    atom: Atom,

    /// The polarity of a literal.
    polarity: bool,
}

impl CLiteral {
    /// A fresh literal, specified by pairing an atom with a boolean.
    pub fn new(atom: Atom, polarity: bool) -> Self {
        Self { atom, polarity }
    }

    /// The negation of the literal.
    pub fn negate(&self) -> Self {
        Self {
            atom: self.atom,
            polarity: !self.polarity,
        }
    }

    /// The atom of the literal.
    pub fn atom(&self) -> Atom {
        self.atom
    }

    /// The polarity of the literal.
    pub fn polarity(&self) -> bool {
        self.polarity
    }

    /// A dense index for the literal, suitable for indexing per-literal lists.
    ///
    /// The literals of atom *a* occupy indicies *2a* (negative) and *2a + 1* (positive).
    pub fn index(&self) -> usize {
        (self.atom as usize) * 2 + (self.polarity as usize)
    }

    /// The literal in it's integer form, with sign indicating polarity.
    pub fn as_int(&self) -> isize {
        match self.polarity {
            true => self.atom as isize,
            false => -(self.atom as isize),
        }
    }
}

impl std::ops::Neg for CLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for CLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.polarity {
            true => write!(f, "{}", self.atom),
            false => write!(f, "-{}", self.atom),
        }
    }
}
