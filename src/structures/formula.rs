/*!
Propositional formulas, as trees.

A formula is built from named atoms with negation, (binary) conjunction, (binary) disjunction, and implication.
Each node exclusively owns its children, and a formula is not mutated once built.

Equality and hashing are structural: two formulas are equal if and only if they are the same variant with (recursively) equal children, and atoms are equal if and only if they have the same name.

The [Display] implementation renders a formula in the notation read by the [expression parser](crate::builder::expression), so rendering and re-parsing a formula returns an equal formula.

```rust
# use logicbench::structures::formula::Formula;
let mt = Formula::implies(Formula::atom("p"), Formula::atom("q"));
assert_eq!(mt.to_string(), "Implies(p,q)");

let nested = Formula::not(Formula::implies(Formula::atom("p"), Formula::atom("r")));
assert_eq!(nested.to_string(), "Not(Implies(p,r))");
```
*/

use std::collections::BTreeSet;

/// A propositional formula.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
    /// A named atom.
    Atom(String),

    /// The negation of a formula.
    Not(Box<Formula>),

    /// The conjunction of two formulas.
    And(Box<Formula>, Box<Formula>),

    /// The disjunction of two formulas.
    Or(Box<Formula>, Box<Formula>),

    /// The (material) implication from the first formula to the second.
    Implies(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Self {
        Formula::Atom(name.into())
    }

    pub fn not(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Formula, right: Formula) -> Self {
        Formula::Implies(Box::new(left), Box::new(right))
    }

    /// The left-associated conjunction of `operands`, or None if there are no operands.
    pub fn conjunction(operands: impl IntoIterator<Item = Formula>) -> Option<Self> {
        operands.into_iter().reduce(Formula::and)
    }

    /// The left-associated disjunction of `operands`, or None if there are no operands.
    pub fn disjunction(operands: impl IntoIterator<Item = Formula>) -> Option<Self> {
        operands.into_iter().reduce(Formula::or)
    }

    /// The names of all atoms in the formula.
    pub fn atom_names(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_atom_names(&mut names);
        names
    }

    fn collect_atom_names<'f>(&'f self, names: &mut BTreeSet<&'f str>) {
        match self {
            Formula::Atom(name) => {
                names.insert(name.as_str());
            }
            Formula::Not(inner) => inner.collect_atom_names(names),
            Formula::And(left, right) | Formula::Or(left, right) | Formula::Implies(left, right) => {
                left.collect_atom_names(names);
                right.collect_atom_names(names);
            }
        }
    }

    /// The value of the formula on an assignment of values to atom names, if every atom has a value.
    pub fn evaluate(&self, value_of: &impl Fn(&str) -> Option<bool>) -> Option<bool> {
        match self {
            Formula::Atom(name) => value_of(name),
            Formula::Not(inner) => inner.evaluate(value_of).map(|value| !value),
            Formula::And(left, right) => Some(left.evaluate(value_of)? && right.evaluate(value_of)?),
            Formula::Or(left, right) => Some(left.evaluate(value_of)? || right.evaluate(value_of)?),
            Formula::Implies(left, right) => {
                Some(!left.evaluate(value_of)? || right.evaluate(value_of)?)
            }
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Atom(name) => write!(f, "{name}"),
            Formula::Not(inner) => write!(f, "Not({inner})"),
            Formula::And(left, right) => write!(f, "And({left},{right})"),
            Formula::Or(left, right) => write!(f, "Or({left},{right})"),
            Formula::Implies(left, right) => write!(f, "Implies({left},{right})"),
        }
    }
}
