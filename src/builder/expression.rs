/*!
A parser for formulas written in function-call notation.

# Grammar

```text
formula := atom | call
atom    := [A-Za-z_][A-Za-z0-9_]*
call    := identifier "(" arglist? ")"
arglist := formula ("," formula)*
```

Whitespace surrounding the text, and surrounding each argument, is ignored.

The operators are `Not` (one argument), `Implies` (two arguments), and `And` and `Or` (two or more arguments, associated to the left).
Any other call is an [UnknownOperator](err::ParseError::UnknownOperator).

```rust
# use logicbench::builder::expression::parse;
# use logicbench::structures::{atom::AtomTable, formula::Formula};
let mut table = AtomTable::default();

let formula = parse("Or(p, q, Not(r))", &mut table).unwrap();
let expected = Formula::or(
    Formula::or(Formula::atom("p"), Formula::atom("q")),
    Formula::not(Formula::atom("r")),
);

assert_eq!(formula, expected);
assert_eq!(table.len(), 3);
```

Positions in [Syntax](err::ParseError::Syntax) errors are byte offsets into the text given to [parse].
*/

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    misc::log::targets::{self},
    structures::{atom::AtomTable, formula::Formula},
    types::err::{self},
};

static ATOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("atom pattern is valid")
});

static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_]*)\((.*)\)$").expect("call pattern is valid")
});

#[derive(Clone, Copy)]
enum Operator {
    Not,
    And,
    Or,
    Implies,
}

impl Operator {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Not" => Some(Self::Not),
            "And" => Some(Self::And),
            "Or" => Some(Self::Or),
            "Implies" => Some(Self::Implies),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Not => "Not",
            Self::And => "And",
            Self::Or => "Or",
            Self::Implies => "Implies",
        }
    }

    fn apply(&self, mut arguments: Vec<Formula>) -> Result<Formula, err::ParseError> {
        let found = arguments.len();
        let arity_error = err::ParseError::Arity {
            operator: self.name(),
            found,
        };

        match (self, found) {
            (Self::Not, 1) => Ok(Formula::not(arguments.remove(0))),

            (Self::Implies, 2) => {
                let consequent = arguments.remove(1);
                let antecedent = arguments.remove(0);
                Ok(Formula::implies(antecedent, consequent))
            }

            (Self::And, 2..) => Formula::conjunction(arguments).ok_or(arity_error),

            (Self::Or, 2..) => Formula::disjunction(arguments).ok_or(arity_error),

            _ => Err(arity_error),
        }
    }
}

/// Parses `text` to a formula, interning the name of each atom in `table`.
pub fn parse(text: &str, table: &mut AtomTable) -> Result<Formula, err::ParseError> {
    let result = parse_at(text, 0, table);
    if let Err(e) = &result {
        log::debug!(target: targets::PARSER, "Failed to parse \"{text}\": {e}");
    }
    result
}

/// Parses each of `texts` with a shared table.
pub fn parse_all<'t>(
    texts: impl IntoIterator<Item = &'t str>,
    table: &mut AtomTable,
) -> Result<Vec<Formula>, err::ParseError> {
    texts.into_iter().map(|text| parse(text, table)).collect()
}

/// Parses `text`, which begins at byte `offset` of the original text.
fn parse_at(text: &str, offset: usize, table: &mut AtomTable) -> Result<Formula, err::ParseError> {
    let leading = text.len() - text.trim_start().len();
    let trimmed = text.trim();
    let position = offset + leading;

    if trimmed.is_empty() {
        return Err(err::ParseError::Syntax {
            position: offset,
            reason: "empty formula",
        });
    }

    if ATOM.is_match(trimmed) {
        table.intern(trimmed);
        return Ok(Formula::atom(trimmed));
    }

    let Some(captures) = CALL.captures(trimmed) else {
        return Err(err::ParseError::Syntax {
            position,
            reason: "malformed expression",
        });
    };

    let (Some(name), Some(arguments)) = (captures.get(1), captures.get(2)) else {
        return Err(err::ParseError::Syntax {
            position,
            reason: "malformed expression",
        });
    };

    let Some(operator) = Operator::from_name(name.as_str()) else {
        return Err(err::ParseError::UnknownOperator(name.as_str().to_string()));
    };

    let arguments_offset = position + arguments.start();
    let segments = split_arguments(arguments.as_str(), arguments_offset)?;

    let mut formulas = Vec::with_capacity(segments.len());
    for (segment_offset, segment) in segments {
        if segment.trim().is_empty() {
            return Err(err::ParseError::Syntax {
                position: segment_offset,
                reason: "empty argument",
            });
        }
        formulas.push(parse_at(segment, segment_offset, table)?);
    }

    operator.apply(formulas)
}

/// Splits `arguments` at commas outside of any parentheses, pairing each segment with its offset in the original text.
///
/// An argument list of only whitespace is split into no segments.
fn split_arguments(arguments: &str, offset: usize) -> Result<Vec<(usize, &str)>, err::ParseError> {
    if arguments.trim().is_empty() {
        return Ok(Vec::default());
    }

    let mut segments = Vec::default();
    let mut depth: usize = 0;
    let mut segment_start = 0;

    for (index, character) in arguments.char_indices() {
        match character {
            '(' => depth += 1,

            ')' => {
                depth = depth.checked_sub(1).ok_or(err::ParseError::Syntax {
                    position: offset + index,
                    reason: "unbalanced parentheses",
                })?;
            }

            ',' if depth == 0 => {
                segments.push((offset + segment_start, &arguments[segment_start..index]));
                segment_start = index + 1;
            }

            _ => {}
        }
    }

    if depth != 0 {
        return Err(err::ParseError::Syntax {
            position: offset + arguments.len(),
            reason: "unbalanced parentheses",
        });
    }

    segments.push((offset + segment_start, &arguments[segment_start..]));
    Ok(segments)
}
