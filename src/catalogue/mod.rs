/*!
The rule catalogue.

A static table of [RuleDefinition]s, keyed by [LogicFamily] and rule name.
The catalogue is fixed at compile time, and is identified by [CATALOGUE_VERSION].

Each rule has:
- A premise template, from which the context of a sample is built.
- A conclusion template, the correct answer of a multiple choice sample.
- Question templates, each with phrasing variants and an expected answer.
- Optionally, a [Formalization] of the premises, together with a formal conclusion for some questions, with which the catalogue [verifies](verify) itself.

```rust
# use logicbench::catalogue::{self, LogicFamily};
let rule = catalogue::lookup(LogicFamily::Propositional, "Modus_Tollens").unwrap();
let required = catalogue::required_placeholders(rule);

assert!(required.contains("not q"));
assert_eq!(
    catalogue::base_placeholders(rule).into_iter().collect::<Vec<_>>(),
    vec!["p", "q"]
);
```
*/

mod rules;

use std::collections::BTreeSet;

use crate::{
    builder::expression::{self},
    config::Config,
    consequence::{self},
    misc::log::targets::{self},
    structures::atom::AtomTable,
    template::{self},
    types::err::{self, ErrorKind},
};

/// The version of the catalogue.
///
/// The propositional rules are the final propositional configuration of the dataset.
/// First-order and non-monotonic rules are extensions, grounded on a single individual.
pub const CATALOGUE_VERSION: &str = "pl9-fol5-nm2";

/// The family of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicFamily {
    Propositional,
    FirstOrder,
    NonMonotonic,
}

impl LogicFamily {
    /// The code of the family in rule keys.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Propositional => "PL",
            Self::FirstOrder => "FOL",
            Self::NonMonotonic => "NM",
        }
    }

    /// The name of the dataset folder of the family.
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Propositional => "propositional_logic",
            Self::FirstOrder => "first_order_logic",
            Self::NonMonotonic => "nm_logic",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, err::CatalogueError> {
        match code {
            "PL" => Ok(Self::Propositional),
            "FOL" => Ok(Self::FirstOrder),
            "NM" => Ok(Self::NonMonotonic),
            _ => Err(err::CatalogueError::UnknownFamily(code.to_string())),
        }
    }
}

impl std::fmt::Display for LogicFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The key of a rule, written `Family/Name`, e.g. `PL/Modus_Tollens`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleKey {
    pub family: LogicFamily,
    pub name: String,
}

impl std::str::FromStr for RuleKey {
    type Err = err::CatalogueError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let Some((code, name)) = key.split_once('/') else {
            return Err(err::CatalogueError::MalformedKey(key.to_string()));
        };
        if name.is_empty() || name.contains('/') {
            return Err(err::CatalogueError::MalformedKey(key.to_string()));
        }

        Ok(RuleKey {
            family: LogicFamily::from_code(code)?,
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.family.code(), self.name)
    }
}

/// A question template, as phrasing variants sharing an expected answer.
#[derive(Debug)]
pub struct QuestionTemplate {
    pub variants: &'static [&'static str],

    /// Whether the answer to the question is yes.
    pub answer: bool,

    /// The conclusion asked about, as an expression over the atoms of the rule's formalization.
    pub formal: Option<&'static str>,
}

/// The premises and conclusion of a rule, as expressions.
///
/// Atoms are named by the placeholders they formalize.
#[derive(Debug)]
pub struct Formalization {
    pub premises: &'static [&'static str],
    pub conclusion: &'static str,
}

#[derive(Debug)]
pub struct RuleDefinition {
    pub family: LogicFamily,
    pub name: &'static str,
    pub premise_template: &'static str,
    pub conclusion_template: &'static str,
    pub question_templates: &'static [QuestionTemplate],
    pub formalization: Option<Formalization>,
}

impl RuleDefinition {
    pub fn key(&self) -> RuleKey {
        RuleKey {
            family: self.family,
            name: self.name.to_string(),
        }
    }

    /// Every template string of the rule.
    pub fn templates(&self) -> impl Iterator<Item = &'static str> + '_ {
        [self.premise_template, self.conclusion_template]
            .into_iter()
            .chain(
                self.question_templates
                    .iter()
                    .flat_map(|question| question.variants.iter().copied()),
            )
    }
}

/// Every rule, in declaration order.
pub fn rules() -> impl Iterator<Item = &'static RuleDefinition> {
    rules::RULES.iter()
}

pub fn lookup(family: LogicFamily, name: &str) -> Result<&'static RuleDefinition, err::CatalogueError> {
    rules()
        .find(|rule| rule.family == family && rule.name == name)
        .ok_or_else(|| err::CatalogueError::NotFound(format!("{}/{name}", family.code())))
}

pub fn lookup_key(key: &RuleKey) -> Result<&'static RuleDefinition, err::CatalogueError> {
    lookup(key.family, &key.name)
}

/// Looks up a rule from the text of its key.
pub fn lookup_str(key: &str) -> Result<&'static RuleDefinition, err::CatalogueError> {
    let key: RuleKey = key.parse()?;
    lookup_key(&key)
}

/// The name of every placeholder in some template of `rule`.
pub fn required_placeholders(rule: &RuleDefinition) -> BTreeSet<String> {
    rule.templates()
        .flat_map(template::placeholder_names)
        .collect()
}

/// The required placeholders of `rule` which are not negations, and so must be generated.
pub fn base_placeholders(rule: &RuleDefinition) -> BTreeSet<String> {
    required_placeholders(rule)
        .into_iter()
        .filter(|name| template::negated_base(name).is_none())
        .collect()
}

/// What is checked in a [Verification].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationTarget {
    /// The conclusion of the formalization.
    Conclusion,

    /// The question template at the given index.
    Question(usize),
}

/// A check on the formalization of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verification {
    pub target: VerificationTarget,
    pub expected: bool,
    pub entailed: bool,
}

impl Verification {
    pub fn agrees(&self) -> bool {
        self.expected == self.entailed
    }
}

/// Checks the formalization of `rule`, if any: the conclusion should be entailed, and each question with a formal conclusion should be entailed if and only if the expected answer is yes.
///
/// A rule without formalization is not checked, and an empty list of checks is returned.
pub fn verify(rule: &RuleDefinition, config: &Config) -> Result<Vec<Verification>, ErrorKind> {
    let Some(formalization) = &rule.formalization else {
        log::debug!(target: targets::CATALOGUE, "{} has no formalization", rule.key());
        return Ok(Vec::default());
    };

    let mut atoms = AtomTable::default();
    let premises = expression::parse_all(formalization.premises.iter().copied(), &mut atoms)?;

    let mut checks = vec![(VerificationTarget::Conclusion, true, formalization.conclusion)];
    for (index, question) in rule.question_templates.iter().enumerate() {
        if let Some(formal) = question.formal {
            checks.push((VerificationTarget::Question(index), question.answer, formal));
        }
    }

    let mut verifications = Vec::with_capacity(checks.len());
    for (target, expected, formal) in checks {
        let conclusion = expression::parse(formal, &mut atoms)?;
        let result = consequence::is_consequence_with(config, &premises, &conclusion)?;

        let verification = Verification {
            target,
            expected,
            entailed: result.entailed,
        };
        if !verification.agrees() {
            log::error!(target: targets::CATALOGUE, "{} disagrees on {target:?}", rule.key());
        }
        verifications.push(verification);
    }

    Ok(verifications)
}
