/*!
Instantiation of templates with sentence banks.

A template is text with named placeholders in braces, e.g. `Se {p}, então {q}.`
Whitespace inside braces is not significant, so `{ not q }` and `{not q}` name the same placeholder.

Instantiation substitutes the fragment of each placeholder from a [SentenceBank] and upper-cases the first character of the result.
Instantiation is pure, so the same template and bank always give the same text.

```rust
# use logicbench::template::{self, SentenceBank};
let mut bank = SentenceBank::from_pairs([("p", "chove"), ("q", "as ruas estão molhadas")]);
bank.backfill_negations(["not q"]);

let filled = template::instantiate("Se {p}, então {q}. Sabe-se que {not q}.", &bank).unwrap();
assert_eq!(filled, "Se chove, então as ruas estão molhadas. Sabe-se que não as ruas estão molhadas.");

let (condition, situation) = template::split_clauses(&filled);
assert_eq!(condition, "Se chove, então as ruas estão molhadas.");
assert_eq!(situation, "Sabe-se que não as ruas estão molhadas.");
```
*/

mod bank;
pub use bank::{SentenceBank, NEGATION_PREFIX};

use crate::types::err::{self};

/// The prefix of a negated placeholder name.
pub const NEGATED_PLACEHOLDER: &str = "not ";

/// A placeholder found in a template, as its byte range (braces included) together with its normalised name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    pub start: usize,
    pub end: usize,
    pub name: String,
}

/// The placeholders of `template`, in order, or an error if some brace is unclosed.
pub fn placeholders(template: &str) -> Result<Vec<Placeholder>, err::TemplateError> {
    let mut found = Vec::default();
    let mut rest_start = 0;

    while let Some(open) = template[rest_start..].find('{').map(|offset| rest_start + offset) {
        let Some(close) = template[open..].find('}').map(|offset| open + offset) else {
            return Err(err::TemplateError::UnclosedPlaceholder(open));
        };

        let name = template[open + 1..close]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        found.push(Placeholder {
            start: open,
            end: close + 1,
            name,
        });
        rest_start = close + 1;
    }

    Ok(found)
}

/// The names of the placeholders of `template`, up to any unclosed brace.
pub fn placeholder_names(template: &str) -> Vec<String> {
    match placeholders(template) {
        Ok(found) => found.into_iter().map(|placeholder| placeholder.name).collect(),
        Err(err::TemplateError::UnclosedPlaceholder(open)) => placeholder_names(&template[..open]),
        Err(_) => Vec::default(),
    }
}

/// For a negated placeholder name `not X`, the name `X`.
pub fn negated_base(name: &str) -> Option<&str> {
    name.strip_prefix(NEGATED_PLACEHOLDER)
        .filter(|base| !base.is_empty())
}

/// Fills each placeholder of `template` from `bank`, and upper-cases the first character of the result.
pub fn instantiate(template: &str, bank: &SentenceBank) -> Result<String, err::TemplateError> {
    let mut filled = String::with_capacity(template.len() * 2);
    let mut copied_to = 0;

    for placeholder in placeholders(template)? {
        let Some(fragment) = bank.get(&placeholder.name) else {
            return Err(err::TemplateError::MissingPlaceholder(placeholder.name));
        };
        filled.push_str(&template[copied_to..placeholder.start]);
        filled.push_str(fragment);
        copied_to = placeholder.end;
    }
    filled.push_str(&template[copied_to..]);

    Ok(upper_initial(&filled))
}

/// Splits filled text into a condition and a situation.
///
/// The text is split on `". "`, the last clause is the situation, and the preceding clauses (rejoined, with a final `.`) are the condition.
/// Text with a single clause is entirely condition.
///
/// For templates of more than two sentences (e.g. the dilemmas) the situation is only the last sentence, which need not be the whole of the situation.
pub fn split_clauses(filled: &str) -> (String, String) {
    let clauses: Vec<&str> = filled.split(". ").collect();
    match clauses.split_last() {
        Some((situation, condition)) if !condition.is_empty() => {
            (format!("{}.", condition.join(". ")), situation.to_string())
        }
        _ => (filled.to_string(), String::default()),
    }
}

/// `text`, with the first character upper-cased.
pub fn upper_initial(text: &str) -> String {
    let mut characters = text.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::default(),
    }
}

#[cfg(test)]
mod template_tests {
    use super::*;

    #[test]
    fn whitespace_in_braces() {
        let names = placeholder_names("Sabe-se que { not  q } e {p}.");
        assert_eq!(names, vec!["not q", "p"]);
    }

    #[test]
    fn unclosed_braces() {
        assert_eq!(
            placeholders("Se {p, então"),
            Err(err::TemplateError::UnclosedPlaceholder(3))
        );
        assert_eq!(placeholder_names("{p} e {q"), vec!["p"]);
    }

    #[test]
    fn missing_placeholder() {
        let bank = SentenceBank::from_pairs([("p", "chove")]);
        assert_eq!(
            instantiate("Se {p}, então {q}.", &bank),
            Err(err::TemplateError::MissingPlaceholder("q".to_string()))
        );
    }

    #[test]
    fn instantiation_is_deterministic() {
        let bank = SentenceBank::from_pairs([("p", "ela estuda"), ("q", "ela passa")]);
        let template = "{p} ou {q}";
        let first = instantiate(template, &bank).unwrap();
        assert_eq!(first, "Ela estuda ou ela passa");
        for _ in 0..8 {
            assert_eq!(instantiate(template, &bank).unwrap(), first);
        }
    }

    #[test]
    fn single_clause_split() {
        assert_eq!(
            split_clauses("Se chove, então as ruas estão molhadas."),
            ("Se chove, então as ruas estão molhadas.".to_string(), String::default())
        );
    }

    #[test]
    fn dilemma_split() {
        let (condition, situation) = split_clauses("Se a, então b. Se c, então d. Sabe-se que a ou c.");
        assert_eq!(condition, "Se a, então b. Se c, então d.");
        assert_eq!(situation, "Sabe-se que a ou c.");
    }

    #[test]
    fn negated_bases() {
        assert_eq!(negated_base("not q"), Some("q"));
        assert_eq!(negated_base("q"), None);
        assert_eq!(negated_base("not "), None);
    }
}
