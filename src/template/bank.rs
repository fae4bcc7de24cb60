use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::negated_base;

/// The prefix given to a fragment to synthesise its negation.
pub const NEGATION_PREFIX: &str = "não ";

/// A map from placeholder names to fragments of text.
///
/// Fragments are stored cleaned: trimmed, without a trailing period, and with a lower-case initial, so they compose mid-sentence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceBank {
    fragments: BTreeMap<String, String>,
}

impl SentenceBank {
    /// A bank from (name, fragment) pairs, with each fragment cleaned.
    pub fn from_pairs<N: Into<String>, F: AsRef<str>>(pairs: impl IntoIterator<Item = (N, F)>) -> Self {
        let mut bank = SentenceBank::default();
        for (name, fragment) in pairs {
            bank.insert(name, fragment.as_ref());
        }
        bank
    }

    /// Inserts `fragment` under `name`, after cleaning the fragment.
    pub fn insert(&mut self, name: impl Into<String>, fragment: &str) {
        self.fragments.insert(name.into(), clean(fragment));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fragments.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }

    /// Cleans every fragment of the bank.
    pub fn clean(&mut self) {
        for fragment in self.fragments.values_mut() {
            *fragment = clean(fragment);
        }
    }

    /// For each `not X` in `required` missing from the bank, with `X` in the bank, inserts the negation of the fragment of `X`.
    ///
    /// Existing entries are never replaced, so back-fill is idempotent.
    pub fn backfill_negations<S: AsRef<str>>(&mut self, required: impl IntoIterator<Item = S>) {
        for name in required {
            let name = name.as_ref();
            if self.contains(name) {
                continue;
            }
            if let Some(base) = negated_base(name) {
                if let Some(fragment) = self.fragments.get(base) {
                    let negation = format!("{NEGATION_PREFIX}{fragment}");
                    self.fragments.insert(name.to_string(), negation);
                }
            }
        }
    }
}

/// Trims `fragment`, strips one trailing period, and lower-cases the first character.
pub fn clean(fragment: &str) -> String {
    let trimmed = fragment.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end();

    let mut characters = trimmed.chars();
    match characters.next() {
        Some(first) => first.to_lowercase().chain(characters).collect(),
        None => String::default(),
    }
}

#[cfg(test)]
mod bank_tests {
    use super::*;

    #[test]
    fn cleaning() {
        assert_eq!(clean("  O alarme é acionado. "), "o alarme é acionado");
        assert_eq!(clean("É tarde"), "é tarde");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn backfill() {
        let mut bank = SentenceBank::from_pairs([("p", "Chove."), ("q", "as ruas estão molhadas")]);
        bank.backfill_negations(["not q", "not p", "not r", "p"]);

        assert_eq!(bank.get("not q"), Some("não as ruas estão molhadas"));
        assert_eq!(bank.get("not p"), Some("não chove"));
        assert!(!bank.contains("not r"));
    }

    #[test]
    fn backfill_keeps_authored_negations() {
        let mut bank = SentenceBank::from_pairs([("q", "a loja abre"), ("not q", "a loja fica fechada")]);
        bank.backfill_negations(["not q"]);
        assert_eq!(bank.get("not q"), Some("a loja fica fechada"));
    }

    #[test]
    fn backfill_is_idempotent() {
        let required = ["not p", "not q", "p", "q"];
        let mut once = SentenceBank::from_pairs([("p", "chove"), ("q", "venta")]);
        once.backfill_negations(required);

        let mut twice = once.clone();
        twice.backfill_negations(required);

        assert_eq!(once, twice);
    }

    #[test]
    fn transparent_serialization() {
        let bank: SentenceBank = serde_json::from_str(r#"{"p": "chove", "not p": "não chove"}"#).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(serde_json::to_string(&bank).unwrap(), r#"{"not p":"não chove","p":"chove"}"#);
    }
}
