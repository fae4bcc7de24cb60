/*!
The datasets: binary question answering (BQA) and multiple choice question answering (MCQA).

Samples are grouped by rule, with one [RuleDataset] written for each rule.
*/

pub mod assemble;
pub use assemble::{assemble, parse_distractor_lines, Assembly};

use serde::{Deserialize, Serialize};

use crate::catalogue::RuleDefinition;

/// The question of every multiple choice sample.
pub const MCQA_QUESTION: &str = "Qual seria a conclusão mais apropriada com base no contexto?";

/// The name of the file of samples for a rule.
pub const DATASET_FILE: &str = "data_instances.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BqaSample {
    pub id: usize,
    pub context: String,
    pub qa_pairs: Vec<QaPair>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqaSample {
    pub id: usize,
    pub context: String,
    pub question: String,
    pub options: Vec<String>,

    /// The index of the correct option.
    pub answer: usize,
}

/// The samples of a rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDataset<S> {
    /// The folder name of the family of the rule.
    #[serde(rename = "type")]
    pub kind: String,

    /// The name of the rule, in lower case.
    pub axiom: String,

    pub samples: Vec<S>,
}

impl<S> RuleDataset<S> {
    pub fn for_rule(rule: &RuleDefinition) -> Self {
        RuleDataset {
            kind: rule.family.folder().to_string(),
            axiom: rule.name.to_lowercase(),
            samples: Vec::default(),
        }
    }
}

#[cfg(test)]
mod dataset_tests {
    use super::*;
    use crate::catalogue::{self, LogicFamily};

    #[test]
    fn rule_dataset_fields() {
        let rule = catalogue::lookup(LogicFamily::Propositional, "Modus_Tollens").unwrap();
        let dataset: RuleDataset<BqaSample> = RuleDataset::for_rule(rule);

        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(json["type"], "propositional_logic");
        assert_eq!(json["axiom"], "modus_tollens");
        assert!(json["samples"].as_array().is_some_and(|samples| samples.is_empty()));
    }
}
