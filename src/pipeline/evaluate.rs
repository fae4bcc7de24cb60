/*!
Stage 6: evaluation of models on the BQA dataset.

Each question of the dataset is put to each evaluated model in two ways:
- Directly, with the context and the question, asking for `Sim` or `Não`.
- As a satisfiability check, with the context as premises and the conclusion asked about, asking whether the premises together with the negated conclusion are `sat` or `unsat`.

An answer is correct if it matches the expected answer of the question, with `unsat` read as yes.
A reply which cannot be read is noted as no answer.
No answer is incorrect for the direct method, while for the satisfiability check questions without an answer (or without a conclusion which can be read from the question) are excluded from accuracy.

The answers of each model are kept in a JSON Lines artifact, and the evaluation resumes in the same way as the [audit](super::audit).
The accuracy of each model, by rule, is written to `evaluation/<model>.json` under the output directory.
*/

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    config::PipelineConfig,
    dataset::{BqaSample, RuleDataset},
    misc::log::targets::{self},
    pipeline::{
        artifact, bqa::BQA_DIR, dataset_path, generation::Generate, on_generation_failure, prompts, selected_rules,
        Progress, Stage, StageReport,
    },
    types::err::{self, ErrorKind},
};

/// The name of the directory of accuracy summaries.
pub const EVALUATION_DIR: &str = "evaluation";

const CONCLUSION_PREFIXES: [&str; 4] = [
    "Isso implica que ",
    "Podemos inferir que ",
    "Podemos concluir que ",
    "isso significa que ",
];

/// The answer of a reply to a yes or no question.
pub fn parse_direct(reply: &str) -> Option<bool> {
    let reply = reply.trim().to_lowercase();
    if reply.starts_with("sim") {
        Some(true)
    } else if reply.starts_with("não") || reply.starts_with("nao") {
        Some(false)
    } else {
        None
    }
}

/// The answer of a reply to a satisfiability check, where `unsat` is yes (the conclusion follows).
pub fn parse_sat_check(reply: &str) -> Option<bool> {
    let reply = reply.trim().to_lowercase();
    if reply.contains("unsat") {
        Some(true)
    } else if reply.contains("sat") {
        Some(false)
    } else {
        None
    }
}

/// The conclusion asked about in a question of the form "Isso implica que '…'?", without quotes.
///
/// ```rust
/// # use logicbench::pipeline::evaluate::question_conclusion;
/// assert_eq!(question_conclusion("Isso implica que 'não chove'?"), Some("não chove"));
/// assert_eq!(question_conclusion("Se um gato é leal, ele late?"), None);
/// ```
pub fn question_conclusion(question: &str) -> Option<&str> {
    let question = question.trim().trim_matches('?').trim();

    CONCLUSION_PREFIXES
        .iter()
        .find_map(|prefix| question.split_once(prefix))
        .map(|(_, conclusion)| conclusion.trim().trim_matches('\'').trim())
        .filter(|conclusion| !conclusion.is_empty())
}

/// A question of the BQA dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Question {
    rule: String,
    id: usize,
    context: String,
    question: String,
    expected: bool,
}

type QuestionKey = (String, usize, String, String);

impl Question {
    fn key(&self) -> QuestionKey {
        (self.rule.clone(), self.id, self.context.clone(), self.question.clone())
    }
}

/// The answers of a model to a question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub model: String,
    pub rule: String,

    /// The id of the sample of the question.
    pub id: usize,
    pub context: String,
    pub question: String,
    pub expected: bool,

    pub direct: Option<bool>,
    pub direct_reply: String,

    /// The answer of the satisfiability check, if a conclusion was read from the question and the reply was readable.
    pub sat_check: Option<bool>,
    pub sat_check_reply: Option<String>,
}

impl EvaluationRecord {
    fn key(&self) -> QuestionKey {
        (self.rule.clone(), self.id, self.context.clone(), self.question.clone())
    }

    pub fn direct_correct(&self) -> bool {
        self.direct == Some(self.expected)
    }

    pub fn sat_check_correct(&self) -> Option<bool> {
        self.sat_check.map(|answer| answer == self.expected)
    }
}

/// Counts of correct answers on the questions of a rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAccuracy {
    pub rule: String,
    pub questions: usize,
    pub direct_correct: usize,

    /// The count of questions with an answer to the satisfiability check.
    pub sat_check_answered: usize,
    pub sat_check_correct: usize,
}

impl RuleAccuracy {
    fn new(rule: &str) -> Self {
        RuleAccuracy {
            rule: rule.to_string(),
            questions: 0,
            direct_correct: 0,
            sat_check_answered: 0,
            sat_check_correct: 0,
        }
    }

    fn note(&mut self, record: &EvaluationRecord) {
        self.questions += 1;
        if record.direct_correct() {
            self.direct_correct += 1;
        }
        if let Some(correct) = record.sat_check_correct() {
            self.sat_check_answered += 1;
            if correct {
                self.sat_check_correct += 1;
            }
        }
    }

    pub fn direct_accuracy(&self) -> Option<f64> {
        match self.questions {
            0 => None,
            n => Some(self.direct_correct as f64 / n as f64),
        }
    }

    pub fn sat_check_accuracy(&self) -> Option<f64> {
        match self.sat_check_answered {
            0 => None,
            n => Some(self.sat_check_correct as f64 / n as f64),
        }
    }
}

/// A question answered incorrectly by the direct method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub rule: String,
    pub id: usize,
    pub question: String,
    pub expected: bool,
    pub received: Option<bool>,
}

/// The accuracy of a model, by rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAccuracy {
    pub model: String,

    /// The accuracy on each rule, in order of first appearance.
    pub rules: Vec<RuleAccuracy>,
    pub overall: RuleAccuracy,
    pub direct_failures: Vec<Failure>,
}

impl ModelAccuracy {
    pub fn from_records(model: &str, records: &[EvaluationRecord]) -> Self {
        let mut rules: Vec<RuleAccuracy> = Vec::default();
        let mut overall = RuleAccuracy::new("*");
        let mut direct_failures = Vec::default();

        for record in records {
            let position = match rules.iter().position(|accuracy| accuracy.rule == record.rule) {
                Some(position) => position,
                None => {
                    rules.push(RuleAccuracy::new(&record.rule));
                    rules.len() - 1
                }
            };
            rules[position].note(record);
            overall.note(record);

            if !record.direct_correct() {
                direct_failures.push(Failure {
                    rule: record.rule.clone(),
                    id: record.id,
                    question: record.question.clone(),
                    expected: record.expected,
                    received: record.direct,
                });
            }
        }

        ModelAccuracy {
            model: model.to_string(),
            rules,
            overall,
            direct_failures,
        }
    }
}

/// The path of the artifact of answers of `model`.
pub fn evaluation_artifact(config: &PipelineConfig, model: &str) -> PathBuf {
    let name = model
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>();
    super::artifact_path(config, &format!("stage_6_evaluation_{name}.jsonl"))
}

/// The path of the accuracy summary of `model`.
pub fn accuracy_path(config: &PipelineConfig, model: &str) -> PathBuf {
    config.output_dir.join(EVALUATION_DIR).join(format!("{model}.json"))
}

/// The accuracy of `model`, from the answers recorded so far.
pub fn accuracy(config: &PipelineConfig, model: &str) -> Result<ModelAccuracy, ErrorKind> {
    let path = evaluation_artifact(config, model);
    let records = match path.exists() {
        true => artifact::read_jsonl::<EvaluationRecord>(&path)?
            .into_iter()
            .map(|(_, record)| record)
            .collect(),
        false => Vec::default(),
    };
    Ok(ModelAccuracy::from_records(model, &records))
}

/// Every question of the BQA datasets of the selected rules.
fn dataset_questions(config: &PipelineConfig, report: &mut StageReport) -> Result<Vec<Question>, ErrorKind> {
    let mut questions = Vec::default();
    let mut found = false;

    for rule in selected_rules(config, report) {
        let path = dataset_path(config, BQA_DIR, rule);
        let dataset: RuleDataset<BqaSample> = match artifact::read_json(&path) {
            Ok(dataset) => dataset,
            Err(err::ArtifactError::Missing(_)) => {
                log::debug!(target: targets::PIPELINE, "No BQA dataset for {}", rule.key());
                continue;
            }
            Err(e) => {
                log::error!(target: targets::PIPELINE, "Skipping the BQA dataset of {}: {e}", rule.key());
                report.skipped += 1;
                continue;
            }
        };
        found = true;

        let key = rule.key().to_string();
        for sample in dataset.samples {
            for pair in sample.qa_pairs {
                questions.push(Question {
                    rule: key.clone(),
                    id: sample.id,
                    context: sample.context.clone(),
                    question: pair.question,
                    expected: pair.answer,
                });
            }
        }
    }

    match found {
        true => Ok(questions),
        false => Err(err::ArtifactError::Missing(config.output_dir.join(BQA_DIR)).into()),
    }
}

/// The keys of questions with a current answer of `model`.
///
/// Answers to questions no longer in the dataset are dropped from the artifact.
fn current_answers(path: &Path, questions: &[Question]) -> Result<BTreeSet<QuestionKey>, ErrorKind> {
    if !path.exists() {
        return Ok(BTreeSet::default());
    }

    let keys: BTreeSet<QuestionKey> = questions.iter().map(Question::key).collect();

    let records: Vec<(usize, EvaluationRecord)> = artifact::read_jsonl(path)?;
    let record_count = records.len();

    let mut answered = BTreeSet::default();
    let mut kept = Vec::with_capacity(record_count);
    for (_, record) in records {
        let key = record.key();
        if keys.contains(&key) && answered.insert(key) {
            kept.push(record);
        }
    }

    if kept.len() < record_count {
        log::warn!(target: targets::PIPELINE, "Dropping {} stale answers from {}", record_count - kept.len(), path.display());
        artifact::write_jsonl(path, &kept)?;
    }

    Ok(answered)
}

/// The answers of `model` to `question`, or `None` if a request failed (and the stage degrades).
fn ask(
    config: &PipelineConfig,
    generator: &mut impl Generate,
    model: &str,
    question: &Question,
) -> Result<Option<EvaluationRecord>, ErrorKind> {
    let purpose = format!("evaluate {model} on {} ({})", question.rule, question.id);

    let direct_reply = match generator.generate(&prompts::direct_answer(&question.context, &question.question), &purpose) {
        Ok(reply) => reply,
        Err(e) => {
            on_generation_failure(config, e, &purpose)?;
            return Ok(None);
        }
    };

    let sat_check_reply = match question_conclusion(&question.question) {
        Some(conclusion) => match generator.generate(&prompts::sat_check(&question.context, conclusion), &purpose) {
            Ok(reply) => Some(reply),
            Err(e) => {
                on_generation_failure(config, e, &purpose)?;
                return Ok(None);
            }
        },

        None => {
            log::debug!(target: targets::PIPELINE, "{purpose}: no conclusion in \"{}\"", question.question);
            None
        }
    };

    Ok(Some(EvaluationRecord {
        model: model.to_string(),
        rule: question.rule.clone(),
        id: question.id,
        context: question.context.clone(),
        question: question.question.clone(),
        expected: question.expected,
        direct: parse_direct(&direct_reply),
        direct_reply,
        sat_check: sat_check_reply.as_deref().and_then(parse_sat_check),
        sat_check_reply,
    }))
}

/// Puts each question of the BQA datasets of the selected rules to each model to evaluate, and writes the accuracy of each model.
///
/// Questions already answered by a model are not asked again.
/// If a request fails (and the stage degrades) no answer is written, so the question is asked on the next run.
pub fn evaluate(
    config: &PipelineConfig,
    generator: &mut impl Generate,
    progress: Progress,
) -> Result<StageReport, ErrorKind> {
    let mut report = StageReport::new(Stage::Evaluate);

    let questions = dataset_questions(config, &mut report)?;
    report.read = questions.len();

    let models = config.models_to_evaluate();
    let total = questions.len() * models.len();
    let mut done = 0;

    for model in models {
        generator.use_model(model);

        let path = evaluation_artifact(config, model);
        let answered = current_answers(&path, &questions)?;
        if !answered.is_empty() {
            log::info!(target: targets::PIPELINE, "Resuming evaluation of {model}, {} questions already answered", answered.len());
        }

        for question in &questions {
            done += 1;
            if answered.contains(&question.key()) {
                progress(done, total);
                continue;
            }

            match ask(config, generator, model, question)? {
                Some(record) => {
                    artifact::append_jsonl(&path, &record)?;
                    report.written += 1;
                }
                None => report.skipped += 1,
            }

            progress(done, total);
        }

        let accuracy = accuracy(config, model)?;
        let by_rule = accuracy
            .rules
            .iter()
            .map(|rule| (rule.rule.as_str(), rule.direct_accuracy()))
            .collect::<BTreeMap<_, _>>();
        log::info!(target: targets::PIPELINE, "{model}: direct accuracy by rule {by_rule:?}");

        artifact::write_json(&accuracy_path(config, model), &accuracy)?;
    }

    generator.use_model(&config.model);

    log::info!(target: targets::PIPELINE, "{report}");
    Ok(report)
}

#[cfg(test)]
mod evaluate_tests {
    use super::*;

    #[test]
    fn direct_replies() {
        assert_eq!(parse_direct("Sim."), Some(true));
        assert_eq!(parse_direct("  não, pois..."), Some(false));
        assert_eq!(parse_direct("Nao"), Some(false));
        assert_eq!(parse_direct("Talvez"), None);
    }

    #[test]
    fn sat_check_replies() {
        assert_eq!(parse_sat_check("unsat"), Some(true));
        assert_eq!(parse_sat_check("O resultado é SAT."), Some(false));
        assert_eq!(parse_sat_check("Não sei."), None);
    }

    #[test]
    fn conclusions() {
        assert_eq!(question_conclusion("Podemos inferir que 'chove'?"), Some("chove"));
        assert_eq!(question_conclusion("Podemos concluir que Rex é leal?"), Some("Rex é leal"));
        assert_eq!(question_conclusion("Isso implica que ''?"), None);
    }

    fn record(rule: &str, expected: bool, direct: Option<bool>, sat_check: Option<bool>) -> EvaluationRecord {
        EvaluationRecord {
            model: "m".to_string(),
            rule: rule.to_string(),
            id: 1,
            context: "c".to_string(),
            question: "q".to_string(),
            expected,
            direct,
            direct_reply: String::default(),
            sat_check,
            sat_check_reply: None,
        }
    }

    #[test]
    fn accuracy_by_rule() {
        let records = [
            record("PL/Modus_Tollens", true, Some(true), Some(true)),
            record("PL/Modus_Tollens", false, None, None),
            record("PL/Modus_Ponens", false, Some(true), Some(false)),
        ];
        let accuracy = ModelAccuracy::from_records("m", &records);

        let tollens = &accuracy.rules[0];
        assert_eq!(tollens.rule, "PL/Modus_Tollens");
        assert_eq!(tollens.direct_accuracy(), Some(0.5));
        assert_eq!(tollens.sat_check_accuracy(), Some(1.0));

        assert_eq!(accuracy.overall.questions, 3);
        assert_eq!(accuracy.overall.direct_correct, 1);
        assert_eq!(accuracy.overall.sat_check_answered, 2);
        assert_eq!(accuracy.direct_failures.len(), 2);
        assert_eq!(accuracy.direct_failures[1].received, Some(true));
    }
}
