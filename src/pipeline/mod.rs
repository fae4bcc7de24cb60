/*!
The dataset pipeline.

The pipeline is a sequence of stages, each reading the flat-file artifact of the previous stage and writing its own:

| Stage | Reads | Writes |
|-------|-------|--------|
| [banks] | the [catalogue](crate::catalogue) | `stage_1_sentence_banks.jsonl` |
| [templates] | sentence banks | `stage_2a_templated_contexts.jsonl` |
| [naturalize] | templated contexts | `stage_2b_naturalized_contexts.jsonl` |
| [bqa] | naturalized contexts | `BQA/<family>/<Rule>/data_instances.json` |
| [mcqa] | naturalized contexts | `MCQA/<family>/<Rule>/data_instances.json` |
| [audit] | naturalized contexts | `stage_5_audit.jsonl` |
| [evaluate](evaluate()) | BQA datasets | `stage_6_evaluation_<model>.jsonl`, `evaluation/<model>.json` |

Intermediate artifacts are written under [artifacts_dir](PipelineConfig::artifacts_dir) and datasets under [output_dir](PipelineConfig::output_dir).

Stages are independent, so any stage may be rerun from the artifact of the previous stage.
The evaluation is not part of a [run], as it measures models on a finished dataset.
Records which cannot be processed are logged and skipped, and the count of skipped records is noted in the [StageReport] of the stage.

Stages which call the [generation collaborator](generation) degrade when a call fails (with fallback text, or by skipping the record), unless the configured [ExhaustionPolicy] is to abort.
*/

pub mod artifact;
pub mod evaluate;
pub mod extract;
pub mod generation;
pub mod prompts;

mod audit;
mod banks;
mod bqa;
mod mcqa;
mod naturalize;
mod templates;

pub use audit::{audit, AuditRecord, Reformalization, SolverResult, SolverStatus};
pub use banks::banks;
pub use evaluate::{evaluate, EvaluationRecord, ModelAccuracy, RuleAccuracy};
pub use bqa::bqa;
pub use mcqa::mcqa;
pub use naturalize::naturalize;
pub use templates::templates;

use std::path::PathBuf;

use crate::{
    catalogue::{self, RuleDefinition},
    config::{Config, ExhaustionPolicy, PipelineConfig},
    misc::log::targets::{self},
    types::err::{self, ErrorKind},
};

use generation::Generate;

pub const BANKS_ARTIFACT: &str = "stage_1_sentence_banks.jsonl";
pub const TEMPLATES_ARTIFACT: &str = "stage_2a_templated_contexts.jsonl";
pub const NATURALIZED_ARTIFACT: &str = "stage_2b_naturalized_contexts.jsonl";
pub const AUDIT_ARTIFACT: &str = "stage_5_audit.jsonl";

/// Stages of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Banks,
    Templates,
    Naturalize,
    Bqa,
    Mcqa,
    Audit,
    Evaluate,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Banks => "sentence banks",
            Self::Templates => "templated contexts",
            Self::Naturalize => "naturalized contexts",
            Self::Bqa => "BQA dataset",
            Self::Mcqa => "MCQA dataset",
            Self::Audit => "audit",
            Self::Evaluate => "evaluation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A summary of a completed stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,

    /// The count of records (or rules, for the banks stage) read.
    pub read: usize,

    /// The count of records (or samples, for the dataset stages) written.
    pub written: usize,

    /// The count of records skipped.
    pub skipped: usize,
}

impl StageReport {
    fn new(stage: Stage) -> Self {
        StageReport {
            stage,
            read: 0,
            written: 0,
            skipped: 0,
        }
    }
}

impl std::fmt::Display for StageReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: read {}, wrote {}, skipped {}",
            self.stage, self.read, self.written, self.skipped
        )
    }
}

/// A callback noting progress through a stage, as `(done, total)`.
pub type Progress<'p> = &'p mut dyn FnMut(usize, usize);

/// The path of an intermediate artifact.
pub fn artifact_path(config: &PipelineConfig, file: &str) -> PathBuf {
    config.artifacts_dir.join(file)
}

/// The path of the dataset file of `rule`, in the dataset named `dataset` (e.g. `BQA`).
pub fn dataset_path(config: &PipelineConfig, dataset: &str, rule: &RuleDefinition) -> PathBuf {
    config
        .output_dir
        .join(dataset)
        .join(rule.family.folder())
        .join(rule.name)
        .join(crate::dataset::DATASET_FILE)
}

/// The rules of the configuration, in the order given, or every rule of the catalogue.
fn selected_rules(config: &PipelineConfig, report: &mut StageReport) -> Vec<&'static RuleDefinition> {
    if config.rules.is_empty() {
        return catalogue::rules().collect();
    }

    let mut rules = Vec::default();
    for key in &config.rules {
        match catalogue::lookup_str(key) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                log::error!(target: targets::PIPELINE, "Skipping rule {key}: {e}");
                report.skipped += 1;
            }
        }
    }
    rules
}

/// Applies the exhaustion policy to a failed generation call.
///
/// Returns `Ok` if the stage should degrade and continue.
fn on_generation_failure(config: &PipelineConfig, error: err::GenerationError, purpose: &str) -> Result<(), ErrorKind> {
    match config.on_exhaustion {
        ExhaustionPolicy::Degrade => {
            log::warn!(target: targets::PIPELINE, "{purpose}: {error}, degrading");
            Ok(())
        }

        ExhaustionPolicy::Abort => {
            log::error!(target: targets::PIPELINE, "{purpose}: {error}, aborting");
            Err(ErrorKind::from(error))
        }
    }
}

/// Records grouped by rule key, with groups in order of first appearance.
fn group_by_rule<T>(records: Vec<(usize, T)>, rule: impl Fn(&T) -> &str) -> Vec<(String, Vec<T>)> {
    let mut groups: Vec<(String, Vec<T>)> = Vec::default();

    for (_, record) in records {
        let key = rule(&record).to_string();
        match groups.iter_mut().find(|(group_key, _)| *group_key == key) {
            Some((_, group)) => group.push(record),
            None => groups.push((key, vec![record])),
        }
    }

    groups
}

/// Runs every stage in sequence.
///
/// `confirm` is called after the templated contexts are written, and the run stops early if it returns false.
pub fn run(
    config: &PipelineConfig,
    solver_config: &Config,
    generator: &mut impl Generate,
    confirm: &mut dyn FnMut(&StageReport) -> bool,
    progress: Progress,
) -> Result<Vec<StageReport>, ErrorKind> {
    let mut reports = Vec::default();

    reports.push(banks(config, generator, progress)?);

    let templated = templates(config, progress)?;
    let proceed = confirm(&templated);
    reports.push(templated);
    if !proceed {
        log::info!(target: targets::PIPELINE, "Run stopped after {}", Stage::Templates);
        return Ok(reports);
    }

    reports.push(naturalize(config, generator, progress)?);
    reports.push(bqa(config, progress)?);
    reports.push(mcqa(config, generator, progress)?);
    reports.push(audit(config, solver_config, generator, progress)?);

    Ok(reports)
}
