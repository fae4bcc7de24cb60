//! Stage 4: the multiple choice question answering dataset.

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    catalogue::{self, RuleDefinition},
    config::PipelineConfig,
    dataset::{self, McqaSample, RuleDataset, MCQA_QUESTION},
    misc::log::targets::{self},
    pipeline::{
        artifact::{self, NaturalizedRecord},
        dataset_path,
        generation::Generate,
        group_by_rule, on_generation_failure, prompts, Progress, Stage, StageReport, NATURALIZED_ARTIFACT,
    },
    template::{self},
    types::err::ErrorKind,
};

/// The name of the MCQA dataset directory.
pub const MCQA_DIR: &str = "MCQA";

/// Writes an MCQA dataset file for each rule with a naturalized context.
///
/// The correct option of each sample is the instantiated conclusion template of the rule, and the three incorrect options are requested from the generation collaborator.
/// A sample without three usable distractors is dropped.
pub fn mcqa(config: &PipelineConfig, generator: &mut impl Generate, progress: Progress) -> Result<StageReport, ErrorKind> {
    let mut report = StageReport::new(Stage::Mcqa);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let records: Vec<(usize, NaturalizedRecord)> =
        artifact::read_jsonl(&super::artifact_path(config, NATURALIZED_ARTIFACT))?;
    report.read = records.len();
    let total = records.len();
    let mut done = 0;

    for (key, instances) in group_by_rule(records, |record| record.rule.as_str()) {
        let rule = match catalogue::lookup_str(&key) {
            Ok(rule) => rule,
            Err(e) => {
                log::error!(target: targets::PIPELINE, "Skipping {} records: {e}", instances.len());
                report.skipped += instances.len();
                done += instances.len();
                progress(done, total);
                continue;
            }
        };

        let mut dataset = RuleDataset::for_rule(rule);
        for (i, instance) in instances.into_iter().enumerate() {
            match sample(config, rule, i + 1, instance, generator, &mut rng)? {
                Some(sample) => dataset.samples.push(sample),
                None => report.skipped += 1,
            }
            done += 1;
            progress(done, total);
        }

        if !dataset.samples.is_empty() {
            artifact::write_json(&dataset_path(config, MCQA_DIR, rule), &dataset)?;
            report.written += dataset.samples.len();
        }
    }

    log::info!(target: targets::PIPELINE, "{report}");
    Ok(report)
}

/// The sample of an instance of `rule`, or `None` if the sample is dropped.
fn sample(
    config: &PipelineConfig,
    rule: &RuleDefinition,
    id: usize,
    instance: NaturalizedRecord,
    generator: &mut impl Generate,
    rng: &mut StdRng,
) -> Result<Option<McqaSample>, ErrorKind> {
    let mut bank = instance.sentence_bank;
    bank.backfill_negations(catalogue::required_placeholders(rule));

    let correct = match template::instantiate(rule.conclusion_template, &bank) {
        Ok(text) => text,
        Err(e) => {
            log::error!(target: targets::PIPELINE, "Skipping {}, instance {id}: {e}", instance.rule);
            return Ok(None);
        }
    };

    let purpose = format!("distractors {} ({id})", instance.rule);
    let prompt = prompts::distractors(&instance.natural_context, &correct);

    let response = match generator.generate(&prompt, &purpose) {
        Ok(response) => response,
        Err(e) => {
            on_generation_failure(config, e, &purpose)?;
            return Ok(None);
        }
    };

    let distractors = dataset::parse_distractor_lines(&response);
    match dataset::assemble(&correct, &distractors, rng) {
        Ok(assembly) => Ok(Some(McqaSample {
            id,
            context: instance.natural_context,
            question: MCQA_QUESTION.to_string(),
            options: assembly.options,
            answer: assembly.answer_index,
        })),

        Err(e) => {
            log::warn!(target: targets::PIPELINE, "Dropping {}, instance {id}: {e}", instance.rule);
            Ok(None)
        }
    }
}
