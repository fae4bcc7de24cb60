//! Stage 3: the binary question answering dataset.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    catalogue::{self, RuleDefinition},
    config::PipelineConfig,
    dataset::{BqaSample, QaPair, RuleDataset},
    misc::log::targets::{self},
    pipeline::{
        artifact::{self, NaturalizedRecord},
        dataset_path, group_by_rule, Progress, Stage, StageReport, NATURALIZED_ARTIFACT,
    },
    types::err::ErrorKind,
};

/// The name of the BQA dataset directory.
pub const BQA_DIR: &str = "BQA";

/// Writes a BQA dataset file for each rule with a naturalized context.
///
/// Each sample asks every question template of the rule, with a phrasing variant chosen at random.
/// A question which cannot be instantiated is skipped, and a sample without questions is skipped.
pub fn bqa(config: &PipelineConfig, progress: Progress) -> Result<StageReport, ErrorKind> {
    let mut report = StageReport::new(Stage::Bqa);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let records: Vec<(usize, NaturalizedRecord)> =
        artifact::read_jsonl(&super::artifact_path(config, NATURALIZED_ARTIFACT))?;
    report.read = records.len();

    let groups = group_by_rule(records, |record| record.rule.as_str());
    let total = groups.len();

    for (done, (key, instances)) in groups.into_iter().enumerate() {
        progress(done, total);

        let rule = match catalogue::lookup_str(&key) {
            Ok(rule) => rule,
            Err(e) => {
                log::error!(target: targets::PIPELINE, "Skipping {} records: {e}", instances.len());
                report.skipped += instances.len();
                continue;
            }
        };

        let mut dataset = RuleDataset::for_rule(rule);
        for (i, instance) in instances.into_iter().enumerate() {
            match sample(rule, i + 1, instance, &mut rng) {
                Some(sample) => dataset.samples.push(sample),
                None => report.skipped += 1,
            }
        }

        if !dataset.samples.is_empty() {
            artifact::write_json(&dataset_path(config, BQA_DIR, rule), &dataset)?;
            report.written += dataset.samples.len();
        }
    }
    progress(total, total);

    log::info!(target: targets::PIPELINE, "{report}");
    Ok(report)
}

/// The sample of an instance of `rule`, if some question could be instantiated.
fn sample(rule: &RuleDefinition, id: usize, instance: NaturalizedRecord, rng: &mut StdRng) -> Option<BqaSample> {
    let mut bank = instance.sentence_bank;
    bank.backfill_negations(catalogue::required_placeholders(rule));

    let mut qa_pairs = Vec::with_capacity(rule.question_templates.len());
    for question in rule.question_templates {
        let Some(variant) = question.variants.choose(rng) else {
            continue;
        };

        match crate::template::instantiate(variant, &bank) {
            Ok(text) => qa_pairs.push(QaPair {
                question: text,
                answer: question.answer,
            }),
            Err(e) => {
                log::error!(target: targets::PIPELINE, "Skipping a question of {}, instance {id}: {e}", instance.rule);
            }
        }
    }

    match qa_pairs.is_empty() {
        true => None,
        false => Some(BqaSample {
            id,
            context: instance.natural_context,
            qa_pairs,
        }),
    }
}

#[cfg(test)]
mod bqa_tests {
    use super::*;
    use crate::{catalogue::LogicFamily, template::SentenceBank};

    #[test]
    fn modus_tollens_sample() {
        let rule = catalogue::lookup(LogicFamily::Propositional, "Modus_Tollens").unwrap();
        let instance = NaturalizedRecord {
            rule: "PL/Modus_Tollens".to_string(),
            sentence_bank: SentenceBank::from_pairs([("p", "chove"), ("q", "as ruas estão molhadas")]),
            natural_context: "Uma história.".to_string(),
        };

        let mut rng = StdRng::seed_from_u64(0);
        let sample = sample(rule, 1, instance, &mut rng).unwrap();

        assert_eq!(sample.id, 1);
        assert_eq!(sample.context, "Uma história.");
        assert_eq!(sample.qa_pairs.len(), rule.question_templates.len());
        for (pair, question) in sample.qa_pairs.iter().zip(rule.question_templates) {
            assert_eq!(pair.answer, question.answer);
        }
    }

    #[test]
    fn no_questions_no_sample() {
        let rule = catalogue::lookup(LogicFamily::Propositional, "Modus_Tollens").unwrap();
        let instance = NaturalizedRecord {
            rule: "PL/Modus_Tollens".to_string(),
            sentence_bank: SentenceBank::default(),
            natural_context: "Uma história.".to_string(),
        };

        let mut rng = StdRng::seed_from_u64(0);
        assert!(sample(rule, 1, instance, &mut rng).is_none());
    }
}
