//! Stage 2b: natural contexts, rewritten from templated contexts by the generation collaborator.

use crate::{
    catalogue::{self},
    config::PipelineConfig,
    misc::log::targets::{self},
    pipeline::{
        artifact::{self, NaturalizedRecord, TemplatedRecord},
        generation::Generate,
        on_generation_failure, prompts, Progress, Stage, StageReport, NATURALIZED_ARTIFACT, TEMPLATES_ARTIFACT,
    },
    types::err::ErrorKind,
};

/// The text used when no natural context is generated.
fn fallback(record: &TemplatedRecord) -> String {
    format!("{} {}", record.condition, record.situation).trim().to_string()
}

/// Requests a natural context for each templated context.
///
/// If a request fails (and the stage degrades), or returns only whitespace, the templated condition and situation are used as the natural context.
pub fn naturalize(
    config: &PipelineConfig,
    generator: &mut impl Generate,
    progress: Progress,
) -> Result<StageReport, ErrorKind> {
    let mut report = StageReport::new(Stage::Naturalize);

    let templated: Vec<(usize, TemplatedRecord)> =
        artifact::read_jsonl(&super::artifact_path(config, TEMPLATES_ARTIFACT))?;
    let total = templated.len();

    let path = super::artifact_path(config, NATURALIZED_ARTIFACT);
    artifact::truncate(&path)?;

    for (done, (index, record)) in templated.into_iter().enumerate() {
        report.read += 1;

        if let Err(e) = catalogue::lookup_str(&record.rule) {
            log::error!(target: targets::PIPELINE, "Skipping record {index}: {e}");
            report.skipped += 1;
            progress(done + 1, total);
            continue;
        }

        let purpose = format!("naturalize {} ({index})", record.rule);
        let prompt = prompts::naturalize(&record.condition, &record.situation);

        let natural_context = match generator.generate(&prompt, &purpose) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),

            Ok(_) => {
                log::warn!(target: targets::PIPELINE, "{purpose}: empty response, using the templated context");
                fallback(&record)
            }

            Err(e) => {
                on_generation_failure(config, e, &purpose)?;
                fallback(&record)
            }
        };

        let naturalized = NaturalizedRecord {
            rule: record.rule,
            sentence_bank: record.sentence_bank,
            natural_context,
        };
        artifact::append_jsonl(&path, &naturalized)?;
        report.written += 1;

        progress(done + 1, total);
    }

    log::info!(target: targets::PIPELINE, "{report}");
    Ok(report)
}

#[cfg(test)]
mod naturalize_tests {
    use super::*;
    use crate::template::SentenceBank;

    #[test]
    fn fallback_without_situation() {
        let record = TemplatedRecord {
            rule: "PL/Commutation".to_string(),
            sentence_bank: SentenceBank::default(),
            templated_context: "Sabe-se que a ou b.".to_string(),
            condition: "Sabe-se que a ou b.".to_string(),
            situation: String::default(),
        };
        assert_eq!(fallback(&record), "Sabe-se que a ou b.");
    }
}
