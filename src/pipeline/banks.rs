//! Stage 1: sentence banks for each rule, from the generation collaborator.

use crate::{
    catalogue::{self},
    config::PipelineConfig,
    misc::log::targets::{self},
    pipeline::{
        artifact::{self, BankRecord},
        extract,
        generation::Generate,
        on_generation_failure, prompts, selected_rules, Progress, Stage, StageReport, BANKS_ARTIFACT,
    },
    template::SentenceBank,
    types::err::{self, ErrorKind},
};

/// Requests [instances_per_rule](PipelineConfig::instances_per_rule) sentence banks for each selected rule, and writes each bank received.
///
/// Each bank is written as it is received, so banks received before an abort are kept.
pub fn banks(config: &PipelineConfig, generator: &mut impl Generate, progress: Progress) -> Result<StageReport, ErrorKind> {
    let mut report = StageReport::new(Stage::Banks);
    let path = super::artifact_path(config, BANKS_ARTIFACT);

    let rules = selected_rules(config, &mut report);
    artifact::truncate(&path)?;

    for (done, rule) in rules.iter().enumerate() {
        report.read += 1;
        let key = rule.key().to_string();

        let base = catalogue::base_placeholders(rule);
        let prompt = prompts::sentence_banks(rule, config.instances_per_rule, &base);

        let response = match generator.generate(&prompt, &key) {
            Ok(response) => response,
            Err(e) => {
                on_generation_failure(config, e, &key)?;
                report.skipped += 1;
                progress(done + 1, rules.len());
                continue;
            }
        };

        match bank_records(&key, &response) {
            Ok(records) => {
                for record in records {
                    artifact::append_jsonl(&path, &record)?;
                    report.written += 1;
                }
            }

            Err(e) => {
                log::error!(target: targets::PIPELINE, "Failed to read the banks for {key}: {e}");
                report.skipped += 1;
            }
        }

        progress(done + 1, rules.len());
    }

    log::info!(target: targets::PIPELINE, "{report}");
    Ok(report)
}

/// The banks of a response, with any element which is not an object of strings skipped.
fn bank_records(key: &str, response: &str) -> Result<Vec<BankRecord>, err::ExtractError> {
    let values = extract::extract_array(response)?;
    if values.is_empty() {
        return Err(err::ExtractError::Shape("a non-empty array"));
    }

    let mut records = Vec::with_capacity(values.len());
    for (position, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<SentenceBank>(value) {
            Ok(sentence_bank) => records.push(BankRecord {
                rule: key.to_string(),
                sentence_bank,
            }),
            Err(e) => {
                log::warn!(target: targets::PIPELINE, "Skipping bank {position} for {key}: {e}");
            }
        }
    }

    Ok(records)
}
