//! Stage 2a: templated contexts, from the premise template of each rule and a sentence bank.

use crate::{
    catalogue::{self},
    config::PipelineConfig,
    misc::log::targets::{self},
    pipeline::{
        artifact::{self, BankRecord, TemplatedRecord},
        Progress, Stage, StageReport, BANKS_ARTIFACT, TEMPLATES_ARTIFACT,
    },
    template::{self},
    types::err::ErrorKind,
};

/// Instantiates the premise template of the rule of each sentence bank.
///
/// Before instantiation each bank is cleaned, and any missing negated fragment is back-filled.
pub fn templates(config: &PipelineConfig, progress: Progress) -> Result<StageReport, ErrorKind> {
    let mut report = StageReport::new(Stage::Templates);

    let banks: Vec<(usize, BankRecord)> = artifact::read_jsonl(&super::artifact_path(config, BANKS_ARTIFACT))?;
    let total = banks.len();

    let mut records = Vec::with_capacity(total);
    for (done, (index, bank)) in banks.into_iter().enumerate() {
        report.read += 1;

        match templated(bank) {
            Ok(record) => records.push(record),
            Err((rule, e)) => {
                log::error!(target: targets::PIPELINE, "Skipping record {index} of {rule}: {e}");
                report.skipped += 1;
            }
        }

        progress(done + 1, total);
    }

    report.written = artifact::write_jsonl(&super::artifact_path(config, TEMPLATES_ARTIFACT), &records)?;

    log::info!(target: targets::PIPELINE, "{report}");
    Ok(report)
}

/// The templated record of a bank, or the rule of the bank with the reason it could not be templated.
fn templated(record: BankRecord) -> Result<TemplatedRecord, (String, ErrorKind)> {
    let BankRecord {
        rule: key,
        mut sentence_bank,
    } = record;

    let rule = match catalogue::lookup_str(&key) {
        Ok(rule) => rule,
        Err(e) => return Err((key, ErrorKind::from(e))),
    };

    sentence_bank.clean();
    sentence_bank.backfill_negations(catalogue::required_placeholders(rule));

    let templated_context = match template::instantiate(rule.premise_template, &sentence_bank) {
        Ok(text) => text,
        Err(e) => return Err((key, ErrorKind::from(e))),
    };

    let (condition, situation) = template::split_clauses(&templated_context);

    Ok(TemplatedRecord {
        rule: key,
        sentence_bank,
        templated_context,
        condition,
        situation,
    })
}
