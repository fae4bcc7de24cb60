/*!
Stage 5: an audit of naturalized contexts.

The generation collaborator is asked to formalize each natural context as premises and a conclusion.
The [consequence checker](crate::consequence) then determines whether the conclusion follows from the premises.

The solver result of a record is the result of the solve of the premises together with the negated conclusion:
- `unsat`: the conclusion is entailed.
- `sat`: the conclusion is not entailed, and the model of the record is a countermodel.
- `unknown`: the solve stopped at some configured limit.
- `error`: the formalization could not be read, parsed, or checked, with the reason noted.

The conclusion of every rule of the catalogue follows from its premises, so a record also notes whether the audit agrees with the rule.
A `sat` record disagrees, and so points to a naturalization (or formalization) which lost the structure of the rule.

The audit is resumable: contexts with a current record in the audit artifact are skipped, and new records are appended.
A record is current only while the context at its index is unchanged, so naturalizing again leads to a fresh audit of the new contexts.
*/

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    config::{Config, PipelineConfig},
    consequence::{Consequence, ConsequenceQuery, Model},
    misc::log::targets::{self},
    pipeline::{
        artifact::{self, NaturalizedRecord},
        extract,
        generation::Generate,
        on_generation_failure, prompts, Progress, Stage, StageReport, AUDIT_ARTIFACT, NATURALIZED_ARTIFACT,
    },
    reports::Report,
    types::err::ErrorKind,
};

/// A formalization of a natural context, from the generation collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reformalization {
    #[serde(default)]
    pub variables: Vec<String>,
    pub premises: Vec<String>,
    pub conclusion: String,
}

/// The status of an audited record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolverStatus {
    Sat,
    Unsat,
    Unknown,
    Error(String),
}

/// The status of an audited record, as written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverResult {
    Sat,
    Unsat,
    Unknown,
    Error,
}

impl From<Report> for SolverStatus {
    fn from(report: Report) -> Self {
        match report {
            Report::Satisfiable => Self::Sat,
            Report::Unsatisfiable => Self::Unsat,
            Report::Unknown => Self::Unknown,
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat => write!(f, "sat"),
            Self::Unsat => write!(f, "unsat"),
            Self::Unknown => write!(f, "unknown"),
            Self::Error(reason) => write!(f, "error ({reason})"),
        }
    }
}

/// A record of the audit artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The line index of the naturalized context in its artifact.
    pub index: usize,
    pub rule: String,
    pub natural_context: String,
    pub formalization: Option<Reformalization>,
    pub solver_result: SolverResult,
    pub entailed: Option<bool>,
    pub model: Option<Model>,
    pub error: Option<String>,

    /// Whether the conclusion was entailed, as by the rule, if the solve completed.
    #[serde(default)]
    pub agrees_with_rule: Option<bool>,
}

impl AuditRecord {
    fn new(
        index: usize,
        record: NaturalizedRecord,
        formalization: Option<Reformalization>,
        outcome: Result<Consequence, ErrorKind>,
    ) -> Self {
        let mut audit = AuditRecord {
            index,
            rule: record.rule,
            natural_context: record.natural_context,
            formalization,
            solver_result: SolverResult::Error,
            entailed: None,
            model: None,
            error: None,
            agrees_with_rule: None,
        };

        match outcome {
            Ok(consequence) => {
                audit.solver_result = match consequence.status {
                    Report::Satisfiable => SolverResult::Sat,
                    Report::Unsatisfiable => SolverResult::Unsat,
                    Report::Unknown => SolverResult::Unknown,
                };
                audit.entailed = Some(consequence.entailed);
                audit.agrees_with_rule = match consequence.status {
                    Report::Unknown => None,
                    _ => Some(consequence.entailed),
                };
                audit.model = consequence.model;
            }

            Err(e) => audit.error = Some(e.to_string()),
        }

        audit
    }

    pub fn status(&self) -> SolverStatus {
        match self.solver_result {
            SolverResult::Sat => SolverStatus::Sat,
            SolverResult::Unsat => SolverStatus::Unsat,
            SolverResult::Unknown => SolverStatus::Unknown,
            SolverResult::Error => SolverStatus::Error(self.error.clone().unwrap_or_default()),
        }
    }
}

/// Checks whether the conclusion of a formalization follows from its premises.
pub fn check_formalization(formalization: &Reformalization, config: &Config) -> Result<Consequence, ErrorKind> {
    let premises = formalization.premises.iter().map(String::as_str).collect::<Vec<_>>();
    let query = ConsequenceQuery::parse(&premises, &formalization.conclusion)?;
    query.check(config)
}

/// The indices of naturalized contexts with a current audit record.
///
/// A record is current if the context at its index has the rule and text of the record.
/// Records which are not current (e.g. as the contexts were naturalized again) are dropped from the artifact.
fn current_audits(path: &Path, contexts: &[(usize, NaturalizedRecord)]) -> Result<BTreeSet<usize>, ErrorKind> {
    if !path.exists() {
        return Ok(BTreeSet::default());
    }

    let by_index: BTreeMap<usize, &NaturalizedRecord> =
        contexts.iter().map(|(index, record)| (*index, record)).collect();

    let audits: Vec<(usize, AuditRecord)> = artifact::read_jsonl(path)?;
    let audit_count = audits.len();

    let mut indices = BTreeSet::default();
    let mut kept = Vec::with_capacity(audit_count);
    for (_, audit) in audits {
        let current = by_index.get(&audit.index).is_some_and(|context| {
            context.rule == audit.rule && context.natural_context == audit.natural_context
        });

        if current && indices.insert(audit.index) {
            kept.push(audit);
        }
    }

    if kept.len() < audit_count {
        log::warn!(target: targets::PIPELINE, "Dropping {} stale audit records", audit_count - kept.len());
        artifact::write_jsonl(path, &kept)?;
    }

    Ok(indices)
}

/// Audits each naturalized context not already audited.
///
/// If a formalization request fails (and the stage degrades) no record is written, so the context is audited on the next run.
pub fn audit(
    config: &PipelineConfig,
    solver_config: &Config,
    generator: &mut impl Generate,
    progress: Progress,
) -> Result<StageReport, ErrorKind> {
    let mut report = StageReport::new(Stage::Audit);
    let mut disagreements = 0;

    let records: Vec<(usize, NaturalizedRecord)> =
        artifact::read_jsonl(&super::artifact_path(config, NATURALIZED_ARTIFACT))?;
    let total = records.len();

    let path = super::artifact_path(config, AUDIT_ARTIFACT);
    let audited = current_audits(&path, &records)?;
    if !audited.is_empty() {
        log::info!(target: targets::PIPELINE, "Resuming audit, {} records already audited", audited.len());
    }

    for (done, (index, record)) in records.into_iter().enumerate() {
        report.read += 1;

        if audited.contains(&index) {
            progress(done + 1, total);
            continue;
        }

        let purpose = format!("formalize {} ({index})", record.rule);
        let prompt = prompts::formalize(&record.natural_context);

        let response = match generator.generate(&prompt, &purpose) {
            Ok(response) => response,
            Err(e) => {
                on_generation_failure(config, e, &purpose)?;
                report.skipped += 1;
                progress(done + 1, total);
                continue;
            }
        };

        let audit = match extract::extract_typed::<Reformalization>(&response) {
            Ok(formalization) => {
                let outcome = check_formalization(&formalization, solver_config);
                AuditRecord::new(index, record, Some(formalization), outcome)
            }

            Err(e) => AuditRecord::new(index, record, None, Err(ErrorKind::from(e))),
        };

        log::info!(target: targets::PIPELINE, "{purpose}: {}", audit.status());
        if audit.agrees_with_rule == Some(false) {
            log::warn!(target: targets::PIPELINE, "{purpose}: the conclusion of the rule is not entailed");
            disagreements += 1;
        }
        artifact::append_jsonl(&path, &audit)?;
        report.written += 1;

        progress(done + 1, total);
    }

    if disagreements > 0 {
        log::warn!(target: targets::PIPELINE, "{disagreements} audited contexts disagree with their rule");
    }
    log::info!(target: targets::PIPELINE, "{report}");
    Ok(report)
}

#[cfg(test)]
mod audit_tests {
    use super::*;
    use crate::{template::SentenceBank, types::err};

    fn naturalized() -> NaturalizedRecord {
        NaturalizedRecord {
            rule: "PL/Modus_Tollens".to_string(),
            sentence_bank: SentenceBank::default(),
            natural_context: "Uma história.".to_string(),
        }
    }

    #[test]
    fn entailed_formalization() {
        let formalization = Reformalization {
            variables: vec!["p".into(), "q".into()],
            premises: vec!["Implies(p,q)".into(), "Not(q)".into()],
            conclusion: "Not(p)".into(),
        };

        let outcome = check_formalization(&formalization, &Config::default());
        let record = AuditRecord::new(3, naturalized(), Some(formalization), outcome);

        assert_eq!(record.index, 3);
        assert_eq!(record.status(), SolverStatus::Unsat);
        assert_eq!(record.entailed, Some(true));
        assert_eq!(record.agrees_with_rule, Some(true));
        assert!(record.error.is_none());
    }

    #[test]
    fn parse_failures_are_errors() {
        let formalization = Reformalization {
            variables: Vec::default(),
            premises: vec!["Xor(p,q)".into()],
            conclusion: "p".into(),
        };

        let outcome = check_formalization(&formalization, &Config::default());
        assert_eq!(
            outcome,
            Err(ErrorKind::Parse(err::ParseError::UnknownOperator("Xor".to_string())))
        );

        let record = AuditRecord::new(0, naturalized(), Some(formalization), outcome);
        assert!(matches!(record.status(), SolverStatus::Error(_)));
        assert_eq!(record.entailed, None);
        assert_eq!(record.agrees_with_rule, None);
    }

    #[test]
    fn written_fields() {
        let formalization = Reformalization {
            variables: Vec::default(),
            premises: vec!["Or(p,q)".into(), "Not(p)".into()],
            conclusion: "Not(q)".into(),
        };

        let outcome = check_formalization(&formalization, &Config::default());
        let record = AuditRecord::new(0, naturalized(), Some(formalization), outcome);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["solver_result"], "sat");
        assert_eq!(json["entailed"], false);
        assert_eq!(json["model"]["p"], false);
        assert_eq!(json["model"]["q"], true);
        assert_eq!(json["agrees_with_rule"], false);
    }

    #[test]
    fn records_without_agreement() {
        let line = r#"{"index":0,"rule":"PL/Modus_Tollens","natural_context":"c","formalization":null,"solver_result":"error","entailed":null,"model":null,"error":"e"}"#;
        let record: AuditRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.agrees_with_rule, None);
    }

    #[test]
    fn stale_records_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(AUDIT_ARTIFACT);

        let mut old = naturalized();
        old.natural_context = "contexto antigo".to_string();
        let mut new = naturalized();
        new.natural_context = "contexto novo".to_string();
        let mut other = naturalized();
        other.natural_context = "outro contexto".to_string();

        let records = [
            AuditRecord::new(0, old, None, Err(ErrorKind::from(err::ExtractError::NoStructure))),
            AuditRecord::new(1, other.clone(), None, Err(ErrorKind::from(err::ExtractError::NoStructure))),
        ];
        artifact::write_jsonl(&path, &records).unwrap();

        let contexts = vec![(0, new), (1, other)];
        let audited = current_audits(&path, &contexts).unwrap();
        assert_eq!(audited, BTreeSet::from([1]));

        let kept: Vec<(usize, AuditRecord)> = artifact::read_jsonl(&path).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].1.natural_context, "outro contexto");
    }
}
