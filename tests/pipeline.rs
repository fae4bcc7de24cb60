use std::{collections::VecDeque, path::Path};

use logicbench::{
    config::{Config, ExhaustionPolicy, PipelineConfig},
    dataset::{BqaSample, McqaSample, QaPair, RuleDataset, MCQA_QUESTION},
    pipeline::{
        self,
        artifact::{self, NaturalizedRecord, TemplatedRecord},
        evaluate::{self, EvaluationRecord, ModelAccuracy},
        generation::Generate,
        AuditRecord, SolverResult, BANKS_ARTIFACT, NATURALIZED_ARTIFACT, TEMPLATES_ARTIFACT,
    },
    template::SentenceBank,
    types::err::{self, ErrorKind},
};

/// A generator replying from a script, noting each prompt.
#[derive(Default)]
struct Scripted {
    replies: VecDeque<Result<String, err::GenerationError>>,
    prompts: Vec<String>,
}

impl Scripted {
    fn with(replies: impl IntoIterator<Item = Result<&'static str, err::GenerationError>>) -> Self {
        Scripted {
            replies: replies.into_iter().map(|reply| reply.map(str::to_string)).collect(),
            prompts: Vec::default(),
        }
    }
}

impl Generate for Scripted {
    fn generate(&mut self, prompt: &str, _purpose: &str) -> Result<String, err::GenerationError> {
        self.prompts.push(prompt.to_string());
        self.replies
            .pop_front()
            .unwrap_or(Err(err::GenerationError::CredentialsExhausted))
    }
}

fn config_in(dir: &Path) -> PipelineConfig {
    PipelineConfig {
        artifacts_dir: dir.join("artifacts"),
        output_dir: dir.join("output"),
        rules: vec!["PL/Modus_Tollens".to_string()],
        instances_per_rule: 2,
        ..PipelineConfig::default()
    }
    .without_delays()
}

fn read_file<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

mod stages {
    use super::*;

    #[test]
    fn modus_tollens_through_every_stage() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut progress = |_: usize, _: usize| {};

        // Stage 1
        let mut generator = Scripted::with([Ok(
            "```json\n[{\"p\": \"Chove.\", \"q\": \"as ruas estão molhadas\"}, {\"p\": \"faz sol\", \"q\": \"a praia enche\"}]\n```",
        )]);
        let report = pipeline::banks(&config, &mut generator, &mut progress).unwrap();
        assert_eq!((report.read, report.written, report.skipped), (1, 2, 0));
        assert!(generator.prompts[0].contains("\"p\", \"q\""));

        // Stage 2a
        let report = pipeline::templates(&config, &mut progress).unwrap();
        assert_eq!(report.written, 2);

        let templated: Vec<(usize, TemplatedRecord)> =
            artifact::read_jsonl(&pipeline::artifact_path(&config, TEMPLATES_ARTIFACT)).unwrap();
        assert_eq!(
            templated[0].1.templated_context,
            "Se chove, então as ruas estão molhadas. Sabe-se que não as ruas estão molhadas."
        );

        // Stage 2b, with the second request failing
        let mut generator = Scripted::with([
            Ok("  Uma história sobre a chuva.  "),
            Err(err::GenerationError::CredentialsExhausted),
        ]);
        let report = pipeline::naturalize(&config, &mut generator, &mut progress).unwrap();
        assert_eq!(report.written, 2);
        assert!(generator.prompts[0].contains("Condição: Se chove, então as ruas estão molhadas."));

        let naturalized: Vec<(usize, NaturalizedRecord)> =
            artifact::read_jsonl(&pipeline::artifact_path(&config, NATURALIZED_ARTIFACT)).unwrap();
        assert_eq!(naturalized[0].1.natural_context, "Uma história sobre a chuva.");
        assert_eq!(
            naturalized[1].1.natural_context,
            "Se faz sol, então a praia enche. Sabe-se que não a praia enche."
        );

        // Stage 3
        let report = pipeline::bqa(&config, &mut progress).unwrap();
        assert_eq!(report.written, 2);

        let bqa_path = dir
            .path()
            .join("output/BQA/propositional_logic/Modus_Tollens/data_instances.json");
        let dataset: RuleDataset<BqaSample> = read_file(&bqa_path);
        assert_eq!(dataset.kind, "propositional_logic");
        assert_eq!(dataset.axiom, "modus_tollens");
        assert_eq!(dataset.samples.iter().map(|sample| sample.id).collect::<Vec<_>>(), vec![1, 2]);
        let answers = dataset.samples[0].qa_pairs.iter().map(|pair| pair.answer).collect::<Vec<_>>();
        assert_eq!(answers, vec![true, false]);
        assert!(dataset.samples[0].qa_pairs[0].question.contains("não chove"));

        // Stage 4, with too few distractors for the second sample
        let mut generator = Scripted::with([Ok("- Chove\n- As ruas estão secas\n3. Neva"), Ok("Chove")]);
        let report = pipeline::mcqa(&config, &mut generator, &mut progress).unwrap();
        assert_eq!((report.written, report.skipped), (1, 1));
        assert!(generator.prompts[0].contains("Resposta Correta: \"Não chove\""));

        let mcqa_path = dir
            .path()
            .join("output/MCQA/propositional_logic/Modus_Tollens/data_instances.json");
        let dataset: RuleDataset<McqaSample> = read_file(&mcqa_path);
        let sample = &dataset.samples[0];
        assert_eq!(sample.question, MCQA_QUESTION);
        assert_eq!(sample.options.len(), 4);
        assert_eq!(sample.options[sample.answer], "Não chove");
        assert!(sample.options.contains(&"Neva".to_string()));

        // Stage 5, with an unreadable formalization for the second context
        let mut generator = Scripted::with([
            Ok("{\"variables\": [\"p\", \"q\"], \"premises\": [\"Implies(p,q)\", \"Not(q)\"], \"conclusion\": \"Not(p)\"}"),
            Ok("Não sei."),
        ]);
        let report = pipeline::audit(&config, &Config::default(), &mut generator, &mut progress).unwrap();
        assert_eq!(report.written, 2);

        let audit_path = pipeline::artifact_path(&config, pipeline::AUDIT_ARTIFACT);
        let records: Vec<(usize, AuditRecord)> = artifact::read_jsonl(&audit_path).unwrap();
        assert_eq!(records[0].1.solver_result, SolverResult::Unsat);
        assert_eq!(records[0].1.entailed, Some(true));
        assert_eq!(records[0].1.agrees_with_rule, Some(true));
        assert_eq!(records[1].1.solver_result, SolverResult::Error);
        assert!(records[1].1.error.is_some());

        // A second audit resumes, with nothing left to audit
        let mut generator = Scripted::default();
        let report = pipeline::audit(&config, &Config::default(), &mut generator, &mut progress).unwrap();
        assert_eq!(report.written, 0);
        assert!(generator.prompts.is_empty());
    }

    #[test]
    fn malformed_lines_and_unknown_rules() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut progress = |_: usize, _: usize| {};

        let banks = concat!(
            "{\"rule\": \"PL/Modus_Tollens\", \"sentence_bank\": {\"p\": \"chove\", \"q\": \"molha\"}}\n",
            "{\"rule\": \"PL/Modus_Tollens\", \"sentence_bank\": \n",
            "{\"rule\": \"PL/Modus_Morons\", \"sentence_bank\": {\"p\": \"chove\", \"q\": \"molha\"}}\n",
            "{\"rule\": \"PL/Modus_Tollens\", \"sentence_bank\": {\"p\": \"chove\"}}\n",
        );
        let path = pipeline::artifact_path(&config, BANKS_ARTIFACT);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, banks).unwrap();

        let report = pipeline::templates(&config, &mut progress).unwrap();
        assert_eq!((report.read, report.written, report.skipped), (3, 1, 2));
    }

    #[test]
    fn missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut progress = |_: usize, _: usize| {};

        assert_eq!(
            pipeline::bqa(&config, &mut progress),
            Err(ErrorKind::Artifact(err::ArtifactError::Missing(
                pipeline::artifact_path(&config, NATURALIZED_ARTIFACT)
            )))
        );
    }

    #[test]
    fn abort_on_exhaustion() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.on_exhaustion = ExhaustionPolicy::Abort;
        let mut progress = |_: usize, _: usize| {};

        let mut generator = Scripted::default();
        assert_eq!(
            pipeline::banks(&config, &mut generator, &mut progress),
            Err(ErrorKind::Generation(err::GenerationError::CredentialsExhausted))
        );
    }

    #[test]
    fn run_stops_without_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut progress = |_: usize, _: usize| {};
        let mut confirm = |_: &pipeline::StageReport| false;

        let mut generator = Scripted::with([Ok("[{\"p\": \"chove\", \"q\": \"molha\"}]")]);
        let reports = pipeline::run(&config, &Config::default(), &mut generator, &mut confirm, &mut progress).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(generator.prompts.len(), 1);
        assert!(!pipeline::artifact_path(&config, NATURALIZED_ARTIFACT).exists());
    }

    #[test]
    fn contexts_naturalized_again_are_audited_again() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut progress = |_: usize, _: usize| {};
        let formalization = "{\"premises\": [\"Implies(p,q)\", \"Not(q)\"], \"conclusion\": \"Not(p)\"}";

        let naturalized_path = pipeline::artifact_path(&config, NATURALIZED_ARTIFACT);
        let write_context = |text: &str| {
            let record = NaturalizedRecord {
                rule: "PL/Modus_Tollens".to_string(),
                sentence_bank: SentenceBank::default(),
                natural_context: text.to_string(),
            };
            artifact::write_jsonl(&naturalized_path, [&record]).unwrap();
        };

        write_context("contexto antigo");
        let mut generator = Scripted::with([Ok(formalization)]);
        let report = pipeline::audit(&config, &Config::default(), &mut generator, &mut progress).unwrap();
        assert_eq!(report.written, 1);

        write_context("contexto novo");
        let mut generator = Scripted::with([Ok(formalization)]);
        let report = pipeline::audit(&config, &Config::default(), &mut generator, &mut progress).unwrap();
        assert_eq!(report.written, 1);
        assert!(generator.prompts[0].contains("contexto novo"));

        let audit_path = pipeline::artifact_path(&config, pipeline::AUDIT_ARTIFACT);
        let records: Vec<(usize, AuditRecord)> = artifact::read_jsonl(&audit_path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1.natural_context, "contexto novo");
        assert_eq!(records[0].1.index, 0);
    }

    #[test]
    fn evaluation_of_two_models() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.evaluation_models = vec!["m-a".to_string(), "m-b".to_string()];
        let mut progress = |_: usize, _: usize| {};

        let rule = logicbench::catalogue::lookup_str("PL/Modus_Tollens").unwrap();
        let mut dataset = RuleDataset::for_rule(rule);
        dataset.samples.push(BqaSample {
            id: 1,
            context: "Se chove, as ruas molham. As ruas não molham.".to_string(),
            qa_pairs: vec![
                QaPair {
                    question: "Isso implica que 'não chove'?".to_string(),
                    answer: true,
                },
                QaPair {
                    question: "Isso implica que 'chove'?".to_string(),
                    answer: false,
                },
            ],
        });
        artifact::write_json(&pipeline::dataset_path(&config, "BQA", rule), &dataset).unwrap();

        // The second model has no replies, and so is skipped
        let mut generator = Scripted::with([Ok("Sim."), Ok("unsat"), Ok("Sim"), Ok("talvez")]);
        let report = pipeline::evaluate(&config, &mut generator, &mut progress).unwrap();
        assert_eq!((report.read, report.written, report.skipped), (2, 2, 2));
        assert!(generator.prompts[0].starts_with("Considere o seguinte contexto:"));
        assert!(generator.prompts[1].contains("Conclusão: não chove"));

        let records: Vec<(usize, EvaluationRecord)> =
            artifact::read_jsonl(&evaluate::evaluation_artifact(&config, "m-a")).unwrap();
        assert_eq!(records[0].1.direct, Some(true));
        assert_eq!(records[0].1.sat_check, Some(true));
        assert_eq!(records[1].1.sat_check, None);

        let summary: ModelAccuracy = read_file(&evaluate::accuracy_path(&config, "m-a"));
        assert_eq!(summary.rules[0].rule, "PL/Modus_Tollens");
        assert_eq!(summary.rules[0].direct_accuracy(), Some(0.5));
        assert_eq!(summary.rules[0].sat_check_accuracy(), Some(1.0));
        assert_eq!(summary.direct_failures.len(), 1);
        assert_eq!(summary.direct_failures[0].question, "Isso implica que 'chove'?");

        // A second run asks only the second model
        let mut generator = Scripted::with([Ok("Não"), Ok("sat"), Ok("Não"), Ok("sat")]);
        let report = pipeline::evaluate(&config, &mut generator, &mut progress).unwrap();
        assert_eq!((report.written, report.skipped), (2, 0));
        assert_eq!(generator.prompts.len(), 4);

        let summary = evaluate::accuracy(&config, "m-b").unwrap();
        assert_eq!(summary.overall.direct_correct, 1);
        assert_eq!(summary.overall.sat_check_correct, 1);
    }

    #[test]
    fn evaluation_without_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut progress = |_: usize, _: usize| {};

        let mut generator = Scripted::default();
        assert_eq!(
            pipeline::evaluate(&config, &mut generator, &mut progress),
            Err(ErrorKind::Artifact(err::ArtifactError::Missing(dir.path().join("output/BQA"))))
        );
    }
}
