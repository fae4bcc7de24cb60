#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use logicbench::{
    catalogue::{self, CATALOGUE_VERSION},
    config::{Config, PipelineConfig},
    consequence::ConsequenceQuery,
    pipeline::{self, StageReport},
    reports::Report,
    types::err::ErrorKind,
};

mod misc;
mod parse_args;
mod window;

use parse_args::{PipelineArgs, SolverArgs};
use window::ProgressLine;

/// Construction and audit of a logical reasoning dataset
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    solver: SolverArgs,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stage 1: request sentence banks for each rule
    Banks,

    /// Stage 2a: instantiate the premise template of each sentence bank
    Templates,

    /// Stage 2b: rewrite each templated context as a natural context
    Naturalize,

    /// Stage 3: write the binary question answering dataset
    Bqa,

    /// Stage 4: write the multiple choice question answering dataset
    Mcqa,

    /// Stage 5: formalize each natural context and check the formalization
    Audit,

    /// Stage 6: put the questions of the binary dataset to each evaluated model
    Evaluate,

    /// Run every stage in sequence
    Run {
        /// Continue past the templated contexts without confirmation
        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// Check whether a conclusion follows from some premises
    Check {
        /// A premise, e.g. "Implies(p, q)" (repeatable)
        #[arg(long = "premise")]
        premises: Vec<String>,

        /// The conclusion
        #[arg(long)]
        conclusion: String,

        /// Display a countermodel, if the conclusion does not follow
        #[arg(long, default_value_t = false)]
        model: bool,
    },

    /// List the rules of the catalogue
    Catalogue {
        /// Check the expected answers of each rule against its formalization
        #[arg(long, default_value_t = false)]
        verify: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let solver_config = match parse_args::solver_config(&cli.solver) {
        Ok(config) => config,
        Err(e) => {
            println!("c {e}");
            std::process::exit(1);
        }
    };

    let pipeline_config = match parse_args::pipeline_config(&cli.pipeline) {
        Ok(config) => config,
        Err(e) => {
            println!("c {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::Check {
            premises,
            conclusion,
            model,
        } => check(&solver_config, &premises, &conclusion, model),

        Command::Catalogue { verify } => list_catalogue(&solver_config, verify),

        command => run_stages(command, &pipeline_config, &solver_config),
    }
}

fn check(config: &Config, premises: &[String], conclusion: &str, show_model: bool) {
    let premises = premises.iter().map(String::as_str).collect::<Vec<_>>();

    let query = match ConsequenceQuery::parse(&premises, conclusion) {
        Ok(query) => query,
        Err(e) => {
            println!("c Parse error: {e}");
            std::process::exit(1);
        }
    };

    let consequence = match query.check(config) {
        Ok(consequence) => consequence,
        Err(e) => {
            println!("c Solve error: {e}");
            std::process::exit(2);
        }
    };

    println!("s {}", consequence.status);
    match consequence.entailed {
        true => println!("c The conclusion follows from the premises."),
        false => println!("c The conclusion does not follow from the premises."),
    }

    if show_model && consequence.model.is_some() {
        println!("v {}", misc::model_string(&consequence));
    }

    match consequence.status {
        Report::Satisfiable => std::process::exit(10),
        Report::Unsatisfiable => std::process::exit(20),
        Report::Unknown => std::process::exit(30),
    }
}

fn list_catalogue(config: &Config, verify: bool) {
    println!("c Catalogue {CATALOGUE_VERSION}");

    let mut disagreements = 0;
    for rule in catalogue::rules() {
        let base = catalogue::base_placeholders(rule)
            .into_iter()
            .collect::<Vec<_>>()
            .join(", ");
        println!("{}\t{}\t{base}", rule.key(), rule.family.folder());

        if !verify {
            continue;
        }

        match catalogue::verify(rule, config) {
            Ok(verifications) if verifications.is_empty() => println!("c   no formalization"),

            Ok(verifications) => {
                for verification in verifications {
                    let mark = if verification.agrees() { "ok" } else { "DISAGREES" };
                    println!(
                        "c   {:?}: expected {}, entailed {} ({mark})",
                        verification.target, verification.expected, verification.entailed
                    );
                    if !verification.agrees() {
                        disagreements += 1;
                    }
                }
            }

            Err(e) => {
                println!("c   verification error: {e}");
                disagreements += 1;
            }
        }
    }

    if disagreements > 0 {
        println!("c {disagreements} disagreement(s)");
        std::process::exit(1);
    }
}

/// The artifact whose absence is reported as the reason a stage could not begin.
fn missing_hint(e: &ErrorKind) -> Option<&PathBuf> {
    match e {
        ErrorKind::Artifact(logicbench::types::err::ArtifactError::Missing(path)) => Some(path),
        _ => None,
    }
}

fn run_stages(command: Command, config: &PipelineConfig, solver_config: &Config) {
    let mut line = ProgressLine::new(stage_label(&command));
    let mut progress = |done: usize, total: usize| line.update(done, total);
    let evaluating = matches!(command, Command::Evaluate);

    let result: Result<Vec<StageReport>, ErrorKind> = match command {
        Command::Templates => pipeline::templates(config, &mut progress).map(|report| vec![report]),

        Command::Bqa => pipeline::bqa(config, &mut progress).map(|report| vec![report]),

        command => {
            let mut generator = match misc::generator(config) {
                Ok(generator) => generator,
                Err(e) => {
                    println!("c {e}");
                    std::process::exit(1);
                }
            };

            match command {
                Command::Banks => pipeline::banks(config, &mut generator, &mut progress).map(|report| vec![report]),

                Command::Naturalize => {
                    pipeline::naturalize(config, &mut generator, &mut progress).map(|report| vec![report])
                }

                Command::Mcqa => pipeline::mcqa(config, &mut generator, &mut progress).map(|report| vec![report]),

                Command::Audit => {
                    pipeline::audit(config, solver_config, &mut generator, &mut progress).map(|report| vec![report])
                }

                Command::Evaluate => pipeline::evaluate(config, &mut generator, &mut progress).map(|report| vec![report]),

                Command::Run { yes } => {
                    let mut confirm = |report: &StageReport| yes || misc::confirm(report);
                    pipeline::run(config, solver_config, &mut generator, &mut confirm, &mut progress)
                }

                _ => Ok(Vec::default()),
            }
        }
    };
    line.finish();

    match result {
        Ok(reports) => {
            for report in reports {
                println!("c {report}");
            }
            if evaluating {
                print_accuracy(config);
            }
        }

        Err(e) => {
            match missing_hint(&e) {
                Some(path) => println!("c Missing input artifact {}, run the previous stage first", path.display()),
                None => println!("c Stage error: {e}"),
            }
            std::process::exit(2);
        }
    }
}

fn stage_label(command: &Command) -> &'static str {
    match command {
        Command::Banks => pipeline::Stage::Banks.name(),
        Command::Templates => pipeline::Stage::Templates.name(),
        Command::Naturalize => pipeline::Stage::Naturalize.name(),
        Command::Bqa => pipeline::Stage::Bqa.name(),
        Command::Mcqa => pipeline::Stage::Mcqa.name(),
        Command::Audit => pipeline::Stage::Audit.name(),
        Command::Evaluate => pipeline::Stage::Evaluate.name(),
        _ => "pipeline",
    }
}

fn print_accuracy(config: &PipelineConfig) {
    let percent = |accuracy: Option<f64>| match accuracy {
        Some(accuracy) => format!("{:.1}%", accuracy * 100.0),
        None => "-".to_string(),
    };

    for model in config.models_to_evaluate() {
        let accuracy = match pipeline::evaluate::accuracy(config, model) {
            Ok(accuracy) => accuracy,
            Err(e) => {
                println!("c {model}: {e}");
                continue;
            }
        };

        println!("c {model}");
        for rule in accuracy.rules.iter().chain(std::iter::once(&accuracy.overall)) {
            println!(
                "c   {:<40} direct {:>6}  sat check {:>6} ({} of {} answered)",
                rule.rule,
                percent(rule.direct_accuracy()),
                percent(rule.sat_check_accuracy()),
                rule.sat_check_answered,
                rule.questions
            );
        }
        println!("c   {} direct failure(s)", accuracy.direct_failures.len());
    }
}
