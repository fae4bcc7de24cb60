use std::{path::PathBuf, time::Duration};

use logicbench::config::{
    Config, ConfigOption, ExhaustionPolicy, PipelineConfig, PolarityLean, RandomDecisionBias, Seed,
};

/// Options of the solver, shared by every command which checks consequence.
#[derive(clap::Args, Debug, Default)]
pub struct SolverArgs {
    /// The chance of choosing to assign positive polarity to an atom when making a decision
    #[arg(long = "polarity_lean", global = true)]
    pub polarity_lean: Option<PolarityLean>,

    /// The chance of deciding on a random atom, rather than the lowest unvalued atom
    #[arg(long = "random_decision_bias", global = true)]
    pub random_decision_bias: Option<RandomDecisionBias>,

    /// The count of conflicts after which a solve is abandoned, with zero for no limit
    #[arg(long = "conflict_limit", global = true)]
    pub conflict_limit: Option<usize>,

    /// The seed of the source of randomness of the solver
    #[arg(long = "seed", global = true)]
    pub seed: Option<Seed>,

    /// The seconds after which a solve is abandoned, with zero for no limit
    #[arg(long = "time_limit", global = true)]
    pub time_limit: Option<u64>,
}

/// Overrides of the pipeline configuration.
#[derive(clap::Args, Debug, Default)]
pub struct PipelineArgs {
    /// A JSON file of pipeline configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The directory of intermediate artifacts
    #[arg(long = "artifacts_dir", global = true)]
    pub artifacts_dir: Option<PathBuf>,

    /// The directory of the datasets
    #[arg(long = "output_dir", global = true)]
    pub output_dir: Option<PathBuf>,

    /// The file of generation credentials
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    /// The count of sentence banks requested for each rule
    #[arg(long = "instances_per_rule", global = true)]
    pub instances_per_rule: Option<usize>,

    /// Restrict sentence banks to a rule, e.g. PL/Modus_Tollens (repeatable)
    #[arg(long = "rule", global = true)]
    pub rules: Vec<String>,

    /// A model to evaluate on the binary dataset (repeatable)
    #[arg(long = "evaluation_model", global = true)]
    pub evaluation_models: Vec<String>,

    /// Stop a stage when every credential fails, rather than degrading
    #[arg(long, global = true, default_value_t = false)]
    pub abort: bool,
}

pub enum ConfigError {
    OutOfBounds { name: &'static str, min: String, max: String },
    File(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            ConfigError::OutOfBounds { name, min, max } => {
                write!(f, "{name} requires a value between {min} and {max}")
            }
            ConfigError::File(reason) => write!(f, "{reason}"),
        }
    }
}

/// Sets `option` to `value`, if given and within bounds.
fn set_option<T: Clone + PartialOrd + std::fmt::Debug>(
    option: &mut ConfigOption<T>,
    value: Option<T>,
) -> Result<(), ConfigError> {
    let Some(value) = value else {
        return Ok(());
    };

    match option.set(value) {
        true => {
            println!("c {} set to: {:?}", option.name, option.value);
            Ok(())
        }

        false => {
            let (min, max) = option.min_max();
            Err(ConfigError::OutOfBounds {
                name: option.name,
                min: format!("{min:?}"),
                max: format!("{max:?}"),
            })
        }
    }
}

/// The solver configuration, from the defaults and any given options.
pub fn solver_config(args: &SolverArgs) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    set_option(&mut cfg.polarity_lean, args.polarity_lean)?;
    set_option(&mut cfg.random_decision_bias, args.random_decision_bias)?;
    set_option(&mut cfg.conflict_limit, args.conflict_limit)?;
    set_option(&mut cfg.seed, args.seed)?;
    set_option(&mut cfg.time_limit, args.time_limit.map(Duration::from_secs))?;

    Ok(cfg)
}

/// The pipeline configuration, from the configuration file (or defaults) and any given overrides.
pub fn pipeline_config(args: &PipelineArgs) -> Result<PipelineConfig, ConfigError> {
    let mut cfg = match &args.config {
        Some(path) => PipelineConfig::from_file(path).map_err(|e| ConfigError::File(e.to_string()))?,
        None => PipelineConfig::default(),
    };

    if let Some(dir) = &args.artifacts_dir {
        cfg.artifacts_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        cfg.output_dir = dir.clone();
    }
    if let Some(path) = &args.credentials {
        cfg.credentials_path = path.clone();
    }
    if let Some(count) = args.instances_per_rule {
        cfg.instances_per_rule = count;
    }
    if !args.rules.is_empty() {
        cfg.rules = args.rules.clone();
    }
    if !args.evaluation_models.is_empty() {
        cfg.evaluation_models = args.evaluation_models.clone();
    }
    if args.abort {
        cfg.on_exhaustion = ExhaustionPolicy::Abort;
    }

    Ok(cfg)
}
