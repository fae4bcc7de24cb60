/*!
Configuration of a context, and of the dataset pipeline.

All configuration for a context is contained within the context.
A context is configured once, when built, and a [Config] is (typically) built by updating the [Default] value, e.g.

```rust
# use logicbench::config::Config;
let mut config = Config::default();
assert!(config.conflict_limit.set(10_000));
assert!(!config.polarity_lean.set(2.0));
```

The [PipelineConfig] is separate, as the pipeline holds a context configuration for the audit stage and not the other way around.
*/

mod config_option;
pub use config_option::ConfigOption;

mod pipeline;
pub use pipeline::{ExhaustionPolicy, PipelineConfig};

mod rng;
pub use rng::{PolarityLean, RandomDecisionBias, Seed};

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The probability of assigning positive polarity to an atom when freely choosing an atom.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of choosing an atom at random, rather than the least unvalued atom, when making a decision.
    pub random_decision_bias: ConfigOption<RandomDecisionBias>,

    /// The number of conflicts after which a solve gives up, with zero for no limit.
    pub conflict_limit: ConfigOption<usize>,

    /// The seed of the source of randomness.
    pub seed: ConfigOption<Seed>,

    /// The time limit for a solve, with zero for no limit.
    pub time_limit: ConfigOption<std::time::Duration>,
}

impl Default for Config {
    /// The default context is configured to provide deterministic results, with no randomness consulted.
    fn default() -> Self {
        Config {
            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            conflict_limit: ConfigOption {
                name: "conflict_limit",
                min: 0,
                max: usize::MAX,
                value: 0,
            },

            seed: ConfigOption {
                name: "seed",
                min: Seed::MIN,
                max: Seed::MAX,
                value: 0,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: std::time::Duration::from_secs(0),
                max: std::time::Duration::MAX,
                value: std::time::Duration::from_secs(0),
            },
        }
    }
}
