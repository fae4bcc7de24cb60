use crate::config::Config;

use rand::{rngs::StdRng, SeedableRng};

use super::GenericContext;

/// A context which uses [StdRng] as a source of randomness.
pub type Context = GenericContext<StdRng>;

impl Context {
    /// Creates a context from some given configuration, with randomness seeded by the configuration.
    pub fn from_config(config: Config) -> Self {
        let rng = StdRng::seed_from_u64(config.seed.value);
        Self::from_parts(config, rng)
    }
}
