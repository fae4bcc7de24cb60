/*!
Configuration of the dataset pipeline.

A [PipelineConfig] may be read from a JSON file, with any missing field taking its default value:

```rust
# use logicbench::config::{ExhaustionPolicy, PipelineConfig};
let config: PipelineConfig = serde_json::from_str(r#"{ "instances_per_rule": 3, "on_exhaustion": "abort" }"#).unwrap();
assert_eq!(config.instances_per_rule, 3);
assert_eq!(config.on_exhaustion, ExhaustionPolicy::Abort);
assert_eq!(config.model, PipelineConfig::default().model);
```
*/

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::types::err::{self};

/// What a stage does when every generation credential has failed for a call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Fall back to the templated text, or skip the record, and continue.
    #[default]
    Degrade,

    /// Stop the stage with an error.
    Abort,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// The directory of intermediate (JSONL) artifacts.
    pub artifacts_dir: PathBuf,

    /// The directory under which the BQA and MCQA datasets are written.
    pub output_dir: PathBuf,

    /// A JSON file of the form `{"API_KEYS": {name: key, …}}`.
    pub credentials_path: PathBuf,

    /// The name of the generation model.
    pub model: String,

    /// The models evaluated on the BQA dataset, or only [model](PipelineConfig::model) if empty.
    pub evaluation_models: Vec<String>,

    /// Keys of the rules for which sentence banks are requested, or every rule of the catalogue if empty.
    pub rules: Vec<String>,

    /// The number of sentence banks requested for each rule.
    pub instances_per_rule: usize,

    /// The seed for question-variant choice and option shuffling.
    pub seed: u64,

    pub on_exhaustion: ExhaustionPolicy,

    /// Wait after a credential reports quota exhaustion.
    #[serde(with = "millis")]
    pub quota_delay: Duration,

    /// Wait after a credential reports any other failure.
    #[serde(with = "millis")]
    pub error_delay: Duration,

    /// Wait after each successful call.
    #[serde(with = "millis")]
    pub post_call_delay: Duration,

    /// Wait after every credential has failed in sequence.
    #[serde(with = "millis")]
    pub exhaustion_backoff: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            artifacts_dir: PathBuf::from("artifacts"),
            output_dir: PathBuf::from("output"),
            credentials_path: PathBuf::from("api_keys.json"),
            model: "gemini-2.5-pro".to_string(),
            evaluation_models: Vec::default(),
            rules: Vec::default(),
            instances_per_rule: 10,
            seed: 0,
            on_exhaustion: ExhaustionPolicy::Degrade,
            quota_delay: Duration::from_secs(1),
            error_delay: Duration::from_secs(5),
            post_call_delay: Duration::from_secs(2),
            exhaustion_backoff: Duration::from_secs(60),
        }
    }
}

impl PipelineConfig {
    /// Reads a configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, err::ArtifactError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| err::ArtifactError::Read(path.to_path_buf(), e.to_string()))?;
        serde_json::from_str(&text)
            .map_err(|e| err::ArtifactError::Read(path.to_path_buf(), e.to_string()))
    }

    /// The models to evaluate, in order.
    pub fn models_to_evaluate(&self) -> Vec<&str> {
        match self.evaluation_models.is_empty() {
            true => vec![self.model.as_str()],
            false => self.evaluation_models.iter().map(String::as_str).collect(),
        }
    }

    /// A configuration with every delay set to zero, for use with scripted generators.
    pub fn without_delays(mut self) -> Self {
        self.quota_delay = Duration::ZERO;
        self.error_delay = Duration::ZERO;
        self.post_call_delay = Duration::ZERO;
        self.exhaustion_backoff = Duration::ZERO;
        self
    }
}

/// Durations as a count of milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod pipeline_config_tests {
    use super::*;

    #[test]
    fn evaluated_models() {
        let mut config = PipelineConfig::default();
        assert_eq!(config.models_to_evaluate(), vec!["gemini-2.5-pro"]);

        config.evaluation_models = vec!["gemini-2.5-pro".into(), "gemini-2.5-flash".into()];
        assert_eq!(config.models_to_evaluate(), vec!["gemini-2.5-pro", "gemini-2.5-flash"]);
    }
}
