/*!
The natural-language generation collaborator.

Stages ask for text through the [Generate] trait.
The canonical implementation is a [RotatingGenerator], which passes each prompt to a [Backend] with the current credential of a [CredentialPool], rotating through the pool on failure.

For each call:
- Each credential is tried at most once.
- A credential reporting quota exhaustion is rotated away from, with a short wait.
- A credential reporting any other failure is rotated away from, with a longer wait.
- After a successful call there is a fixed wait, to respect rate limits.
- If every credential fails, there is a long wait, and [CredentialsExhausted](err::GenerationError::CredentialsExhausted) is returned.

Rotation persists across calls, so a call begins with the credential which last succeeded (or was last rotated to).
*/

use std::{collections::BTreeMap, path::Path, time::Duration};

use serde::Deserialize;

use crate::{
    config::PipelineConfig,
    misc::log::targets::{self},
    types::err::{self},
};

/// A source of generated text.
pub trait Generate {
    /// Text generated from `prompt`.
    ///
    /// The `purpose` of the call is used only in logs.
    fn generate(&mut self, prompt: &str, purpose: &str) -> Result<String, err::GenerationError>;

    /// Directs further calls to the named model.
    ///
    /// Generators of a single model may ignore this.
    fn use_model(&mut self, _model: &str) {}
}

/// Failures of a single call to a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendError {
    /// The quota of the credential has been exhausted.
    ResourceExhausted,

    /// Any other failure.
    Transient(String),
}

/// A provider of generated text.
pub trait Backend {
    fn complete(&self, credential: &str, model: &str, prompt: &str) -> Result<String, BackendError>;
}

/// The default endpoint of the generative language service.
pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A [Backend] using the `generateContent` REST method of the Gemini API.
pub struct GeminiBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl GeminiBackend {
    pub fn new() -> Result<Self, err::GenerationError> {
        Self::with_endpoint(GEMINI_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self, err::GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| err::GenerationError::Client(e.to_string()))?;

        Ok(GeminiBackend {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl Backend for GeminiBackend {
    fn complete(&self, credential: &str, model: &str, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/{model}:generateContent", self.endpoint);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", credential)])
            .json(&body)
            .send()
            .map_err(|e| BackendError::Transient(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(BackendError::ResourceExhausted);
        }
        if !status.is_success() {
            return Err(BackendError::Transient(format!("HTTP {status}")));
        }

        let data: serde_json::Value = response
            .json()
            .map_err(|e| BackendError::Transient(e.to_string()))?;

        data.pointer("/candidates/0/content/parts/0/text")
            .and_then(|text| text.as_str())
            .map(|text| text.trim().to_string())
            .ok_or_else(|| BackendError::Transient("no text in response".to_string()))
    }
}

/// An ordered pool of credentials, with an explicit current credential.
#[derive(Clone, Debug)]
pub struct CredentialPool {
    credentials: Vec<String>,
    current: usize,
}

#[derive(Deserialize)]
struct CredentialsFile {
    #[serde(rename = "API_KEYS")]
    api_keys: BTreeMap<String, String>,
}

impl CredentialPool {
    pub fn new(credentials: Vec<String>) -> Result<Self, err::GenerationError> {
        if credentials.is_empty() {
            return Err(err::GenerationError::NoCredentials);
        }
        Ok(CredentialPool {
            credentials,
            current: 0,
        })
    }

    /// A pool from a JSON file of the form `{"API_KEYS": {name: key, …}}`, with credentials ordered by name.
    pub fn from_file(path: &Path) -> Result<Self, err::GenerationError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| err::GenerationError::CredentialsFile(format!("{}: {e}", path.display())))?;
        let file: CredentialsFile = serde_json::from_str(&text)
            .map_err(|e| err::GenerationError::CredentialsFile(format!("{}: {e}", path.display())))?;

        Self::new(file.api_keys.into_values().collect())
    }

    pub fn current(&self) -> &str {
        &self.credentials[self.current]
    }

    /// The index of the current credential.
    pub fn index(&self) -> usize {
        self.current
    }

    /// Makes the next credential (cyclically) current, returning the index of the credential.
    pub fn rotate(&mut self) -> usize {
        self.current = (self.current + 1) % self.credentials.len();
        log::warn!(target: targets::GENERATION, "Rotating to credential #{}", self.current);
        self.current
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

/// Waits between calls.
#[derive(Clone, Copy, Debug)]
pub struct Delays {
    pub quota: Duration,
    pub error: Duration,
    pub post_call: Duration,
    pub exhaustion: Duration,
}

impl Delays {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Delays {
            quota: config.quota_delay,
            error: config.error_delay,
            post_call: config.post_call_delay,
            exhaustion: config.exhaustion_backoff,
        }
    }
}

/// A [Generate] implementation over a [Backend], rotating through a [CredentialPool].
pub struct RotatingGenerator<B: Backend> {
    pub backend: B,
    pub pool: CredentialPool,
    pub model: String,
    pub delays: Delays,
}

impl<B: Backend> RotatingGenerator<B> {
    pub fn new(backend: B, pool: CredentialPool, config: &PipelineConfig) -> Self {
        RotatingGenerator {
            backend,
            pool,
            model: config.model.clone(),
            delays: Delays::from_config(config),
        }
    }
}

fn wait(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}

impl<B: Backend> Generate for RotatingGenerator<B> {
    fn generate(&mut self, prompt: &str, purpose: &str) -> Result<String, err::GenerationError> {
        for _ in 0..self.pool.len() {
            match self.backend.complete(self.pool.current(), &self.model, prompt) {
                Ok(text) => {
                    log::debug!(target: targets::GENERATION, "{purpose}: ok with credential #{}", self.pool.index());
                    wait(self.delays.post_call);
                    return Ok(text);
                }

                Err(BackendError::ResourceExhausted) => {
                    log::warn!(target: targets::GENERATION, "{purpose}: quota exhausted for credential #{}", self.pool.index());
                    self.pool.rotate();
                    wait(self.delays.quota);
                }

                Err(BackendError::Transient(reason)) => {
                    log::warn!(target: targets::GENERATION, "{purpose}: credential #{} failed: {reason}", self.pool.index());
                    self.pool.rotate();
                    wait(self.delays.error);
                }
            }
        }

        log::error!(target: targets::GENERATION, "{purpose}: every credential failed");
        wait(self.delays.exhaustion);
        Err(err::GenerationError::CredentialsExhausted)
    }

    fn use_model(&mut self, model: &str) {
        if self.model != model {
            log::info!(target: targets::GENERATION, "Switching to model {model}");
            self.model = model.to_string();
        }
    }
}

#[cfg(test)]
mod generation_tests {
    use super::*;

    use std::cell::RefCell;

    /// Replies to calls in order, recording the credential and model of each call.
    struct Scripted {
        replies: RefCell<Vec<Result<String, BackendError>>>,
        seen: RefCell<Vec<String>>,
        models: RefCell<Vec<String>>,
    }

    impl Backend for Scripted {
        fn complete(&self, credential: &str, model: &str, _: &str) -> Result<String, BackendError> {
            self.seen.borrow_mut().push(credential.to_string());
            self.models.borrow_mut().push(model.to_string());
            let mut replies = self.replies.borrow_mut();
            if replies.is_empty() {
                Err(BackendError::Transient("script finished".to_string()))
            } else {
                replies.remove(0)
            }
        }
    }

    fn generator(replies: Vec<Result<String, BackendError>>) -> RotatingGenerator<Scripted> {
        let pool = CredentialPool::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let backend = Scripted {
            replies: RefCell::new(replies),
            seen: RefCell::default(),
            models: RefCell::default(),
        };
        RotatingGenerator::new(backend, pool, &PipelineConfig::default().without_delays())
    }

    #[test]
    fn rotation_on_failure() {
        let mut generator = generator(vec![
            Err(BackendError::ResourceExhausted),
            Err(BackendError::Transient("timeout".into())),
            Ok("texto".into()),
        ]);

        assert_eq!(generator.generate("prompt", "test"), Ok("texto".to_string()));
        assert_eq!(*generator.backend.seen.borrow(), vec!["a", "b", "c"]);
        assert_eq!(generator.pool.index(), 2);
    }

    #[test]
    fn rotation_persists_across_calls() {
        let mut generator = generator(vec![
            Err(BackendError::ResourceExhausted),
            Ok("one".into()),
            Ok("two".into()),
        ]);

        assert!(generator.generate("prompt", "test").is_ok());
        assert!(generator.generate("prompt", "test").is_ok());
        assert_eq!(*generator.backend.seen.borrow(), vec!["a", "b", "b"]);
    }

    #[test]
    fn exhaustion() {
        let mut generator = generator(vec![
            Err(BackendError::ResourceExhausted),
            Err(BackendError::ResourceExhausted),
            Err(BackendError::ResourceExhausted),
            Ok("too late".into()),
        ]);

        assert_eq!(
            generator.generate("prompt", "test"),
            Err(err::GenerationError::CredentialsExhausted)
        );
        assert_eq!(generator.backend.seen.borrow().len(), 3);
        assert_eq!(generator.pool.index(), 0);
    }

    #[test]
    fn model_switch() {
        let mut generator = generator(vec![Ok("one".into()), Ok("two".into())]);

        assert!(generator.generate("prompt", "test").is_ok());
        generator.use_model("gemini-2.5-flash");
        assert!(generator.generate("prompt", "test").is_ok());

        assert_eq!(*generator.backend.models.borrow(), vec!["gemini-2.5-pro", "gemini-2.5-flash"]);
    }

    #[test]
    fn empty_pools() {
        assert_eq!(
            CredentialPool::new(Vec::default()).map(|pool| pool.len()),
            Err(err::GenerationError::NoCredentials)
        );
    }

    #[test]
    fn credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_keys.json");
        std::fs::write(&path, r#"{"API_KEYS": {"second": "k2", "first": "k1"}}"#).unwrap();

        let mut pool = CredentialPool::from_file(&path).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.current(), "k1");
        pool.rotate();
        assert_eq!(pool.current(), "k2");
    }
}
