use std::io::{BufRead, Write};

use logicbench::{
    config::PipelineConfig,
    consequence::Consequence,
    pipeline::{
        generation::{CredentialPool, GeminiBackend, RotatingGenerator},
        StageReport,
    },
    types::err::{self},
};

/// A generator over the Gemini backend, with credentials from the configured file.
pub fn generator(config: &PipelineConfig) -> Result<RotatingGenerator<GeminiBackend>, err::GenerationError> {
    let pool = CredentialPool::from_file(&config.credentials_path)?;
    println!("c Read {} credentials from {}", pool.len(), config.credentials_path.display());

    Ok(RotatingGenerator::new(GeminiBackend::new()?, pool, config))
}

/// Asks whether to continue after templated contexts are written, reading a yes or no from stdin.
pub fn confirm(report: &StageReport) -> bool {
    println!("c {report}");
    print!("c Review the templated contexts. Continue to naturalization? (y/n): ");
    let _ = std::io::stdout().flush();

    let mut answer = String::default();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "sim"),
        Err(_) => false,
    }
}

/// The model of a consequence check, as `name=value` pairs.
pub fn model_string(consequence: &Consequence) -> String {
    match &consequence.model {
        Some(model) => model
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(" "),
        None => String::default(),
    }
}
