/*!
Flat-file artifacts.

Each stage reads the artifact of the previous stage, and writes its own.
Intermediate artifacts are JSON Lines, with one record per line.

Reading is tolerant: a line which does not decode to a record is logged and skipped, with records keeping the index of their line.
*/

use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    misc::log::targets::{self},
    template::SentenceBank,
    types::err::{self},
};

/// A sentence bank for a rule, from stage 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRecord {
    /// The key of the rule, e.g. `PL/Modus_Tollens`.
    pub rule: String,
    pub sentence_bank: SentenceBank,
}

/// A templated context, from stage 2a.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatedRecord {
    pub rule: String,
    pub sentence_bank: SentenceBank,
    pub templated_context: String,
    pub condition: String,
    pub situation: String,
}

/// A naturalized context, from stage 2b.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalizedRecord {
    pub rule: String,
    pub sentence_bank: SentenceBank,
    pub natural_context: String,
}

fn ensure_parent(path: &Path) -> Result<(), err::ArtifactError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| err::ArtifactError::Write(parent.to_path_buf(), e.to_string())),
        _ => Ok(()),
    }
}

/// The records of a JSON Lines file, each paired with the (zero-based) index of its line.
///
/// Blank lines are ignored, and lines which fail to decode are skipped with a warning.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<(usize, T)>, err::ArtifactError> {
    if !path.exists() {
        return Err(err::ArtifactError::Missing(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| err::ArtifactError::Read(path.to_path_buf(), e.to_string()))?;

    let mut records = Vec::default();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| err::ArtifactError::Read(path.to_path_buf(), e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str(&line) {
            Ok(record) => records.push((index, record)),
            Err(e) => {
                log::warn!(target: targets::ARTIFACT, "Skipping malformed line {index} of {}: {e}", path.display());
            }
        }
    }

    log::info!(target: targets::ARTIFACT, "Read {} records from {}", records.len(), path.display());
    Ok(records)
}

fn write_lines<'r, T: Serialize + 'r>(
    file: File,
    path: &Path,
    records: impl IntoIterator<Item = &'r T>,
) -> Result<usize, err::ArtifactError> {
    let mut writer = BufWriter::new(file);
    let mut count = 0;

    for record in records {
        let line = serde_json::to_string(record).map_err(|e| err::ArtifactError::Serialize(e.to_string()))?;
        writeln!(writer, "{line}").map_err(|e| err::ArtifactError::Write(path.to_path_buf(), e.to_string()))?;
        count += 1;
    }

    writer
        .flush()
        .map_err(|e| err::ArtifactError::Write(path.to_path_buf(), e.to_string()))?;
    Ok(count)
}

/// Writes `records` to `path` as JSON Lines, replacing any existing file.
pub fn write_jsonl<'r, T: Serialize + 'r>(
    path: &Path,
    records: impl IntoIterator<Item = &'r T>,
) -> Result<usize, err::ArtifactError> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| err::ArtifactError::Write(path.to_path_buf(), e.to_string()))?;
    let count = write_lines(file, path, records)?;
    log::info!(target: targets::ARTIFACT, "Wrote {count} records to {}", path.display());
    Ok(count)
}

/// Creates an empty file at `path`, replacing any existing file.
pub fn truncate(path: &Path) -> Result<(), err::ArtifactError> {
    ensure_parent(path)?;
    File::create(path)
        .map(|_| ())
        .map_err(|e| err::ArtifactError::Write(path.to_path_buf(), e.to_string()))
}

/// Appends `record` to `path` as a line of JSON, creating the file if needed.
pub fn append_jsonl<T: Serialize>(path: &Path, record: &T) -> Result<(), err::ArtifactError> {
    ensure_parent(path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| err::ArtifactError::Write(path.to_path_buf(), e.to_string()))?;
    write_lines(file, path, [record]).map(|_| ())
}

/// Writes `value` to `path` as indented JSON, replacing any existing file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), err::ArtifactError> {
    ensure_parent(path)?;
    let text = serde_json::to_string_pretty(value).map_err(|e| err::ArtifactError::Serialize(e.to_string()))?;
    std::fs::write(path, text).map_err(|e| err::ArtifactError::Write(path.to_path_buf(), e.to_string()))
}

/// The value of a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, err::ArtifactError> {
    if !path.exists() {
        return Err(err::ArtifactError::Missing(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|e| err::ArtifactError::Read(path.to_path_buf(), e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| err::ArtifactError::Read(path.to_path_buf(), e.to_string()))
}

#[cfg(test)]
mod artifact_tests {
    use super::*;

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banks.jsonl");
        std::fs::write(
            &path,
            concat!(
                "{\"rule\": \"PL/Modus_Ponens\", \"sentence_bank\": {\"p\": \"a\", \"q\": \"b\"}}\n",
                "not json\n",
                "\n",
                "{\"rule\": \"PL/Modus_Tollens\", \"sentence_bank\": {}}\n",
            ),
        )
        .unwrap();

        let records: Vec<(usize, BankRecord)> = read_jsonl(&path).unwrap();
        let indices = records.iter().map(|(index, _)| *index).collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 3]);
        assert_eq!(records[0].1.sentence_bank.get("q"), Some("b"));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.jsonl");
        assert_eq!(
            read_jsonl::<BankRecord>(&path),
            Err(err::ArtifactError::Missing(path.clone()))
        );
    }

    #[test]
    fn write_then_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.jsonl");

        let first = BankRecord {
            rule: "PL/Modus_Ponens".to_string(),
            sentence_bank: SentenceBank::from_pairs([("p", "a"), ("q", "b")]),
        };
        let second = BankRecord {
            rule: "PL/Modus_Tollens".to_string(),
            sentence_bank: SentenceBank::default(),
        };

        assert_eq!(write_jsonl(&path, [&first]), Ok(1));
        assert!(append_jsonl(&path, &second).is_ok());

        let records: Vec<(usize, BankRecord)> = read_jsonl(&path).unwrap();
        assert_eq!(records, vec![(0, first), (1, second)]);
    }
}
