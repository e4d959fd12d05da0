//! Question set files: `{"questions": [{"id": ..., "sentence": ...}, ...]}`.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

const UNKNOWN_ID: &str = "unknown";

/// A single question: an identifier and a sentence containing `[kanji|reading]` annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub id: String,
    pub sentence: String,
}

/// The questions of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    /// Identifies the set in reports, the file name when loaded from disk.
    pub name: String,
    pub questions: Vec<Question>,
}

// on-disk format, other fields of the questions are ignored
#[derive(Debug, Deserialize)]
struct QuestionFile {
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: Option<String>,
    #[serde(default)]
    sentence: String,
}

impl QuestionSet {
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }

    /// Loads a question set from a JSON file, named after the file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let file: QuestionFile =
            serde_json::from_str(&contents).map_err(|e| Error::json(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let questions = file
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| {
                let id = q.id.unwrap_or_else(|| {
                    tracing::warn!("question {i} in {name} has no id");
                    UNKNOWN_ID.to_string()
                });
                Question {
                    id,
                    sentence: q.sentence,
                }
            })
            .collect::<Vec<_>>();
        tracing::debug!("loaded {} questions from {}", questions.len(), path.display());
        Ok(Self { name, questions })
    }
}

/// Finds the question set files in a directory: `<prefix>*.json`, sorted by path.
pub fn discover(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut paths = vec![];
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.starts_with(prefix) && file_name.ends_with(".json") && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Loads every question set file found by [`discover`].
pub fn load_all(dir: &Path, prefix: &str) -> Result<Vec<QuestionSet>> {
    let paths = discover(dir, prefix)?;
    if paths.is_empty() {
        tracing::warn!(
            "no question files matching {prefix}*.json in {}",
            dir.display()
        );
    }
    paths.iter().map(|p| QuestionSet::load(p)).collect()
}
