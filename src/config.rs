//! Run configuration, read from an optional TOML file.

use crate::{
    error::{Error, Result},
    validator::DEFAULT_PLACEHOLDER,
};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON object of kanji to readings.
    pub kanji_readings: PathBuf,
    /// JSON object of compound words to readings. Without one, only decomposition is used.
    pub compound_readings: Option<PathBuf>,
    /// Directory containing the question set files.
    pub questions_dir: PathBuf,
    /// Question set files are the `<file_prefix>*.json` files of `questions_dir`.
    pub file_prefix: String,
    /// Reading that marks an annotation whose reading is yet to be written.
    pub placeholder: String,
    /// Where to write the JSON report, if anywhere.
    pub report_path: Option<PathBuf>,
    /// Worker threads, 0 for one per core.
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kanji_readings: PathBuf::from("src/data/kanji-readings/kanji-readings.json"),
            compound_readings: Some(PathBuf::from(
                "src/data/kanji-readings/compound-readings.json",
            )),
            questions_dir: PathBuf::from("src/data/questions"),
            file_prefix: "questions-".to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            report_path: None,
            jobs: 0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<()> {
        if self.placeholder.is_empty() {
            return Err(Error::Config("placeholder must not be empty".to_string()));
        }
        if self.file_prefix.contains(|c: char| c == '/' || c == '\\') {
            return Err(Error::Config(format!(
                "file_prefix \"{}\" must be a file name prefix, not a path",
                self.file_prefix
            )));
        }
        Ok(())
    }
}
