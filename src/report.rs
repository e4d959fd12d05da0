//! Aggregates validation results into a report.

use crate::{
    dictionary::Dictionaries,
    error::{Error, Result},
    utils,
    validator::{MatchResult, Outcome},
};
use serde::Serialize;
use std::{collections::BTreeMap, fmt::Display, fs, path::Path};

// occurrences printed per kanji or compound
const MAX_EXAMPLES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub placeholder: usize,
    /// Annotation and failure counts per question set.
    pub files: BTreeMap<String, FileSummary>,
    /// Failures of single kanji, by kanji.
    pub single_kanji: BTreeMap<String, FailureGroup>,
    /// Failures of compound words, by compound.
    pub compounds: BTreeMap<String, FailureGroup>,
    pub suggestions: Suggestions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub total: usize,
    pub failures: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FailureGroup {
    /// The readings the relevant dictionary lists for the text.
    pub known_readings: Vec<String>,
    pub failures: Vec<Failure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub outcome: Outcome,
    pub file: String,
    pub id: String,
    pub reading: String,
    pub sentence: String,
}

/// Readings that could be added to the dictionaries to make invalid readings valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub kanji: BTreeMap<String, KanjiSuggestion>,
    pub compounds: BTreeMap<String, Vec<String>>,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.kanji.is_empty() && self.compounds.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KanjiSuggestion {
    /// Readings used in the questions but missing from the dictionary.
    pub new_readings: Vec<String>,
    /// The dictionary's readings followed by the new ones.
    pub merged: Vec<String>,
}

impl ValidationReport {
    pub fn build(results: &[MatchResult], dictionaries: &Dictionaries) -> Self {
        let mut report = Self {
            total: results.len(),
            ..Self::default()
        };

        for result in results {
            let file = report
                .files
                .entry(result.location.file.clone())
                .or_default();
            file.total += 1;
            match result.outcome {
                Outcome::Valid => {
                    report.valid += 1;
                    continue;
                }
                Outcome::Invalid => report.invalid += 1,
                Outcome::Placeholder => report.placeholder += 1,
            }
            file.failures += 1;

            let single = utils::is_single_symbol(&result.text);
            let (groups, known) = if single {
                (
                    &mut report.single_kanji,
                    dictionaries.lookup_symbol(&result.text),
                )
            } else {
                (
                    &mut report.compounds,
                    dictionaries.lookup_compound(&result.text),
                )
            };
            let group = groups
                .entry(result.text.clone())
                .or_insert_with(|| FailureGroup {
                    known_readings: known.to_vec(),
                    failures: vec![],
                });
            group.failures.push(Failure {
                outcome: result.outcome,
                file: result.location.file.clone(),
                id: result.location.id.clone(),
                reading: result.reading.clone(),
                sentence: result.sentence.clone(),
            });

            if result.outcome == Outcome::Invalid {
                // suggest the reading in the form the dictionaries store it
                let normalized = utils::normalize_reading(&result.reading);
                if single {
                    let suggestion = report
                        .suggestions
                        .kanji
                        .entry(result.text.clone())
                        .or_default();
                    if !suggestion.new_readings.contains(&normalized) {
                        suggestion.new_readings.push(normalized);
                    }
                } else {
                    let suggestion = report
                        .suggestions
                        .compounds
                        .entry(result.text.clone())
                        .or_default();
                    if !suggestion.contains(&normalized) {
                        suggestion.push(normalized);
                    }
                }
            }
        }

        for (kanji, suggestion) in &mut report.suggestions.kanji {
            suggestion.merged = dictionaries.lookup_symbol(kanji).to_vec();
            suggestion
                .merged
                .extend(suggestion.new_readings.iter().cloned());
        }

        tracing::info!(
            "{} readings checked: {} valid, {} invalid, {} placeholders",
            report.total,
            report.valid,
            report.invalid,
            report.placeholder
        );
        report
    }

    pub fn failures(&self) -> usize {
        self.invalid + self.placeholder
    }

    /// Whether any reading was invalid or a placeholder.
    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::json(path, e))?;
        fs::write(path, json).map_err(|e| Error::io(path, e))
    }
}

/// Prints a summary for humans.
impl Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (file, summary) in &self.files {
            if summary.failures == 0 {
                writeln!(f, "{file}: all {} readings valid", summary.total)?;
            } else {
                writeln!(
                    f,
                    "{file}: {} of {} readings need attention",
                    summary.failures, summary.total
                )?;
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "total: {}, valid: {}, invalid: {}, placeholders: {}",
            self.total, self.valid, self.invalid, self.placeholder
        )?;
        if !self.has_failures() {
            return Ok(());
        }

        if !self.single_kanji.is_empty() {
            writeln!(f, "\nsingle kanji:")?;
            for (kanji, group) in &self.single_kanji {
                write_group(f, kanji, group, "no readings in the kanji dictionary")?;
            }
        }
        if !self.compounds.is_empty() {
            writeln!(f, "\ncompound words:")?;
            for (compound, group) in &self.compounds {
                write_group(f, compound, group, "not in the compound dictionary")?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f, "\nsuggested additions:")?;
            if !self.suggestions.kanji.is_empty() {
                writeln!(f, "  kanji dictionary:")?;
                for (kanji, suggestion) in &self.suggestions.kanji {
                    writeln!(f, "    \"{kanji}\": {}", json_list(&suggestion.merged))?;
                }
            }
            if !self.suggestions.compounds.is_empty() {
                writeln!(f, "  compound dictionary:")?;
                for (compound, readings) in &self.suggestions.compounds {
                    writeln!(f, "    \"{compound}\": {}", json_list(readings))?;
                }
            }
        }
        Ok(())
    }
}

fn write_group(
    f: &mut std::fmt::Formatter<'_>,
    text: &str,
    group: &FailureGroup,
    no_readings: &str,
) -> std::fmt::Result {
    writeln!(f, "  {text}")?;
    if group.known_readings.is_empty() {
        writeln!(f, "    {no_readings}")?;
    } else {
        writeln!(f, "    valid readings: {}", group.known_readings.join(", "))?;
    }
    writeln!(f, "    failures ({} total):", group.failures.len())?;
    for failure in group.failures.iter().take(MAX_EXAMPLES) {
        let reading = match failure.outcome {
            Outcome::Placeholder => format!("{} (placeholder)", failure.reading),
            _ => failure.reading.clone(),
        };
        writeln!(f, "      - {reading} (in {} id:{})", failure.file, failure.id)?;
    }
    Ok(())
}

fn json_list(readings: &[String]) -> String {
    serde_json::to_string(readings).unwrap_or_default()
}
