use crate::{
    annotation::annotations, dictionary::Dictionaries, matcher::CompoundMatcher,
    question::QuestionSet, utils,
};
use rayon::prelude::*;
use serde::Serialize;

/// The reading used in sentences whose reading has not been written yet.
pub const DEFAULT_PLACEHOLDER: &str = "よみ";

/// The classification of an annotation's reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The reading matches the dictionaries.
    Valid,
    /// The reading is the placeholder and still needs to be filled in.
    Placeholder,
    /// The reading could not be matched.
    Invalid,
}

impl Outcome {
    /// Placeholders and invalid readings both need attention.
    pub fn is_failure(self) -> bool {
        !matches!(self, Self::Valid)
    }
}

/// Where an annotation was found.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    pub file: String,
    pub id: String,
}

/// The outcome for one annotation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MatchResult {
    pub outcome: Outcome,
    #[serde(flatten)]
    pub location: Location,
    pub text: String,
    pub reading: String,
    /// Byte offset of the annotation in the sentence.
    pub position: usize,
    pub sentence: String,
}

/// Classifies annotation readings against the dictionaries.
#[derive(Debug, Clone)]
pub struct Validator<'d> {
    dictionaries: &'d Dictionaries,
    matcher: CompoundMatcher<'d>,
    placeholder: String,
}

impl<'d> Validator<'d> {
    pub fn new(dictionaries: &'d Dictionaries) -> Self {
        Self {
            dictionaries,
            matcher: CompoundMatcher::new(dictionaries),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Classifies the reading given for the text.
    pub fn classify(&self, text: &str, reading: &str) -> Outcome {
        if reading == self.placeholder {
            return Outcome::Placeholder;
        }
        let reading = utils::normalize_reading(reading);

        if utils::is_single_symbol(text) {
            // a compound entry can also list extra readings for a single kanji
            if self.dictionaries.symbols.has_reading(text, &reading)
                || self.dictionaries.compounds.has_reading(text, &reading)
            {
                return Outcome::Valid;
            }
            tracing::debug!("{text}: {reading} is not a known reading");
            return Outcome::Invalid;
        }

        if self.dictionaries.compounds.has_reading(text, &reading) {
            return Outcome::Valid;
        }
        match self.matcher.decompose(text, &reading) {
            Some(decomposition) => {
                if decomposition.uses_rendaku() {
                    tracing::debug!("{text}: {reading} decomposes with rendaku as {decomposition}");
                } else {
                    tracing::debug!("{text}: {reading} decomposes as {decomposition}");
                }
                Outcome::Valid
            }
            None => {
                tracing::debug!("{text}: {reading} does not decompose into kanji readings");
                Outcome::Invalid
            }
        }
    }

    /// Classifies every annotation in the sentence.
    pub fn validate_sentence(&self, location: &Location, sentence: &str) -> Vec<MatchResult> {
        annotations(sentence)
            .map(|annotation| MatchResult {
                outcome: self.classify(annotation.text, annotation.reading),
                location: location.clone(),
                text: annotation.text.to_string(),
                reading: annotation.reading.to_string(),
                position: annotation.position,
                sentence: sentence.to_string(),
            })
            .collect()
    }

    pub fn validate_question_set(&self, set: &QuestionSet) -> Vec<MatchResult> {
        let mut results = vec![];
        for question in &set.questions {
            let location = Location {
                file: set.name.clone(),
                id: question.id.clone(),
            };
            results.extend(self.validate_sentence(&location, &question.sentence));
        }
        let failures = results.iter().filter(|r| r.outcome.is_failure()).count();
        if failures == 0 {
            tracing::info!("{}: all {} readings valid", set.name, results.len());
        } else {
            tracing::info!(
                "{}: {failures} of {} readings need attention",
                set.name,
                results.len()
            );
        }
        results
    }

    /// Validates the sets in parallel. The results keep the order of the sets.
    pub fn validate_all(&self, sets: &[QuestionSet]) -> Vec<MatchResult> {
        sets.par_iter()
            .map(|set| self.validate_question_set(set))
            .collect::<Vec<_>>()
            .concat()
    }
}
