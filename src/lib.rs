#![doc = include_str!("../README.md")]

mod annotation;
mod config;
mod dictionary;
mod error;
mod matcher;
pub mod question;
mod rendaku;
mod report;
mod utils;
mod validator;

pub use self::annotation::{annotations, Annotation, Annotations};
pub use self::config::Config;
pub use self::dictionary::{Dictionaries, ReadingTable};
pub use self::error::{Error, Result};
pub use self::matcher::{CompoundMatcher, Decomposition, Part};
pub use self::question::{Question, QuestionSet};
pub use self::rendaku::{expand as rendaku_expand, RENDAKU_TABLE};
pub use self::report::{
    Failure, FailureGroup, FileSummary, KanjiSuggestion, Suggestions, ValidationReport,
};
pub use self::validator::{Location, MatchResult, Outcome, Validator, DEFAULT_PLACEHOLDER};

/// Validates every annotation of the question sets and aggregates the results.
pub fn validate(sets: &[QuestionSet], dictionaries: &Dictionaries) -> ValidationReport {
    let results = Validator::new(dictionaries).validate_all(sets);
    ValidationReport::build(&results, dictionaries)
}
