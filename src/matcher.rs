use crate::{dictionary::Dictionaries, rendaku, utils};
use std::{collections::HashSet, fmt::Display};

/// A way to split a compound's reading between its kanji.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decomposition<'a> {
    pub parts: Vec<Part<'a>>,
}

impl Decomposition<'_> {
    /// Checks whether any part needed rendaku to match.
    pub fn uses_rendaku(&self) -> bool {
        self.parts.iter().any(|p| p.voiced)
    }
}

/// Prints the compound with its readings using HTML ruby tags.
impl Display for Decomposition<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<ruby>")?;
        for part in &self.parts {
            write!(f, "{}<rt>{}</rt>", part.symbol, part.reading)?;
        }
        write!(f, "</ruby>")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Part<'a> {
    /// A single kanji of the compound.
    pub symbol: &'a str,
    /// The slice of the compound's reading assigned to the kanji.
    pub reading: &'a str,
    /// Whether the reading is a rendaku form of a dictionary reading.
    pub voiced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    reading: String,
    voiced: bool,
}

/// Splits compound readings into per-kanji readings from the dictionary.
#[derive(Debug, Clone, Copy)]
pub struct CompoundMatcher<'d> {
    dictionaries: &'d Dictionaries,
}

impl<'d> CompoundMatcher<'d> {
    pub fn new(dictionaries: &'d Dictionaries) -> Self {
        Self { dictionaries }
    }

    /// Checks whether the reading is a concatenation of readings of the text's kanji.
    pub fn matches(&self, text: &str, reading: &str) -> bool {
        self.decompose(text, reading).is_some()
    }

    /// Returns the first way found to assign the reading to the text's kanji, if any.
    /// The first kanji must use one of its readings as is, the following ones may also use
    /// a rendaku form.
    pub fn decompose<'a>(&self, text: &'a str, reading: &'a str) -> Option<Decomposition<'a>> {
        let symbols = utils::symbols(text).collect::<Vec<_>>();
        if symbols.is_empty() {
            return None;
        }
        let candidates = self.candidates(&symbols);
        let mut search = Search {
            symbols: &symbols,
            candidates: &candidates,
            reading,
            failed: HashSet::new(),
            parts: Vec::with_capacity(symbols.len()),
        };
        if search.run(0, 0) {
            Some(Decomposition {
                parts: search.parts,
            })
        } else {
            None
        }
    }

    fn candidates(&self, symbols: &[&str]) -> Vec<Vec<Candidate>> {
        let mut all_candidates = Vec::with_capacity(symbols.len());
        for (index, &symbol) in symbols.iter().enumerate() {
            let mut readings = self.dictionaries.lookup_symbol(symbol);
            // 々 reads like the kanji it repeats unless it has readings of its own
            if readings.is_empty() && symbol == utils::ITERATION_MARK && index > 0 {
                readings = self.dictionaries.lookup_symbol(symbols[index - 1]);
            }

            let mut candidates: Vec<Candidate> = readings
                .iter()
                .map(|r| Candidate {
                    reading: r.clone(),
                    voiced: false,
                })
                .collect();
            if index > 0 {
                for variant in rendaku::expand_all(readings) {
                    if !candidates.iter().any(|c| c.reading == variant) {
                        candidates.push(Candidate {
                            reading: variant,
                            voiced: true,
                        });
                    }
                }
            }
            all_candidates.push(candidates);
        }
        all_candidates
    }
}

struct Search<'a, 'c> {
    symbols: &'c [&'a str],
    candidates: &'c [Vec<Candidate>],
    reading: &'a str,
    // (symbol index, reading offset) pairs known to have no valid continuation
    failed: HashSet<(usize, usize)>,
    parts: Vec<Part<'a>>,
}

impl<'a> Search<'a, '_> {
    fn run(&mut self, index: usize, offset: usize) -> bool {
        if index == self.symbols.len() {
            return offset == self.reading.len();
        }
        if self.failed.contains(&(index, offset)) {
            return false;
        }

        let candidates = self.candidates;
        let reading = self.reading;
        let reading_rest = &reading[offset..];
        for candidate in &candidates[index] {
            if !reading_rest.starts_with(candidate.reading.as_str()) {
                continue;
            }
            let end = offset + candidate.reading.len();
            self.parts.push(Part {
                symbol: self.symbols[index],
                reading: &reading[offset..end],
                voiced: candidate.voiced,
            });
            if self.run(index + 1, end) {
                return true;
            }
            self.parts.pop();
        }

        self.failed.insert((index, offset));
        false
    }
}
