//! Reading dictionaries: valid readings per kanji and per compound word.

use crate::{
    error::{Error, Result},
    utils,
};
use std::{collections::HashMap, fs, path::Path};

/// Maps a key to its valid readings. The order of the readings is kept as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingTable {
    entries: HashMap<String, Vec<String>>,
}

impl ReadingTable {
    /// Returns the readings for the key, or an empty slice if there are none.
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Checks whether the (normalized) reading is one of the key's readings.
    pub fn has_reading(&self, key: &str, reading: &str) -> bool {
        self.get(key).iter().any(|r| r == reading)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // normalizes the readings and removes duplicates, keeping the first occurrence
    fn insert(&mut self, key: String, readings: Vec<String>) {
        let mut normalized: Vec<String> = Vec::with_capacity(readings.len());
        for reading in readings {
            let reading = utils::normalize_reading(&reading);
            if !normalized.contains(&reading) {
                normalized.push(reading);
            }
        }
        self.entries.insert(key, normalized);
    }
}

/// The dictionaries consulted during validation. Built once and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionaries {
    /// Single kanji to readings.
    pub symbols: ReadingTable,
    /// Whole words to readings. Overrides the decomposition of a word into its kanji.
    pub compounds: ReadingTable,
}

impl Dictionaries {
    /// Builds the dictionaries from in-memory tables, checking the same invariants as loading does.
    pub fn from_maps(
        symbols: HashMap<String, Vec<String>>,
        compounds: HashMap<String, Vec<String>>,
    ) -> Result<Self> {
        Ok(Self {
            symbols: symbol_table(symbols, Path::new("<symbols>"))?,
            compounds: compound_table(compounds, Path::new("<compounds>"))?,
        })
    }

    /// Loads the kanji dictionary and, if a path is given, the compound dictionary.
    pub fn load(symbols_path: &Path, compounds_path: Option<&Path>) -> Result<Self> {
        let symbols = symbol_table(read_map(symbols_path)?, symbols_path)?;
        tracing::info!(
            "loaded {} kanji readings from {}",
            symbols.len(),
            symbols_path.display()
        );

        let compounds = match compounds_path {
            Some(path) => {
                let compounds = compound_table(read_map(path)?, path)?;
                tracing::info!(
                    "loaded {} compound word readings from {}",
                    compounds.len(),
                    path.display()
                );
                compounds
            }
            None => {
                tracing::info!("no compound dictionary configured");
                ReadingTable::default()
            }
        };

        Ok(Self { symbols, compounds })
    }

    pub fn lookup_symbol(&self, symbol: &str) -> &[String] {
        self.symbols.get(symbol)
    }

    pub fn lookup_compound(&self, text: &str) -> &[String] {
        self.compounds.get(text)
    }
}

fn read_map(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| Error::json(path, e))
}

fn symbol_table(map: HashMap<String, Vec<String>>, path: &Path) -> Result<ReadingTable> {
    let mut table = ReadingTable::default();
    for (symbol, readings) in map {
        if !utils::is_single_symbol(&symbol) {
            return Err(Error::malformed(
                path,
                format!("key \"{symbol}\" is not a single character"),
            ));
        }
        if readings.is_empty() {
            return Err(Error::malformed(
                path,
                format!("no readings listed for \"{symbol}\""),
            ));
        }
        table.insert(symbol, readings);
    }
    Ok(table)
}

fn compound_table(map: HashMap<String, Vec<String>>, path: &Path) -> Result<ReadingTable> {
    let mut table = ReadingTable::default();
    for (text, readings) in map {
        if text.is_empty() {
            return Err(Error::malformed(path, "empty key"));
        }
        if readings.is_empty() {
            return Err(Error::malformed(
                path,
                format!("no readings listed for \"{text}\""),
            ));
        }
        table.insert(text, readings);
    }
    Ok(table)
}
