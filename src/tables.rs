// File: src/tables.rs
use crate::config::{DataFiles, OriginPolicy};
use crate::core::types::DictEntry;
use crate::error::{Result, SequencerError};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// The immutable raw inputs of a run. Everything downstream borrows these.
#[derive(Debug, Clone, Default)]
pub struct LexiconTables {
    /// Sorted so that graph construction visits words in a fixed order.
    pub dictionary: BTreeMap<String, DictEntry>,
    pub frequencies: HashMap<String, u64>,
    pub strokes: HashMap<String, u32>,
    pub primary_origins: HashMap<String, Vec<String>>,
    /// Only populated under `OriginPolicy::PrimaryThenSecondary`.
    pub secondary_origins: Option<HashMap<String, Vec<String>>>,
}

impl LexiconTables {
    /// Reads every table named in `files`. The secondary origin table is only
    /// touched when the policy asks for it.
    pub fn load(files: &DataFiles, policy: OriginPolicy) -> Result<Self> {
        let tables = Self {
            dictionary: read_json(&files.dictionary)?,
            frequencies: read_json(&files.frequency)?,
            strokes: read_json(&files.strokes)?,
            primary_origins: read_json(&files.primary_origins)?,
            secondary_origins: match policy {
                OriginPolicy::Primary => None,
                OriginPolicy::PrimaryThenSecondary => Some(read_json(&files.secondary_origins)?),
            },
        };

        info!(
            dictionary = tables.dictionary.len(),
            frequencies = tables.frequencies.len(),
            strokes = tables.strokes.len(),
            origins = tables.primary_origins.len(),
            "lexicon tables loaded"
        );
        Ok(tables)
    }

    pub fn is_defined(&self, word: &str) -> bool {
        self.dictionary.contains_key(word)
    }

    /// Usage count, 0 when the word is not listed.
    pub fn frequency(&self, word: &str) -> u64 {
        self.frequencies.get(word).copied().unwrap_or(0)
    }

    /// Sum of the stroke counts of every unit in `word`; unlisted units cost 0.
    pub fn stroke_cost(&self, word: &str) -> u32 {
        let mut buf = [0u8; 4];
        word.chars()
            .map(|c| self.strokes.get(&*c.encode_utf8(&mut buf)).copied().unwrap_or(0))
            .sum()
    }

    /// Roots registered for a single unit. The secondary table is a fallback
    /// for units the primary one does not list.
    pub fn roots(&self, unit: &str) -> &[String] {
        if let Some(roots) = self.primary_origins.get(unit) {
            return roots;
        }
        self.secondary_origins
            .as_ref()
            .and_then(|table| table.get(unit))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Deserializes a JSON file, attaching the path to any failure.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| SequencerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| SequencerError::Json {
        path: path.to_path_buf(),
        source,
    })
}
