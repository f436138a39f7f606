// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A lexical unit is identified by its own text.
pub type WordId = String;

/// One dictionary line: traditional form, pronunciation and definition.
/// Every field may be missing in the source table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    #[serde(rename = "t", default)]
    pub traditional: String,
    #[serde(rename = "p", default)]
    pub pronunciation: String,
    #[serde(rename = "d", default)]
    pub definition: String,
}

/// Rich metadata associated with a single node of the word graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalUnit {
    pub word: WordId,
    /// Usage count from the frequency table, 0 when unlisted.
    pub frequency: u64,
    /// Sum of the per-unit stroke counts.
    pub strokes: u32,
    /// Longest prerequisite chain beneath this unit.
    pub depth: usize,
    /// False for placeholders.
    pub in_dictionary: bool,
    /// Empty for placeholders.
    pub definition: String,
    pub pronunciation: Option<String>,
    /// Direct components, in decomposition order.
    pub parents: Vec<WordId>,
    /// Units that list this one as a parent.
    pub children: BTreeSet<WordId>,
}

impl LexicalUnit {
    /// A unit that only exists because something decomposes into it.
    pub fn placeholder(word: &str, frequency: u64, strokes: u32) -> Self {
        Self {
            word: word.to_string(),
            frequency,
            strokes,
            depth: 0,
            in_dictionary: false,
            definition: String::new(),
            pronunciation: None,
            parents: Vec::new(),
            children: BTreeSet::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        !self.in_dictionary
    }
}
