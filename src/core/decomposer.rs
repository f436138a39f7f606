// File: src/core/decomposer.rs
use crate::core::types::WordId;
use crate::tables::LexiconTables;

/// Splits a word into its direct components ("parents").
///
/// Single units are looked up in the origin tables; longer words are segmented
/// greedily against the dictionary. Pure: the same word against the same
/// tables always yields the same list.
#[derive(Clone, Copy)]
pub struct Decomposer<'a> {
    tables: &'a LexiconTables,
}

impl<'a> Decomposer<'a> {
    pub fn new(tables: &'a LexiconTables) -> Self {
        Self { tables }
    }

    /// Direct parents of `word`, never including `word` itself.
    pub fn decompose(&self, word: &str) -> Vec<WordId> {
        let mut units = word.chars();
        let parts = match (units.next(), units.next()) {
            (None, _) => Vec::new(),
            // Origin tables occasionally list a unit as its own root.
            (Some(_), None) => self.tables.roots(word).to_vec(),
            (Some(_), Some(_)) => self.segment(word),
        };
        parts.into_iter().filter(|part| part != word).collect()
    }

    /// Cuts `word` into dictionary-defined prefixes, left to right.
    fn segment(&self, word: &str) -> Vec<WordId> {
        let mut parts = Vec::new();
        let mut rest = word;
        while !rest.is_empty() {
            let split = self.longest_prefix(rest);
            parts.push(rest[..split].to_string());
            rest = &rest[split..];
        }
        parts
    }

    /// Byte length of the longest proper prefix of `word` that the dictionary
    /// defines, or of its first unit when none is.
    fn longest_prefix(&self, word: &str) -> usize {
        let first = word.chars().next().map_or(0, char::len_utf8);
        word.char_indices()
            .skip(1)
            .map(|(end, _)| end)
            .filter(|&end| self.tables.is_defined(&word[..end]))
            .last()
            .unwrap_or(first)
    }
}
