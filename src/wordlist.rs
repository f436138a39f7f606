// File: src/wordlist.rs
use crate::core::types::WordId;
use crate::error::{Result, SequencerError};
use std::fs;
use std::path::Path;

const STAGE_MARKER: &str = "//";

/// One word of a study list with its free-text ordering note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub word: WordId,
    pub note: String,
}

/// A named batch of target words, processed as one unit of the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    pub name: String,
    pub entries: Vec<ListEntry>,
}

impl Stage {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn words(&self) -> Vec<WordId> {
        self.entries.iter().map(|entry| entry.word.clone()).collect()
    }
}

/// Ordered stages parsed from one or more list files.
///
/// A line starting with `//` opens a stage named by the rest of the line.
/// Other non-empty lines are `word` or `word<TAB>note`. Lines before the first
/// marker form an unnamed stage; stages without words are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    pub stages: Vec<Stage>,
}

impl WordList {
    pub fn parse(input: &str) -> Self {
        let mut list = Self::default();
        list.append(input);
        list
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let mut list = Self::default();
        list.append_file(path)?;
        Ok(list)
    }

    /// Appends the stages of another list file after the current ones.
    pub fn append_file(&mut self, path: &Path) -> Result<()> {
        let input = fs::read_to_string(path).map_err(|source| SequencerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.append(&input);
        Ok(())
    }

    pub fn append(&mut self, input: &str) {
        let mut current = Stage::default();
        for line in input.lines() {
            let line = line.trim_end_matches('\r');
            if let Some(name) = line.strip_prefix(STAGE_MARKER) {
                self.push_stage(std::mem::replace(&mut current, Stage::named(name.trim())));
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            let (word, note) = line.split_once('\t').unwrap_or((line, ""));
            let word = word.trim();
            if word.is_empty() {
                continue;
            }
            current.entries.push(ListEntry {
                word: word.to_string(),
                note: note.to_string(),
            });
        }
        self.push_stage(current);
    }

    fn push_stage(&mut self, stage: Stage) {
        if !stage.entries.is_empty() {
            self.stages.push(stage);
        }
    }

    /// Every word of every stage, in list order.
    pub fn all_words(&self) -> impl Iterator<Item = &WordId> {
        self.stages
            .iter()
            .flat_map(|stage| stage.entries.iter().map(|entry| &entry.word))
    }
}
