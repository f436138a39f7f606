// File: src/config.rs
use crate::error::Result;
use crate::tables::read_json;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_EXPANSION: usize = 3;

/// Locations of the raw lexicon tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub dictionary: PathBuf,
    pub frequency: PathBuf,
    pub strokes: PathBuf,
    pub primary_origins: PathBuf,
    pub secondary_origins: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::in_dir(Path::new("data"))
    }
}

impl DataFiles {
    /// The standard file names, rooted at `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dictionary: dir.join("cccedict.json"),
            frequency: dir.join("blcu.json"),
            strokes: dir.join("char_strokes.json"),
            primary_origins: dir.join("outlier_decomp.json"),
            secondary_origins: dir.join("heisig_decomp.json"),
        }
    }

    /// Every path that feeds graph construction under `policy`.
    pub fn graph_inputs(&self, policy: OriginPolicy) -> Vec<&Path> {
        let mut paths = vec![
            self.dictionary.as_path(),
            self.frequency.as_path(),
            self.strokes.as_path(),
            self.primary_origins.as_path(),
        ];
        if policy == OriginPolicy::PrimaryThenSecondary {
            paths.push(self.secondary_origins.as_path());
        }
        paths
    }
}

/// Which origin tables decompose single units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginPolicy {
    #[default]
    Primary,
    /// Falls back to the secondary table. The two tables disagree often enough
    /// that this can produce cycles, which graph construction reports.
    PrimaryThenSecondary,
}

/// Whether an identifier may appear more than once in a study plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    /// Each identifier is emitted at most once across all stages.
    #[default]
    Deduplicate,
    /// Targets are re-emitted whenever they are requested again.
    AllowRepeats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    pub data: DataFiles,
    /// Maximum number of new siblings introduced alongside each new prerequisite.
    pub expansion: usize,
    pub origin_policy: OriginPolicy,
    pub repeat_policy: RepeatPolicy,
    pub graph_cache: Option<PathBuf>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            data: DataFiles::default(),
            expansion: DEFAULT_EXPANSION,
            origin_policy: OriginPolicy::default(),
            repeat_policy: RepeatPolicy::default(),
            graph_cache: None,
        }
    }
}

impl SequencerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: SequencerConfig = serde_json::from_str(
            r#"{"expansion": 1, "repeat_policy": "allow_repeats", "data": {"dictionary": "dict.json"}}"#,
        )
        .unwrap();

        assert_eq!(config.expansion, 1);
        assert_eq!(config.repeat_policy, RepeatPolicy::AllowRepeats);
        assert_eq!(config.origin_policy, OriginPolicy::Primary);
        assert_eq!(config.data.dictionary, PathBuf::from("dict.json"));
        assert_eq!(config.data.frequency, PathBuf::from("data/blcu.json"));
        assert!(config.graph_cache.is_none());
    }

    #[test]
    fn secondary_origins_only_feed_the_graph_when_enabled() {
        let files = DataFiles::in_dir(Path::new("/tables"));
        assert_eq!(files.graph_inputs(OriginPolicy::Primary).len(), 4);

        let inputs = files.graph_inputs(OriginPolicy::PrimaryThenSecondary);
        assert_eq!(inputs.last(), Some(&Path::new("/tables/heisig_decomp.json")));
    }
}
