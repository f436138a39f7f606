use crate::config::SequencerConfig;
use crate::core::graph::WordGraph;
use crate::core::sequencer::{OrderingState, Sequencer};
use crate::core::types::WordId;
use crate::error::Result;
use crate::persistence::{load_graph, save_graph, Fingerprint};
use crate::tables::LexiconTables;
use crate::wordlist::WordList;
use tracing::{debug, info, warn};

/// The scheduled words of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePlan {
    pub name: String,
    /// Number of target words the stage asked for.
    pub targets: usize,
    pub words: Vec<WordId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyPlan {
    pub stages: Vec<StagePlan>,
}

impl StudyPlan {
    /// The flat card order, stage after stage.
    pub fn words(&self) -> impl Iterator<Item = &WordId> {
        self.stages.iter().flat_map(|stage| stage.words.iter())
    }

    pub fn len(&self) -> usize {
        self.stages.iter().map(|stage| stage.words.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// The engine owns the annotated graph; each plan gets its own ordering state.
pub struct SequencerEngine {
    graph: WordGraph,
    config: SequencerConfig,
}

impl SequencerEngine {
    pub fn new(graph: WordGraph, config: SequencerConfig) -> Self {
        Self { graph, config }
    }

    pub fn from_tables(tables: &LexiconTables, config: SequencerConfig) -> Result<Self> {
        let graph = WordGraph::build(tables)?;
        Ok(Self::new(graph, config))
    }

    /// Loads the tables named in `config` and builds the graph, going through
    /// the on-disk cache when one is configured.
    pub fn load(config: SequencerConfig) -> Result<Self> {
        let Some(cache_path) = config.graph_cache.clone() else {
            let tables = LexiconTables::load(&config.data, config.origin_policy)?;
            return Self::from_tables(&tables, config);
        };

        let fingerprint = Fingerprint::of(&config.data, config.origin_policy)?;
        match load_graph(&cache_path, &fingerprint) {
            Ok(Some(graph)) => {
                info!(path = %cache_path.display(), units = graph.len(), "word graph loaded from cache");
                return Ok(Self::new(graph, config));
            }
            Ok(None) => debug!(path = %cache_path.display(), "graph cache missing or stale"),
            Err(e) => warn!(path = %cache_path.display(), error = %e, "ignoring unreadable graph cache"),
        }

        let tables = LexiconTables::load(&config.data, config.origin_policy)?;
        let engine = Self::from_tables(&tables, config)?;
        save_graph(&engine.graph, &fingerprint, &cache_path)?;
        info!(path = %cache_path.display(), "graph cache written");
        Ok(engine)
    }

    pub fn graph(&self) -> &WordGraph {
        &self.graph
    }

    /// Schedules every target stage in order. Words from `known` and
    /// everything scheduled by earlier stages count as known for later ones.
    pub fn plan(&self, known: &WordList, targets: &WordList) -> StudyPlan {
        let mut state = OrderingState::with_known(known.all_words().cloned());
        let sequencer = Sequencer::new(&self.graph, self.config.expansion)
            .with_repeat_policy(self.config.repeat_policy);

        let mut plan = StudyPlan::default();
        for stage in &targets.stages {
            let targets = stage.words();
            for missing in targets.iter().filter(|word| !self.graph.contains(word)) {
                warn!(word = %missing, stage = %stage.name, "target is not in the word graph");
            }
            let words = sequencer.compute_sequence(&mut state, &targets);
            debug!(
                stage = %stage.name,
                targets = targets.len(),
                scheduled = words.len(),
                known = state.known_count(),
                "stage scheduled"
            );
            plan.stages.push(StagePlan {
                name: stage.name.clone(),
                targets: targets.len(),
                words,
            });
        }

        info!(stages = plan.stages.len(), cards = plan.len(), "study plan computed");
        plan
    }
}
