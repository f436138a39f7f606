// File: src/core/sequencer.rs
use crate::config::RepeatPolicy;
use crate::core::graph::WordGraph;
use crate::core::types::WordId;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Mutable ordering state threaded through one study plan.
///
/// `known` holds everything the learner already has or has been scheduled,
/// and is marked eagerly before recursing. `pending` is the subset that is
/// marked but not yet emitted (the current recursion path). `emitted` tracks
/// the plan output for de-duplication across targets and stages.
#[derive(Debug, Clone, Default)]
pub struct OrderingState {
    known: HashSet<WordId>,
    pending: HashSet<WordId>,
    emitted: HashSet<WordId>,
}

impl OrderingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<WordId>,
    {
        Self {
            known: words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.known.contains(word)
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    fn begin(&mut self, word: &str) {
        self.known.insert(word.to_string());
        self.pending.insert(word.to_string());
    }

    fn finish(&mut self, word: &str) {
        self.pending.remove(word);
    }
}

/// Walks the word graph from each target toward its roots and emits a study
/// order in which every unit follows its prerequisites.
pub struct Sequencer<'g> {
    graph: &'g WordGraph,
    expansion: usize,
    repeat_policy: RepeatPolicy,
}

impl<'g> Sequencer<'g> {
    pub fn new(graph: &'g WordGraph, expansion: usize) -> Self {
        Self {
            graph,
            expansion,
            repeat_policy: RepeatPolicy::default(),
        }
    }

    pub fn with_repeat_policy(mut self, repeat_policy: RepeatPolicy) -> Self {
        self.repeat_policy = repeat_policy;
        self
    }

    /// Schedules `targets`, most frequent first, and returns the flattened
    /// order. Everything emitted is left marked known in `state`.
    pub fn compute_sequence(&self, state: &mut OrderingState, targets: &[WordId]) -> Vec<WordId> {
        let mut ordered: Vec<&WordId> = targets.iter().collect();
        // sort_by_key is stable: equal frequencies keep their list order.
        ordered.sort_by_key(|word| Reverse(self.graph.frequency(word)));

        let mut sequence = Vec::new();
        for target in ordered {
            let mut produced = Vec::new();
            if state.is_known(target) {
                // Nothing beneath a word the learner already has needs teaching.
                produced.push(target.clone());
            } else {
                self.schedule_one(state, target, &mut produced);
            }

            for word in produced {
                let first_time = state.emitted.insert(word.clone());
                if first_time || self.repeat_policy == RepeatPolicy::AllowRepeats {
                    sequence.push(word);
                }
            }
        }
        sequence
    }

    /// Emits the unknown prerequisites of `target` (with sibling
    /// reinforcement for every newly introduced parent), then `target`.
    fn schedule_one(&self, state: &mut OrderingState, target: &str, out: &mut Vec<WordId>) {
        state.begin(target);

        for parent in self.graph.parents(target) {
            if state.is_known(parent) {
                continue;
            }

            // Picked before the parent is scheduled so the split between
            // already-known and new siblings reflects the state on arrival.
            let siblings = self.pick_siblings(state, parent, target);

            self.schedule_one(state, parent, out);
            for sibling in siblings {
                if !state.is_known(sibling) {
                    self.schedule_one(state, sibling, out);
                }
            }
        }

        state.finish(target);
        out.push(target.to_string());
    }

    /// Other children of `parent`: known ones first (free context), then
    /// unknown ones by descending frequency, capped at the expansion factor.
    fn pick_siblings(&self, state: &OrderingState, parent: &str, target: &str) -> Vec<&'g WordId> {
        let (filler, mut unused): (Vec<&'g WordId>, Vec<&'g WordId>) = self
            .graph
            .children(parent)
            .filter(|child| child.as_str() != target)
            .filter(|child| state.is_known(child) || !self.waits_on_pending(state, child))
            .partition(|child| state.is_known(child));

        unused.sort_by_key(|child| Reverse(self.graph.frequency(child)));

        filler
            .into_iter()
            .chain(unused)
            .take(self.expansion)
            .collect()
    }

    /// True when `word` transitively needs a unit that is marked but not yet
    /// emitted; scheduling it now would put it ahead of that prerequisite.
    fn waits_on_pending(&self, state: &OrderingState, word: &str) -> bool {
        let mut stack = vec![word];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            for parent in self.graph.parents(current) {
                if state.pending.contains(parent) {
                    return true;
                }
                if !state.is_known(parent) && seen.insert(parent.as_str()) {
                    stack.push(parent);
                }
            }
        }
        false
    }
}
