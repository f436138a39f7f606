// File: src/core/graph.rs
use crate::core::decomposer::Decomposer;
use crate::core::depth::DepthCalculator;
use crate::core::types::{LexicalUnit, WordId};
use crate::error::GraphError;
use crate::tables::LexiconTables;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// The closed prerequisite graph: every dictionary word plus every component
/// any of them decomposes into.
///
/// Built once per run and read-only afterwards. Keys are sorted so that child
/// sets, and everything the sequencer derives from them, come out in a fixed
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGraph {
    units: BTreeMap<WordId, LexicalUnit>,
}

impl WordGraph {
    pub fn build(tables: &LexiconTables) -> Result<Self, GraphError> {
        let decomposer = Decomposer::new(tables);
        let mut units = BTreeMap::new();
        let mut placeholders: BTreeMap<WordId, LexicalUnit> = BTreeMap::new();

        for (word, entry) in &tables.dictionary {
            let parents = decomposer.decompose(word);

            // Components the dictionary never defines still need a node.
            for parent in &parents {
                if !tables.is_defined(parent) && !placeholders.contains_key(parent) {
                    placeholders.insert(
                        parent.clone(),
                        LexicalUnit::placeholder(
                            parent,
                            tables.frequency(parent),
                            tables.stroke_cost(parent),
                        ),
                    );
                }
            }

            units.insert(
                word.clone(),
                LexicalUnit {
                    word: word.clone(),
                    frequency: tables.frequency(word),
                    strokes: tables.stroke_cost(word),
                    depth: 0,
                    in_dictionary: true,
                    definition: entry.definition.clone(),
                    pronunciation: Some(entry.pronunciation.clone()).filter(|p| !p.is_empty()),
                    parents,
                    children: BTreeSet::new(),
                },
            );
        }

        let placeholder_count = placeholders.len();
        units.extend(placeholders);

        let mut graph = Self { units };
        graph.link_children();
        graph.attach_depths()?;

        info!(
            units = graph.len(),
            placeholders = placeholder_count,
            max_depth = graph.iter().map(|u| u.depth).max().unwrap_or(0),
            "word graph built"
        );
        Ok(graph)
    }

    /// Mirrors every parent link as a child link on the parent.
    fn link_children(&mut self) {
        let links: Vec<(WordId, WordId)> = self
            .units
            .values()
            .flat_map(|unit| {
                unit.parents
                    .iter()
                    .map(move |parent| (parent.clone(), unit.word.clone()))
            })
            .collect();

        for (parent, child) in links {
            self.units
                .entry(parent)
                .or_insert_with_key(|key| LexicalUnit::placeholder(key, 0, 0))
                .children
                .insert(child);
        }
    }

    /// Depths can only be computed once every link is in place.
    fn attach_depths(&mut self) -> Result<(), GraphError> {
        let depths = DepthCalculator::new(self).compute_all()?;
        for (word, depth) in depths {
            if let Some(unit) = self.units.get_mut(&word) {
                unit.depth = depth;
            }
        }
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<&LexicalUnit> {
        self.units.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.units.contains_key(word)
    }

    /// 0 for identifiers outside the graph.
    pub fn frequency(&self, word: &str) -> u64 {
        self.get(word).map_or(0, |unit| unit.frequency)
    }

    pub fn parents(&self, word: &str) -> &[WordId] {
        self.get(word)
            .map(|unit| unit.parents.as_slice())
            .unwrap_or(&[])
    }

    pub fn children(&self, word: &str) -> impl Iterator<Item = &WordId> {
        self.get(word).into_iter().flat_map(|unit| unit.children.iter())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LexicalUnit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DictEntry;

    fn entry(pronunciation: &str, definition: &str) -> DictEntry {
        DictEntry {
            traditional: String::new(),
            pronunciation: pronunciation.to_string(),
            definition: definition.to_string(),
        }
    }

    fn sample_tables() -> LexiconTables {
        let mut tables = LexiconTables::default();
        for word in ["好", "人", "好人", "女"] {
            tables.dictionary.insert(word.into(), entry("hao3", "good"));
        }
        tables.frequencies.insert("好".into(), 900);
        tables.frequencies.insert("子".into(), 40);
        tables.strokes.insert("好".into(), 6);
        tables.strokes.insert("人".into(), 2);
        tables.strokes.insert("子".into(), 3);
        tables
            .primary_origins
            .insert("好".into(), vec!["女".into(), "子".into(), "好".into()]);
        tables
    }

    #[test]
    fn dictionary_words_carry_metadata() {
        let g = WordGraph::build(&sample_tables()).unwrap();
        let unit = g.get("好人").unwrap();
        assert_eq!(unit.strokes, 8);
        assert_eq!(unit.frequency, 0);
        assert_eq!(unit.parents, ["好", "人"]);
        assert_eq!(unit.definition, "good");
        assert_eq!(unit.pronunciation.as_deref(), Some("hao3"));
        assert_eq!(unit.depth, 2);
        assert!(!unit.is_placeholder());
    }

    #[test]
    fn undefined_components_become_placeholders() {
        let g = WordGraph::build(&sample_tables()).unwrap();
        let zi = g.get("子").unwrap();
        assert!(zi.is_placeholder());
        assert_eq!(zi.frequency, 40);
        assert_eq!(zi.strokes, 3);
        assert!(zi.parents.is_empty());
        assert!(zi.definition.is_empty());
        assert_eq!(zi.depth, 0);
        assert_eq!(g.len(), 5);
    }

    #[test]
    fn links_are_symmetric_and_never_self_referential() {
        let g = WordGraph::build(&sample_tables()).unwrap();
        for unit in g.iter() {
            assert!(!unit.parents.contains(&unit.word));
            for parent in &unit.parents {
                assert!(g.get(parent).unwrap().children.contains(&unit.word));
            }
            for child in &unit.children {
                assert!(g.parents(child).contains(&unit.word));
            }
        }
        let children: Vec<_> = g.children("好").collect();
        assert_eq!(children, ["好人"]);
    }

    #[test]
    fn lookups_outside_the_graph_are_empty() {
        let g = WordGraph::build(&sample_tables()).unwrap();
        assert_eq!(g.frequency("狗"), 0);
        assert!(g.parents("狗").is_empty());
        assert_eq!(g.children("狗").count(), 0);
        assert!(!g.contains("狗"));
    }
}
