//! Invariants of the word graph and the study order over random acyclic lexicons.

use proptest::prelude::*;
use sequencer_core::core::decomposer::Decomposer;
use sequencer_core::core::types::DictEntry;
use sequencer_core::tables::LexiconTables;
use sequencer_core::{OrderingState, Sequencer, WordGraph};
use std::collections::HashSet;

/// Single units are lowercase letters; uppercase letters are undefined roots.
fn unit(i: usize) -> String {
    char::from(b'a' + i as u8).to_string()
}

fn primitive(i: usize) -> String {
    char::from(b'A' + (i % 4) as u8).to_string()
}

#[derive(Debug, Clone)]
struct Lexicon {
    tables: LexiconTables,
    words: Vec<String>,
}

/// Unit `i` may only be built from units `< i` (plus primitives and itself,
/// which decomposition must drop), so the lexicon is always acyclic.
fn lexicon() -> impl Strategy<Value = Lexicon> {
    (
        prop::collection::vec(prop::collection::vec(0usize..64, 0..4), 2..12),
        prop::collection::vec(prop::collection::vec(0usize..64, 2..4), 0..10),
        prop::collection::vec(0u64..50, 32),
    )
        .prop_map(|(raw_roots, raw_compounds, freqs)| {
            let n = raw_roots.len();
            let mut tables = LexiconTables::default();
            let mut words = Vec::new();

            for (i, picks) in raw_roots.iter().enumerate() {
                let word = unit(i);
                let mut roots: Vec<String> = picks
                    .iter()
                    .map(|&p| if i > 0 && p % 3 != 0 { unit(p % i) } else { primitive(p) })
                    .collect();
                if picks.len() == 1 {
                    roots.push(word.clone());
                }
                tables.primary_origins.insert(word.clone(), roots);
                words.push(word);
            }
            for picks in raw_compounds {
                words.push(picks.iter().map(|&p| unit(p % n)).collect());
            }
            for (i, word) in words.iter().enumerate() {
                tables.dictionary.insert(word.clone(), DictEntry::default());
                tables.frequencies.insert(word.clone(), freqs[i % freqs.len()]);
            }
            Lexicon { tables, words }
        })
}

fn targets_from(lexicon: &Lexicon, picks: &[usize]) -> Vec<String> {
    picks
        .iter()
        .map(|&p| lexicon.words[p % lexicon.words.len()].clone())
        .collect()
}

proptest! {
    #[test]
    fn decomposition_is_deterministic_and_never_self_referential(lex in lexicon()) {
        let decomposer = Decomposer::new(&lex.tables);
        for word in &lex.words {
            let parts = decomposer.decompose(word);
            prop_assert_eq!(&parts, &decomposer.decompose(word));
            prop_assert!(!parts.contains(word));
        }
    }

    #[test]
    fn links_are_symmetric(lex in lexicon()) {
        let graph = WordGraph::build(&lex.tables).unwrap();
        for unit in graph.iter() {
            for parent in &unit.parents {
                let parent_unit = graph.get(parent);
                prop_assert!(parent_unit.is_some(), "missing parent {}", parent);
                prop_assert!(parent_unit.unwrap().children.contains(&unit.word));
            }
            for child in &unit.children {
                prop_assert!(graph.parents(child).contains(&unit.word));
            }
        }
    }

    #[test]
    fn depth_is_one_more_than_the_deepest_parent(lex in lexicon()) {
        let graph = WordGraph::build(&lex.tables).unwrap();
        for unit in graph.iter() {
            let expected = unit
                .parents
                .iter()
                .map(|p| graph.get(p).map_or(0, |u| u.depth) + 1)
                .max()
                .unwrap_or(0);
            prop_assert_eq!(unit.depth, expected, "depth of {}", &unit.word);
        }
    }

    #[test]
    fn every_word_follows_its_prerequisites(
        lex in lexicon(),
        picks in prop::collection::vec(0usize..64, 1..6),
        known_picks in prop::collection::vec(0usize..64, 0..4),
        expansion in 0usize..4,
    ) {
        let graph = WordGraph::build(&lex.tables).unwrap();
        let targets = targets_from(&lex, &picks);
        let known = targets_from(&lex, &known_picks);

        let mut state = OrderingState::with_known(known.iter().cloned());
        let sequence = Sequencer::new(&graph, expansion).compute_sequence(&mut state, &targets);

        let initially_known: HashSet<&str> = known.iter().map(String::as_str).collect();
        let mut seen = initially_known.clone();
        let mut emitted = HashSet::new();
        for word in &sequence {
            prop_assert!(emitted.insert(word.as_str()), "{} emitted twice", word);
            if !initially_known.contains(word.as_str()) {
                for parent in graph.parents(word) {
                    prop_assert!(
                        seen.contains(parent.as_str()),
                        "{} before {} in {:?}", word, parent, sequence
                    );
                }
            }
            seen.insert(word.as_str());
        }
        for target in &targets {
            prop_assert!(emitted.contains(target.as_str()));
        }
    }

    #[test]
    fn zero_expansion_emits_exactly_the_prerequisite_closure(
        lex in lexicon(),
        picks in prop::collection::vec(0usize..64, 1..4),
    ) {
        let graph = WordGraph::build(&lex.tables).unwrap();
        let targets = targets_from(&lex, &picks);

        let mut state = OrderingState::new();
        let sequence = Sequencer::new(&graph, 0).compute_sequence(&mut state, &targets);

        let mut closure: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = targets.iter().map(String::as_str).collect();
        while let Some(word) = stack.pop() {
            if closure.insert(word) {
                stack.extend(graph.parents(word).iter().map(String::as_str));
            }
        }
        let emitted: HashSet<&str> = sequence.iter().map(String::as_str).collect();
        prop_assert_eq!(emitted, closure);
    }
}
