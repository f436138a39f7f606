// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod tables;
pub mod wordlist;

pub use crate::config::{OriginPolicy, RepeatPolicy, SequencerConfig};
pub use crate::core::engine::{SequencerEngine, StagePlan, StudyPlan};
pub use crate::core::graph::WordGraph;
pub use crate::core::sequencer::{OrderingState, Sequencer};
pub use crate::error::{GraphError, Result, SequencerError};
pub use crate::wordlist::WordList;
