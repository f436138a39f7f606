// src/core/mod.rs

pub mod decomposer;
pub mod depth;
pub mod engine;
pub mod graph;
pub mod sequencer;
pub mod types;
