// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or annotating the word graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A unit transitively lists itself as a prerequisite.
    #[error("cyclic decomposition detected at '{word}'")]
    Cycle { word: String },
}

/// The primary error type for a sequencing run.
#[derive(Debug, Error)]
pub enum SequencerError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table or config file exists but is not the JSON shape we expect.
    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("graph cache error: {0}")]
    Cache(#[from] bincode::Error),

    #[error("could not write graph cache {}: {source}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A convenience `Result` alias using the crate's `SequencerError`.
pub type Result<T> = std::result::Result<T, SequencerError>;
