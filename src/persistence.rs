// File: src/persistence.rs
use crate::config::{DataFiles, OriginPolicy};
use crate::core::graph::WordGraph;
use crate::error::{Result, SequencerError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;

/// Size and modification time of one input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SourceStamp {
    path: PathBuf,
    len: u64,
    modified_nanos: u64,
}

/// Identifies the inputs a cached graph was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    policy: OriginPolicy,
    sources: Vec<SourceStamp>,
}

impl Fingerprint {
    pub fn of(files: &DataFiles, policy: OriginPolicy) -> Result<Self> {
        let sources = files
            .graph_inputs(policy)
            .into_iter()
            .map(|path| -> Result<SourceStamp> {
                let meta = fs::metadata(path).map_err(|source| SequencerError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let modified_nanos = meta.modified().map_or(0, nanos_since_epoch);
                Ok(SourceStamp {
                    path: path.to_path_buf(),
                    len: meta.len(),
                    modified_nanos,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { policy, sources })
    }
}

/// Saturates instead of wrapping for times past the u64 nanosecond range.
fn nanos_since_epoch(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
}

#[derive(Serialize)]
struct CachedGraphRef<'a> {
    fingerprint: &'a Fingerprint,
    graph: &'a WordGraph,
}

#[derive(Deserialize)]
struct CachedGraph {
    fingerprint: Fingerprint,
    graph: WordGraph,
}

/// Writes the graph atomically: a crash mid-write never leaves a torn cache.
pub fn save_graph(graph: &WordGraph, fingerprint: &Fingerprint, path: &Path) -> Result<()> {
    let parent_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let write_error = |source: std::io::Error| SequencerError::CacheWrite {
        path: path.to_path_buf(),
        source,
    };
    fs::create_dir_all(parent_dir).map_err(write_error)?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(write_error)?;
    let mut writer = BufWriter::new(&temp_file);
    bincode::serialize_into(&mut writer, &CachedGraphRef { fingerprint, graph })?;
    writer.flush().map_err(write_error)?;
    drop(writer);

    temp_file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Returns the cached graph if it exists and was built from the same inputs.
pub fn load_graph(path: &Path, expected: &Fingerprint) -> Result<Option<WordGraph>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SequencerError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let cached: CachedGraph = bincode::deserialize_from(BufReader::new(file))?;
    Ok((cached.fingerprint == *expected).then_some(cached.graph))
}
