//! File formats for grounding-set analysis.
//!
//! Inputs are an incoming adjacency list (a JSON object mapping each word to
//! the words that define it) and grounding-set files (any JSON object with a
//! `grounding_set` array). Results are written as JSON with a one-space
//! indent.
//!
//! # Modules
//!
//! - [`error`]: IoError with read/write/parse failure modes

pub mod error;

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use groundset_core::{AdjacencyList, DanglingWords, DefinitionGraph};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use error::IoError;

/// Grounding-set file. Result files of the greedy builder and the rank
/// search carry extra keys, which are ignored.
#[derive(Debug, Deserialize)]
struct GroundingFile {
    grounding_set: Vec<String>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    let file = File::open(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an incoming adjacency list, keeping its key order.
pub fn load_adjacency(path: impl AsRef<Path>) -> Result<AdjacencyList, IoError> {
    read_json(path.as_ref())
}

/// Reads an adjacency list and builds the definition graph.
pub fn load_graph(path: impl AsRef<Path>, dangling: DanglingWords) -> Result<DefinitionGraph, IoError> {
    let path = path.as_ref();
    let adjacency = load_adjacency(path)?;
    let graph = DefinitionGraph::from_adjacency(&adjacency, dangling)?;
    tracing::info!(
        path = %path.display(),
        nodes = graph.word_count(),
        edges = graph.edge_count(),
        "loaded definition graph"
    );
    Ok(graph)
}

/// Reads the `grounding_set` word list of a grounding-set file.
pub fn load_grounding_file(path: impl AsRef<Path>) -> Result<Vec<String>, IoError> {
    let file: GroundingFile = read_json(path.as_ref())?;
    Ok(file.grounding_set)
}

/// Serializes `value` as JSON with a one-space indent.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes `value` to `path` as JSON, creating parent directories.
pub fn save_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<(), IoError> {
    let path = path.as_ref();
    let json = to_json_string(value).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json).map_err(write_err)?;
    tracing::info!(path = %path.display(), "saved results");
    Ok(())
}
