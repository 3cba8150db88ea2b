//! Wire formats and file helpers.
//!
//! These pick a backend and delegate to [`encode`] / [`decode_into`]; they add
//! no framing of their own.

use crate::codec::{decode_into, encode, BinarySink, BinarySource};
use crate::error::{CodecError, Result};
use crate::graph::{AttributeGraph, AttributedGraph};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Available wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Little-endian binary, see [`crate::codec::binary`]
    Binary,
    /// Ordered JSON object, see `crate::codec::json` (feature `json`)
    Json,
}

impl Format {
    /// Human-readable format name (for logging/debugging).
    pub fn name(self) -> &'static str {
        match self {
            Format::Binary => "binary",
            Format::Json => "json",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Binary => "bin",
            Format::Json => "json",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "bin" => Some(Format::Binary),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for [`save_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOptions {
    /// Format to write; `None` picks it from the file extension, falling
    /// back to binary
    pub format: Option<Format>,
    /// Indent JSON output
    pub pretty_json: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: None,
            pretty_json: true,
        }
    }
}

/// Encode `graph` into `writer` using `format`.
#[cfg_attr(not(feature = "json"), allow(unused_variables))]
pub fn write_graph<G, W>(graph: &G, writer: W, format: Format, pretty_json: bool) -> Result<()>
where
    G: AttributedGraph + ?Sized,
    W: Write,
{
    match format {
        Format::Binary => encode(graph, &mut BinarySink::new(writer)),
        #[cfg(feature = "json")]
        Format::Json => {
            let options = crate::codec::JsonOptions {
                pretty: pretty_json,
            };
            encode(graph, &mut crate::codec::JsonSink::with_options(writer, options))
        }
        #[cfg(not(feature = "json"))]
        Format::Json => Err(json_disabled()),
    }
}

/// Decode a graph from `reader` into a fresh [`AttributeGraph`].
pub fn read_graph<R: Read>(reader: R, format: Format, directed: bool) -> Result<AttributeGraph> {
    let scratch = AttributeGraph::new(directed);
    match format {
        Format::Binary => decode_into(&mut BinarySource::new(reader), scratch),
        #[cfg(feature = "json")]
        Format::Json => decode_into(&mut crate::codec::JsonSource::from_reader(reader)?, scratch),
        #[cfg(not(feature = "json"))]
        Format::Json => Err(json_disabled()),
    }
}

#[cfg(not(feature = "json"))]
fn json_disabled() -> CodecError {
    CodecError::UnsupportedFeature {
        feature: "JSON format (crate built without the `json` feature)".to_string(),
    }
}

/// Encode `graph` into a byte vector.
pub fn to_bytes<G: AttributedGraph + ?Sized>(graph: &G, format: Format) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_graph(graph, &mut bytes, format, false)?;
    Ok(bytes)
}

/// Decode a graph from bytes.
pub fn from_bytes(bytes: &[u8], format: Format, directed: bool) -> Result<AttributeGraph> {
    read_graph(bytes, format, directed)
}

/// Save `graph` to `path` and return the format used.
///
/// The graph is fully encoded before anything touches the filesystem, and
/// the bytes are written to a temporary file in the same directory that is
/// then renamed onto `path`. A failed save leaves no file behind and never
/// replaces an existing one with a partial write.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file cannot be created or written, plus
/// any encoding error.
pub fn save_graph<G, P>(graph: &G, path: P, options: SaveOptions) -> Result<Format>
where
    G: AttributedGraph + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = options
        .format
        .or_else(|| Format::from_path(path))
        .unwrap_or(Format::Binary);
    info!("Saving graph to {} as {format}", path.display());

    // Catalog problems surface here, before the file exists.
    let mut bytes = Vec::new();
    write_graph(graph, &mut bytes, format, options.pretty_json)?;

    // Written beside the target and renamed over it, so a failed write never
    // leaves a truncated file at `path`.
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
        CodecError::io(format!("Failed to create {}", path.display()), Some(e))
    })?;
    temp.write_all(&bytes)
        .and_then(|()| temp.flush())
        .map_err(|e| CodecError::io(format!("Failed to write {}", path.display()), Some(e)))?;
    temp.persist(path).map_err(|e| {
        CodecError::io(format!("Failed to write {}", path.display()), Some(e.error))
    })?;
    Ok(format)
}

/// Load a graph from `path`, choosing the format from its extension.
///
/// Unknown extensions are read as binary.
pub fn load_graph<P: AsRef<Path>>(path: P, directed: bool) -> Result<AttributeGraph> {
    let path = path.as_ref();
    let format = Format::from_path(path).unwrap_or_else(|| {
        warn!(
            "Unknown extension on {}, reading as {}",
            path.display(),
            Format::Binary
        );
        Format::Binary
    });
    load_graph_as(path, format, directed)
}

/// Load a graph from `path` in an explicit format.
pub fn load_graph_as<P: AsRef<Path>>(
    path: P,
    format: Format,
    directed: bool,
) -> Result<AttributeGraph> {
    let path = path.as_ref();
    info!("Loading graph from {} as {format}", path.display());
    let file = File::open(path)
        .map_err(|e| CodecError::io(format!("Failed to open {}", path.display()), Some(e)))?;
    read_graph(BufReader::new(file), format, directed)
}

impl AttributeGraph {
    /// Save this graph to `path` with default options.
    ///
    /// See [`save_graph`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<Format> {
        save_graph(self, path, SaveOptions::default())
    }

    /// Load a graph saved with [`AttributeGraph::save`].
    ///
    /// See [`load_graph`].
    pub fn load<P: AsRef<Path>>(path: P, directed: bool) -> Result<Self> {
        load_graph(path, directed)
    }
}
