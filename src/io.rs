//! Line-oriented text loaders for the adjacency encodings.
//!
//! All three formats share a prefix: a header line naming the encoding
//! (case-insensitive), a vertex-count line, and an edge-count line. The
//! compressed encodings then carry one row per vertex, `"<v> <id>*"`, where
//! the leading field repeats the row's vertex id and the rest are the edge
//! endpoints stored for it (incoming sources for CSC, outgoing destinations
//! for CSR). COO instead carries one `"<src> <dst>"` line per edge. Files
//! written with the combined `CSC-CSR` header are accepted by both
//! compressed loaders.
//!
//! Every declared count is checked against what the file actually contains;
//! a mismatch, an unparsable field, or an out-of-range id is a
//! [`GraphError::Format`] and no graph is produced.

use crate::error::{GraphError, Result};
use crate::graph::{CooGraph, CscGraph, CsrGraph};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::debug;

fn next_line<B: BufRead>(lines: &mut Lines<B>) -> Result<String> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(GraphError::Format("unexpected end of file".into())),
    }
}

fn parse_count(line: &str, what: &str) -> Result<usize> {
    let token = line.trim();
    token
        .parse()
        .map_err(|_| GraphError::Format(format!("invalid {what} count {token:?}")))
}

fn parse_id(token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|_| GraphError::Format(format!("invalid vertex id {token:?}")))
}

fn read_header<B: BufRead>(lines: &mut Lines<B>, accepted: &[&str]) -> Result<()> {
    let header = next_line(lines)?;
    let token = header.trim();
    if accepted.iter().any(|want| token.eq_ignore_ascii_case(want)) {
        Ok(())
    } else {
        Err(GraphError::Format(format!(
            "unrecognized header {token:?}: expected one of {accepted:?}"
        )))
    }
}

/// Reads the `V` per-vertex rows of a compressed encoding into offset/id
/// arrays, checking row labels and the declared edge count.
fn read_adjacency_rows<B: BufRead>(
    lines: &mut Lines<B>,
    num_vertices: usize,
    num_edges: usize,
) -> Result<(Vec<usize>, Vec<u32>)> {
    let mut index = Vec::with_capacity(num_vertices + 1);
    let mut ids = Vec::with_capacity(num_edges);
    for v in 0..num_vertices {
        index.push(ids.len());
        let line = next_line(lines)?;
        let mut fields = line.split_whitespace();
        let Some(label) = fields.next() else {
            return Err(GraphError::Format(format!("row {v} is empty")));
        };
        if parse_id(label)? as usize != v {
            return Err(GraphError::Format(format!(
                "row labeled {label} where vertex {v} was expected"
            )));
        }
        for token in fields {
            ids.push(parse_id(token)?);
        }
    }
    index.push(ids.len());
    if ids.len() != num_edges {
        return Err(GraphError::Format(format!(
            "header declares {num_edges} edges but rows contain {}",
            ids.len()
        )));
    }
    Ok((index, ids))
}

impl CscGraph {
    /// Reads a graph in the `CSC` text format (header `CSC` or `CSC-CSR`);
    /// each row lists the incoming sources of one destination vertex.
    pub fn from_reader<B: BufRead>(reader: B) -> Result<Self> {
        let mut lines = reader.lines();
        read_header(&mut lines, &["CSC", "CSC-CSR"])?;
        let num_vertices = parse_count(&next_line(&mut lines)?, "vertex")?;
        let num_edges = parse_count(&next_line(&mut lines)?, "edge")?;
        let (index, sources) = read_adjacency_rows(&mut lines, num_vertices, num_edges)?;
        let graph = Self::from_parts(index, sources)?;
        debug!(vertices = num_vertices, edges = num_edges, "loaded CSC graph");
        Ok(graph)
    }

    /// Opens and reads a `CSC` text file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}

impl CsrGraph {
    /// Reads a graph in the `CSR` text format (header `CSR` or `CSC-CSR`);
    /// each row lists the outgoing destinations of one source vertex.
    pub fn from_reader<B: BufRead>(reader: B) -> Result<Self> {
        let mut lines = reader.lines();
        read_header(&mut lines, &["CSR", "CSC-CSR"])?;
        let num_vertices = parse_count(&next_line(&mut lines)?, "vertex")?;
        let num_edges = parse_count(&next_line(&mut lines)?, "edge")?;
        let (index, destinations) = read_adjacency_rows(&mut lines, num_vertices, num_edges)?;
        let graph = Self::from_parts(index, destinations)?;
        debug!(vertices = num_vertices, edges = num_edges, "loaded CSR graph");
        Ok(graph)
    }

    /// Opens and reads a `CSR` text file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}

impl CooGraph {
    /// Reads a graph in the `COO` text format: one `"<src> <dst>"` line per
    /// edge.
    pub fn from_reader<B: BufRead>(reader: B) -> Result<Self> {
        let mut lines = reader.lines();
        read_header(&mut lines, &["COO"])?;
        let num_vertices = parse_count(&next_line(&mut lines)?, "vertex")?;
        let num_edges = parse_count(&next_line(&mut lines)?, "edge")?;
        let mut sources = Vec::with_capacity(num_edges);
        let mut destinations = Vec::with_capacity(num_edges);
        for e in 0..num_edges {
            let line = next_line(&mut lines)?;
            let mut fields = line.split_whitespace();
            let (Some(src), Some(dst)) = (fields.next(), fields.next()) else {
                return Err(GraphError::Format(format!(
                    "edge row {e} must hold a source and a destination"
                )));
            };
            sources.push(parse_id(src)?);
            destinations.push(parse_id(dst)?);
        }
        let graph = Self::from_parts(num_vertices, sources, destinations)?;
        debug!(vertices = num_vertices, edges = num_edges, "loaded COO graph");
        Ok(graph)
    }

    /// Opens and reads a `COO` text file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}
