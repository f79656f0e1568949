//! De Bruijn graph construction.
//!
//! Every k-mer of every read is an edge from its (k-1)-prefix to its
//! (k-1)-suffix. Duplicate k-mers add parallel edges, so edge multiplicity
//! is read depth. Node labels are interned once to dense `u32` ids during
//! construction; afterwards the graph is a compressed sparse row layout
//! (per-node offsets into one flat target array) and traversal never hashes
//! a string.
//!
//! No filtering happens here. Spectrum-based correction
//! ([`crate::correct`]) is a separate step applied to the reads beforehand.

use std::collections::HashMap;
use std::ops::Range;

use cyanea_core::{CyaneaError, Result};
use tracing::debug;

use crate::kmer::kmers;
use crate::read::Read;

/// Dense node identifier.
pub type NodeId = u32;

/// A (k-1)-mer multigraph in compressed sparse row form.
#[derive(Debug, Clone)]
pub struct DeBruijnGraph {
    k: usize,
    /// Node labels back to back, `k - 1` bytes each, in first-seen order.
    labels: Vec<u8>,
    index: HashMap<Vec<u8>, NodeId>,
    /// `offsets[n]..offsets[n + 1]` indexes the out-edges of node `n`.
    offsets: Vec<usize>,
    /// Edge targets; out-edges of a node keep read order.
    targets: Vec<NodeId>,
    in_degree: Vec<u32>,
}

struct Interner<'a> {
    width: usize,
    labels: Vec<u8>,
    index: HashMap<&'a [u8], NodeId>,
}

impl<'a> Interner<'a> {
    fn intern(&mut self, label: &'a [u8]) -> Result<NodeId> {
        if let Some(&id) = self.index.get(label) {
            return Ok(id);
        }
        let id = NodeId::try_from(self.index.len()).map_err(|_| {
            CyaneaError::InvalidInput("de Bruijn graph exceeds u32::MAX nodes".into())
        })?;
        self.labels.extend_from_slice(label);
        self.index.insert(label, id);
        Ok(id)
    }

    fn len(&self) -> usize {
        self.labels.len() / self.width
    }
}

impl DeBruijnGraph {
    /// Build the graph from every k-mer of `reads`.
    ///
    /// Reads shorter than `k` contribute no edges.
    ///
    /// # Errors
    ///
    /// Returns an error if `k < 2`.
    pub fn build(reads: &[Read], k: usize) -> Result<Self> {
        if k < 2 {
            return Err(CyaneaError::InvalidInput(format!(
                "k must be at least 2 for de Bruijn graph construction, got {}",
                k
            )));
        }
        let width = k - 1;
        let mut interner = Interner {
            width,
            labels: Vec::new(),
            index: HashMap::new(),
        };
        let mut edges: Vec<(NodeId, NodeId)> = Vec::new();
        for read in reads {
            for kmer in kmers(read, k)? {
                let from = interner.intern(&kmer[..width])?;
                let to = interner.intern(&kmer[1..])?;
                edges.push((from, to));
            }
        }

        let n = interner.len();
        let mut offsets = vec![0usize; n + 1];
        let mut in_degree = vec![0u32; n];
        for &(from, to) in &edges {
            offsets[from as usize + 1] += 1;
            in_degree[to as usize] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }
        // Counting sort by source keeps insertion order within each node.
        let mut cursor = offsets.clone();
        let mut targets = vec![0 as NodeId; edges.len()];
        for &(from, to) in &edges {
            let slot = &mut cursor[from as usize];
            targets[*slot] = to;
            *slot += 1;
        }

        let index = interner
            .index
            .into_iter()
            .map(|(label, id)| (label.to_vec(), id))
            .collect();
        debug!(k, nodes = n, edges = targets.len(), "built de Bruijn graph");
        Ok(Self {
            k,
            labels: interner.labels,
            index,
            offsets,
            targets,
            in_degree,
        })
    }

    /// The k-mer length.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of distinct (k-1)-mer nodes.
    pub fn node_count(&self) -> usize {
        self.in_degree.len()
    }

    /// Number of k-mer edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Whether the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The (k-1)-mer label of `node`.
    pub fn label(&self, node: NodeId) -> &[u8] {
        let width = self.k - 1;
        let start = node as usize * width;
        &self.labels[start..start + width]
    }

    /// Id of the node labelled `label`, if present.
    pub fn node_id(&self, label: &[u8]) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Edge index range of `node`'s out-edges.
    pub fn edge_range(&self, node: NodeId) -> Range<usize> {
        self.offsets[node as usize]..self.offsets[node as usize + 1]
    }

    /// Target node of edge `edge`.
    pub fn target(&self, edge: usize) -> NodeId {
        self.targets[edge]
    }

    /// Targets of `node`'s out-edges, one entry per supporting k-mer.
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.targets[self.edge_range(node)]
    }

    /// Out-edges of `node`, counting parallel edges.
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.edge_range(node).len()
    }

    /// In-edges of `node`, counting parallel edges.
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_degree[node as usize] as usize
    }

    /// How many times `kmer` occurred across the input reads.
    pub fn kmer_multiplicity(&self, kmer: &[u8]) -> usize {
        if kmer.len() != self.k {
            return 0;
        }
        let upper: Vec<u8> = kmer.iter().map(|b| b.to_ascii_uppercase()).collect();
        let width = self.k - 1;
        match (self.node_id(&upper[..width]), self.node_id(&upper[1..])) {
            (Some(from), Some(to)) => self.successors(from).iter().filter(|&&t| t == to).count(),
            _ => 0,
        }
    }

    /// Whether `kmer` appears as an edge.
    pub fn contains_kmer(&self, kmer: &[u8]) -> bool {
        self.kmer_multiplicity(kmer) > 0
    }

    /// Prefix label → suffix labels, one entry per node with out-edges.
    ///
    /// Suffix lists keep duplicates and read order.
    pub fn adjacency(&self) -> impl Iterator<Item = (&[u8], Vec<&[u8]>)> + '_ {
        (0..self.node_count() as NodeId)
            .filter(move |&n| self.out_degree(n) > 0)
            .map(move |n| {
                let suffixes = self.successors(n).iter().map(|&t| self.label(t)).collect();
                (self.label(n), suffixes)
            })
    }
}
