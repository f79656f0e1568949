//! Greedy contig tracing over a de Bruijn graph.
//!
//! Start nodes are those with more out-edges than in-edges (sources and
//! branch-outs), visited in node id order; a graph made only of balanced
//! nodes falls back to node 0. From each start a single walk follows the
//! first unused out-edge at every step, marking it used, and emits one
//! contig when it reaches a node with no unused out-edges.
//!
//! This is a heuristic path cover, not an Eulerian circuit. Branching and
//! cyclic regions are covered partially or in fragments, and edges reachable
//! only through already-exhausted starts stay untraced.

use cyanea_core::BitSet;
use tracing::debug;

use crate::debruijn::{DeBruijnGraph, NodeId};

/// Nodes where walks begin, in id order.
pub fn start_nodes(graph: &DeBruijnGraph) -> Vec<NodeId> {
    let starts: Vec<NodeId> = (0..graph.node_count() as NodeId)
        .filter(|&n| {
            let out = graph.out_degree(n);
            let inn = graph.in_degree(n);
            out > inn || (out > 0 && inn == 0)
        })
        .collect();
    if starts.is_empty() && !graph.is_empty() {
        return vec![0];
    }
    starts
}

/// Walk from `start`, consuming the first unused out-edge at every node.
fn walk(graph: &DeBruijnGraph, start: NodeId, used: &mut BitSet) -> Vec<u8> {
    let mut contig = graph.label(start).to_vec();
    let mut current = start;
    loop {
        let range = graph.edge_range(current);
        let Some(edge) = used.first_clear_in(range.start, range.end) else {
            break;
        };
        used.insert(edge);
        current = graph.target(edge);
        contig.push(*graph.label(current).last().unwrap_or(&b'N'));
    }
    contig
}

/// Trace contigs from every start node. Contigs shorter than `k` are dropped.
pub fn trace_contigs(graph: &DeBruijnGraph) -> Vec<Vec<u8>> {
    let k = graph.k();
    let mut used = BitSet::new(graph.edge_count());
    let mut contigs = Vec::new();
    for start in start_nodes(graph) {
        let contig = walk(graph, start, &mut used);
        if contig.len() >= k {
            contigs.push(contig);
        }
    }
    debug!(
        contigs = contigs.len(),
        untraced_edges = used.count_zeros(),
        "traced de Bruijn contigs"
    );
    contigs
}
