//! Lowest common ancestor over two or more tax ids. Ported from
//! `taxon/nodes/nodes.go`'s `LCA`/`ancestorsOfNode`, with one deliberate
//! deviation: a missing parent terminates the ancestor walk at that node
//! instead of looping forever.

use gotaxon_common::{Error, Node};

use crate::graph::TaxonomyGraph;
use crate::lookup::ancestors_of;
use crate::Result;

/// Find the lowest common ancestor of `taxids`. At least two distinct tax
/// ids are required; taxids absent from the graph are dropped silently. The
/// intersection of every ancestor chain is taken, and ties are broken by the
/// lowest index in the first chain (i.e. the ancestor closest to that
/// chain's own starting node wins).
pub fn lca(graph: &TaxonomyGraph, taxids: &[String]) -> Result<Node> {
    if taxids.len() < 2 {
        return Err(Error::invalid_input("lca requires at least two tax ids"));
    }

    let chains: Vec<Vec<Node>> = taxids
        .iter()
        .filter(|id| graph.nodes.contains_key(id.as_str()))
        .map(|id| ancestors_of(graph, id))
        .filter(|chain| !chain.is_empty())
        .collect();

    if chains.len() < 2 {
        return Err(Error::invalid_input("lca requires at least two known tax ids"));
    }

    let (first, rest) = chains.split_first().expect("checked len >= 2 above");

    let mut best: Option<(usize, &Node)> = None;
    for (index, candidate) in first.iter().enumerate() {
        let in_every_other = rest
            .iter()
            .all(|chain| chain.iter().any(|n| n.tax_id == candidate.tax_id));
        if in_every_other {
            match best {
                Some((best_index, _)) if best_index <= index => {},
                _ => best = Some((index, candidate)),
            }
        }
    }

    best.map(|(_, node)| node.clone())
        .ok_or_else(|| Error::not_found("tax ids share no common ancestor"))
}
