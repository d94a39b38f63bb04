//! Point queries: gi->taxid, taxid->node, name->taxids, and taxon
//! hydration. Ported from `taxon/{gi_taxid,nodes,names,nodes/Taxa}.go`.

use gotaxon_common::{Error, GeneticCodeItem, LineageExItem, Node, Taxon};
use gotaxon_store::Store;
use regex::Regex;
use std::collections::HashMap;

use crate::graph::TaxonomyGraph;
use crate::Result;

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Look up each of `gis` in `bucket` (`gi_taxid_nucl` or `gi_taxid_prot`).
/// A gi absent from the bucket maps to `""`, mirroring the Go original's
/// zero-value byte slice.
pub fn gi_to_taxid(store: &Store, bucket: &str, gis: &[String]) -> Result<HashMap<String, String>> {
    let mut out = HashMap::with_capacity(gis.len());
    for gi in gis {
        let taxid = store
            .get(bucket, gi)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();
        out.insert(gi.clone(), taxid);
    }
    Ok(out)
}

/// Look up each of `taxids` in the `nodes` bucket. Every taxid must be an
/// unsigned integer string; a single non-numeric input is `InvalidInput` for
/// the whole call. A taxid absent from the bucket maps to `None`; a key
/// present with an empty stored value maps to an empty, default-valued
/// `Node`, mirroring `QueryNodeByTaxID`'s `s == ""` case.
pub fn taxid_to_node(store: &Store, taxids: &[String]) -> Result<HashMap<String, Option<Node>>> {
    for taxid in taxids {
        if !is_digits(taxid) {
            return Err(Error::invalid_input(format!("not a valid tax id: {taxid}")));
        }
    }
    let mut out = HashMap::with_capacity(taxids.len());
    for taxid in taxids {
        let bytes = store.get("nodes", taxid)?;
        let node = match bytes {
            Some(bytes) if bytes.is_empty() => Some(Node::default()),
            Some(bytes) => Some(serde_json::from_slice::<Node>(&bytes).map_err(|e| Error::parse(e.to_string()))?),
            None => None,
        };
        out.insert(taxid.clone(), node);
    }
    Ok(out)
}

/// Search every loaded `Name` record for `queries`. If `name_class` is
/// non-empty, only `NameItem`s of that class are considered. If `use_regex`,
/// each query string is compiled once and matched against candidate names;
/// otherwise literal equality is used. Each input query scans a `Name`
/// record's `NameItem`s independently, stopping at its own first hit within
/// that record — so two different inputs that both match NameItems of the
/// same record each get their hit. Queries with zero hits are absent from
/// the result map.
pub fn name_to_taxids(
    graph: &TaxonomyGraph,
    queries: &[String],
    use_regex: bool,
    name_class: &str,
) -> Result<HashMap<String, Vec<(String, String)>>> {
    let compiled: Vec<Option<Regex>> = if use_regex {
        queries
            .iter()
            .map(|q| Regex::new(q).map(Some).map_err(|e| Error::invalid_input(e.to_string())))
            .collect::<Result<_>>()?
    } else {
        queries.iter().map(|_| None).collect()
    };

    let mut out: HashMap<String, Vec<(String, String)>> = HashMap::new();
    for name in graph.names.values() {
        for (i, query) in queries.iter().enumerate() {
            for item in &name.names {
                if !name_class.is_empty() && item.name_class != name_class {
                    continue;
                }
                let matched = match &compiled[i] {
                    Some(re) => re.is_match(&item.name),
                    None => &item.name == query,
                };
                if matched {
                    out.entry(query.clone())
                        .or_default()
                        .push((name.tax_id.clone(), item.name.clone()));
                    break;
                }
            }
        }
    }
    Ok(out)
}

/// Walk `taxid`'s ancestors via `ParentTaxId` until reaching the root
/// (`parent_tax_id == "1"`), pushing the root last. Ordered self-first,
/// root-last. A taxid with a parent absent from `nodes` terminates the walk
/// at that point rather than failing — the only tolerated structural gap.
pub(crate) fn ancestors_of(graph: &TaxonomyGraph, taxid: &str) -> Vec<Node> {
    let mut chain = Vec::new();
    let Some(mut current) = graph.nodes.get(taxid).cloned() else {
        return chain;
    };
    loop {
        let reached_root = current.tax_id == current.parent_tax_id || current.parent_tax_id == "1";
        chain.push(current.clone());
        if reached_root {
            if current.parent_tax_id != current.tax_id {
                if let Some(root) = graph.nodes.get(&current.parent_tax_id) {
                    chain.push(root.clone());
                }
            }
            break;
        }
        match graph.nodes.get(&current.parent_tax_id) {
            Some(parent) => current = parent.clone(),
            None => break,
        }
    }
    chain
}

/// Assemble a fully hydrated [`Taxon`] for `taxid`. Node, Name, Division and
/// GenCode must all be present (`MissingReference` otherwise); the
/// mitochondrial GenCode is read without an existence check and simply
/// yields an empty [`GeneticCodeItem`] if absent, mirroring
/// `GetTaxonByTaxID`.
pub fn taxon_by_taxid(graph: &TaxonomyGraph, taxid: &str) -> Result<Taxon> {
    let node = graph
        .nodes
        .get(taxid)
        .ok_or_else(|| Error::missing_reference(format!("no node for tax id {taxid}")))?;
    let name = graph
        .names
        .get(taxid)
        .ok_or_else(|| Error::missing_reference(format!("no name for tax id {taxid}")))?;
    let division = graph
        .divisions
        .get(&node.division_id)
        .ok_or_else(|| Error::missing_reference(format!("no division {} for tax id {taxid}", node.division_id)))?;
    let gencode = graph
        .gencodes
        .get(&node.genetic_code_id)
        .ok_or_else(|| Error::missing_reference(format!("no gencode {} for tax id {taxid}", node.genetic_code_id)))?;
    let mito_gencode = graph
        .gencodes
        .get(&node.mitochondrial_gc_id)
        .map(|g| GeneticCodeItem {
            gc_id: g.gen_code_id.clone(),
            gc_name: g.name.clone(),
        })
        .unwrap_or_default();

    let scientific_name = name.scientific_name().unwrap_or_default().to_string();
    let other_names = name
        .names
        .iter()
        .filter(|n| n.name_class != "scientific name")
        .cloned()
        .collect();

    let ancestors = ancestors_of(graph, taxid);
    let (lineage, lineage_ex) = if ancestors.len() <= 2 {
        (String::new(), Vec::new())
    } else {
        let mut names = Vec::new();
        let mut items = Vec::new();
        for ancestor in ancestors[1..ancestors.len() - 1].iter().rev() {
            let sci_name = graph
                .names
                .get(&ancestor.tax_id)
                .and_then(|n| n.scientific_name())
                .unwrap_or_default()
                .to_string();
            names.push(sci_name.clone());
            items.push(LineageExItem {
                tax_id: ancestor.tax_id.clone(),
                scientific_name: sci_name,
                rank: ancestor.rank.clone(),
            });
        }
        (names.join("; "), items)
    };

    Ok(Taxon {
        tax_id: node.tax_id.clone(),
        parent_tax_id: node.parent_tax_id.clone(),
        rank: node.rank.clone(),
        division: division.division_name.clone(),
        other_names,
        scientific_name,
        genetic_code: GeneticCodeItem {
            gc_id: gencode.gen_code_id.clone(),
            gc_name: gencode.name.clone(),
        },
        mito_genetic_code: mito_gencode,
        lineage,
        lineage_ex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotaxon_common::{Division, GenCode, Name, NameItem};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn node(tax_id: &str, parent: &str, rank: &str) -> Node {
        Node {
            tax_id: tax_id.to_string(),
            parent_tax_id: parent.to_string(),
            rank: rank.to_string(),
            embl_code: String::new(),
            division_id: "0".to_string(),
            inherited_div_flag: true,
            genetic_code_id: "1".to_string(),
            inherited_gc_flag: true,
            mitochondrial_gc_id: "0".to_string(),
            inherited_mgc_flag: true,
            gen_bank_hidden_flag: false,
            hidden_subtree_root_flag: false,
            comments: String::new(),
        }
    }

    fn name(tax_id: &str, scientific: &str) -> Name {
        Name {
            tax_id: tax_id.to_string(),
            names: vec![NameItem {
                name: scientific.to_string(),
                unique_name: String::new(),
                name_class: "scientific name".to_string(),
            }],
        }
    }

    fn sample_graph() -> TaxonomyGraph {
        let mut nodes = HashMap::new();
        nodes.insert("1".to_string(), node("1", "1", "no rank"));
        nodes.insert("2".to_string(), node("2", "1", "superkingdom"));
        nodes.insert("9606".to_string(), node("9606", "2", "species"));

        let mut names = HashMap::new();
        names.insert("1".to_string(), name("1", "root"));
        names.insert("2".to_string(), name("2", "Eukaryota"));
        names.insert("9606".to_string(), name("9606", "Homo sapiens"));

        let mut divisions = HashMap::new();
        divisions.insert(
            "0".to_string(),
            Division {
                division_id: "0".to_string(),
                division_code: "PRI".to_string(),
                division_name: "Primates".to_string(),
                comments: String::new(),
            },
        );

        let mut gencodes = HashMap::new();
        gencodes.insert(
            "1".to_string(),
            GenCode {
                gen_code_id: "1".to_string(),
                abbreviation: "SGC0".to_string(),
                name: "Standard".to_string(),
                translation_table: String::new(),
                start_codons: String::new(),
            },
        );

        TaxonomyGraph {
            nodes: Arc::new(nodes),
            names: Arc::new(names),
            divisions: Arc::new(divisions),
            gencodes: Arc::new(gencodes),
        }
    }

    #[test]
    fn taxid_to_node_rejects_non_numeric_input() {
        let dir = tempfile::tempdir().unwrap();
        let store = gotaxon_store::Store::open(dir.path().join("t.db")).unwrap();
        let err = taxid_to_node(&store, &["abc".to_string()]).unwrap_err();
        assert_eq!(err.kind(), gotaxon_common::Kind::InvalidInput);
    }

    #[test]
    fn taxid_to_node_missing_key_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = gotaxon_store::Store::open(dir.path().join("t.db")).unwrap();
        store.ensure_bucket("nodes").unwrap();
        let result = taxid_to_node(&store, &["9606".to_string()]).unwrap();
        assert_eq!(result.get("9606"), Some(&None));
    }

    #[test]
    fn taxid_to_node_missing_bucket_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = gotaxon_store::Store::open(dir.path().join("t.db")).unwrap();
        let err = taxid_to_node(&store, &["9606".to_string()]).unwrap_err();
        assert_eq!(err.kind(), gotaxon_common::Kind::NotFound);
    }

    #[test]
    fn taxid_to_node_empty_value_yields_an_empty_node() {
        let dir = tempfile::tempdir().unwrap();
        let store = gotaxon_store::Store::open(dir.path().join("t.db")).unwrap();
        store.put_all("nodes", &[(b"9606".to_vec(), Vec::new())]).unwrap();
        let result = taxid_to_node(&store, &["9606".to_string()]).unwrap();
        assert_eq!(result.get("9606"), Some(&Some(Node::default())));
    }

    #[test]
    fn ancestors_of_terminates_at_root() {
        let graph = sample_graph();
        let chain = ancestors_of(&graph, "9606");
        let ids: Vec<&str> = chain.iter().map(|n| n.tax_id.as_str()).collect();
        assert_eq!(ids, vec!["9606", "2", "1"]);
    }

    #[test]
    fn ancestors_of_terminates_at_missing_parent() {
        let mut graph = sample_graph();
        let mut nodes = (*graph.nodes).clone();
        nodes.insert("9606".to_string(), node("9606", "999999", "species"));
        graph.nodes = Arc::new(nodes);
        let chain = ancestors_of(&graph, "9606");
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].tax_id, "9606");
    }

    #[test]
    fn taxon_by_taxid_hydrates_lineage_excluding_root_and_self() {
        let graph = sample_graph();
        let taxon = taxon_by_taxid(&graph, "9606").unwrap();
        assert_eq!(taxon.scientific_name, "Homo sapiens");
        assert_eq!(taxon.division, "Primates");
        assert_eq!(taxon.lineage, "Eukaryota");
        assert_eq!(taxon.genetic_code.gc_id, "1");
        assert_eq!(taxon.genetic_code.gc_name, "Standard");
    }

    #[test]
    fn taxon_by_taxid_missing_node_is_missing_reference() {
        let graph = sample_graph();
        let err = taxon_by_taxid(&graph, "404").unwrap_err();
        assert_eq!(err.kind(), gotaxon_common::Kind::MissingReference);
    }

    #[test]
    fn name_to_taxids_filters_by_name_class() {
        let graph = sample_graph();
        let result = name_to_taxids(&graph, &["Homo sapiens".to_string()], false, "scientific name").unwrap();
        assert_eq!(result.get("Homo sapiens").unwrap()[0].0, "9606");

        let no_match = name_to_taxids(&graph, &["Homo sapiens".to_string()], false, "synonym").unwrap();
        assert!(no_match.get("Homo sapiens").is_none());
    }

    #[test]
    fn name_to_taxids_supports_regex() {
        let graph = sample_graph();
        let result = name_to_taxids(&graph, &["^Homo".to_string()], true, "").unwrap();
        assert_eq!(result.get("^Homo").unwrap()[0].0, "9606");
    }

    #[test]
    fn name_to_taxids_gives_each_query_its_own_hit_on_the_same_record() {
        let mut graph = sample_graph();
        let mut names = (*graph.names).clone();
        names.insert(
            "9606".to_string(),
            Name {
                tax_id: "9606".to_string(),
                names: vec![
                    NameItem {
                        name: "Homo sapiens".to_string(),
                        unique_name: String::new(),
                        name_class: "scientific name".to_string(),
                    },
                    NameItem {
                        name: "human".to_string(),
                        unique_name: String::new(),
                        name_class: "genbank common name".to_string(),
                    },
                ],
            },
        );
        graph.names = Arc::new(names);

        let result = name_to_taxids(&graph, &["Homo sapiens".to_string(), "human".to_string()], false, "").unwrap();
        assert_eq!(result.get("Homo sapiens").unwrap()[0].0, "9606");
        assert_eq!(result.get("human").unwrap()[0].0, "9606");
    }
}
