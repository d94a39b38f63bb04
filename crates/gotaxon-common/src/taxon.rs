//! Record model shared by the store, importer, query engine, server and CLI.
//!
//! Field names and shapes mirror the NCBI taxonomy dump columns described in
//! `nodes.dmp`/`names.dmp`/`division.dmp`/`gencode.dmp`, ported from
//! `taxon/nodes/{nodes,names,division,gencode}.go`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A taxonomy node identifier. Stored and compared as its decimal string form,
/// matching the dump files and the store's byte-string keys.
pub type TaxId = String;

/// One row of `nodes.dmp`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    pub tax_id: TaxId,
    pub parent_tax_id: TaxId,
    pub rank: String,
    pub embl_code: String,
    pub division_id: String,
    pub inherited_div_flag: bool,
    pub genetic_code_id: String,
    pub inherited_gc_flag: bool,
    pub mitochondrial_gc_id: String,
    pub inherited_mgc_flag: bool,
    pub gen_bank_hidden_flag: bool,
    pub hidden_subtree_root_flag: bool,
    pub comments: String,
}

impl Node {
    /// Build a `Node` from the 13 pipe-dump fields of a `nodes.dmp` row, in
    /// order. Boolean flag fields use the dump's `"1"` / `"0"` convention.
    pub fn from_fields(f: &[&str]) -> Option<Self> {
        if f.len() != 13 {
            return None;
        }
        Some(Self {
            tax_id: f[0].to_string(),
            parent_tax_id: f[1].to_string(),
            rank: f[2].to_string(),
            embl_code: f[3].to_string(),
            division_id: f[4].to_string(),
            inherited_div_flag: f[5] == "1",
            genetic_code_id: f[6].to_string(),
            inherited_gc_flag: f[7] == "1",
            mitochondrial_gc_id: f[8].to_string(),
            inherited_mgc_flag: f[9] == "1",
            gen_bank_hidden_flag: f[10] == "1",
            hidden_subtree_root_flag: f[11] == "1",
            comments: f[12].to_string(),
        })
    }
}

/// One scientific/common/synonym name entry attached to a taxon id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameItem {
    pub name: String,
    pub unique_name: String,
    pub name_class: String,
}

/// All name entries for a single taxon id, as merged from every `names.dmp`
/// row sharing that id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Name {
    pub tax_id: TaxId,
    pub names: Vec<NameItem>,
}

impl Name {
    /// Build a `Name` with a single `NameItem` from a 4-field `names.dmp`
    /// row: `tax_id, name, unique_name, name_class`.
    pub fn from_fields(f: &[&str]) -> Option<Self> {
        if f.len() != 4 {
            return None;
        }
        Some(Self {
            tax_id: f[0].to_string(),
            names: vec![NameItem {
                name: f[1].to_string(),
                unique_name: f[2].to_string(),
                name_class: f[3].to_string(),
            }],
        })
    }

    /// The scientific name, if one is present among this taxon's names.
    pub fn scientific_name(&self) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.name_class == "scientific name")
            .map(|n| n.name.as_str())
    }

    /// Merge the `NameItem`s of `others` sharing this `tax_id` into `self`.
    pub fn merge(&mut self, others: &[Name]) {
        for other in others {
            if other.tax_id == self.tax_id {
                self.names.extend(other.names.iter().cloned());
            }
        }
    }
}

/// One row of `division.dmp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub division_id: String,
    pub division_code: String,
    pub division_name: String,
    pub comments: String,
}

impl Division {
    pub fn from_fields(f: &[&str]) -> Option<Self> {
        if f.len() != 4 {
            return None;
        }
        Some(Self {
            division_id: f[0].to_string(),
            division_code: f[1].to_string(),
            division_name: f[2].to_string(),
            comments: f[3].to_string(),
        })
    }
}

/// One row of `gencode.dmp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenCode {
    pub gen_code_id: String,
    pub abbreviation: String,
    pub name: String,
    pub translation_table: String,
    pub start_codons: String,
}

impl GenCode {
    pub fn from_fields(f: &[&str]) -> Option<Self> {
        if f.len() != 5 {
            return None;
        }
        Some(Self {
            gen_code_id: f[0].to_string(),
            abbreviation: f[1].to_string(),
            name: f[2].to_string(),
            translation_table: f[3].to_string(),
            start_codons: f[4].to_string(),
        })
    }
}

/// One entry of a hydrated taxon's extended lineage, root-adjacent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageExItem {
    pub tax_id: TaxId,
    pub scientific_name: String,
    pub rank: String,
}

/// A genetic code as carried on a hydrated taxon: id plus name, mirroring
/// the original's `GeneticCodeItem{GCId, GCName}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneticCodeItem {
    pub gc_id: String,
    pub gc_name: String,
}

/// A fully hydrated taxon record, assembled at query time from a `Node`, its
/// `Name`, `Division` and `GenCode`/mitochondrial `GenCode`, plus its
/// ancestor chain. Never persisted.
///
/// The all-empty `Default` value stands in for a taxon id that failed to
/// hydrate in a batch query, mirroring the Go original's zero-value
/// `Taxon{}` returned alongside a discarded per-item error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Taxon {
    pub tax_id: TaxId,
    pub parent_tax_id: TaxId,
    pub rank: String,
    pub division: String,
    pub other_names: Vec<NameItem>,
    pub scientific_name: String,
    pub genetic_code: GeneticCodeItem,
    pub mito_genetic_code: GeneticCodeItem,
    pub lineage: String,
    pub lineage_ex: Vec<LineageExItem>,
}

impl fmt::Display for Taxon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.scientific_name, self.tax_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_from_fields_rejects_wrong_arity() {
        assert!(Node::from_fields(&["1", "1"]).is_none());
    }

    #[test]
    fn node_from_fields_parses_flags() {
        let fields = [
            "9606", "9605", "species", "", "1", "1", "1", "1", "0", "1", "1", "0", "",
        ];
        let node = Node::from_fields(&fields).unwrap();
        assert_eq!(node.tax_id, "9606");
        assert_eq!(node.parent_tax_id, "9605");
        assert!(node.inherited_div_flag);
        assert_eq!(node.mitochondrial_gc_id, "0");
        assert!(node.inherited_mgc_flag);
        assert!(node.gen_bank_hidden_flag);
        assert!(!node.hidden_subtree_root_flag);
    }

    #[test]
    fn name_merge_combines_items_for_matching_tax_id() {
        let mut primary = Name {
            tax_id: "9606".to_string(),
            names: vec![NameItem {
                name: "Homo sapiens".to_string(),
                unique_name: String::new(),
                name_class: "scientific name".to_string(),
            }],
        };
        let extra = Name {
            tax_id: "9606".to_string(),
            names: vec![NameItem {
                name: "human".to_string(),
                unique_name: String::new(),
                name_class: "genbank common name".to_string(),
            }],
        };
        let unrelated = Name {
            tax_id: "9605".to_string(),
            names: vec![NameItem {
                name: "Homo".to_string(),
                unique_name: String::new(),
                name_class: "scientific name".to_string(),
            }],
        };
        primary.merge(&[extra, unrelated]);
        assert_eq!(primary.names.len(), 2);
        assert_eq!(primary.scientific_name(), Some("Homo sapiens"));
    }

    #[test]
    fn taxon_json_round_trips() {
        let taxon = Taxon {
            tax_id: "9606".to_string(),
            parent_tax_id: "9605".to_string(),
            rank: "species".to_string(),
            division: "Primates".to_string(),
            other_names: vec![],
            scientific_name: "Homo sapiens".to_string(),
            genetic_code: GeneticCodeItem {
                gc_id: "1".to_string(),
                gc_name: "Standard".to_string(),
            },
            mito_genetic_code: GeneticCodeItem {
                gc_id: "2".to_string(),
                gc_name: "Vertebrate Mitochondrial".to_string(),
            },
            lineage: "Eukaryota; Metazoa; Chordata".to_string(),
            lineage_ex: vec![],
        };
        let encoded = serde_json::to_string(&taxon).unwrap();
        let decoded: Taxon = serde_json::from_str(&encoded).unwrap();
        assert_eq!(taxon, decoded);
    }
}
