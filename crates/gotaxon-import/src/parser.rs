//! Parsers for the NCBI taxonomy "pipe-dump" files.
//!
//! `nodes.dmp`, `names.dmp`, `division.dmp` and `gencode.dmp` share a format:
//! each line ends in an optional trailing `\t|` which is stripped, then the
//! remaining fields are split on `\t|\t`. `gi_taxid_nucl`/`gi_taxid_prot` use
//! a plain two-column tab-separated format instead.
//!
//! A row with the wrong field count is a known quirk of real NCBI dumps
//! (trailing blank lines, stray pipes); it is skipped, not fatal.

use gotaxon_common::{Division, GenCode, Name, Node};
use tracing::debug;

/// Strip a line's trailing `\n`/`\r` and an optional trailing `\t|`.
fn trim_dump_line(line: &str) -> &str {
    let line = line.trim_end_matches(['\n', '\r']);
    line.strip_suffix("\t|").unwrap_or(line)
}

fn split_pipe_dump(line: &str) -> Vec<&str> {
    trim_dump_line(line).split("\t|\t").collect()
}

/// A line that contributes no record: blank, or a `#`-prefixed comment.
fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_end_matches(['\n', '\r']);
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse one `nodes.dmp` line into a [`Node`]. Returns `None` for blank
/// lines, `#`-prefixed lines, or rows with the wrong field count.
pub fn parse_node_line(line: &str) -> Option<Node> {
    if is_skippable(line) {
        return None;
    }
    let fields = split_pipe_dump(line);
    let node = Node::from_fields(&fields);
    if node.is_none() {
        debug!(fields = fields.len(), "skipping malformed nodes.dmp row");
    }
    node
}

/// Parse one `names.dmp` line into a [`Name`] carrying a single `NameItem`.
pub fn parse_name_line(line: &str) -> Option<Name> {
    if is_skippable(line) {
        return None;
    }
    let fields = split_pipe_dump(line);
    let name = Name::from_fields(&fields);
    if name.is_none() {
        debug!(fields = fields.len(), "skipping malformed names.dmp row");
    }
    name
}

/// Parse one `division.dmp` line into a [`Division`].
pub fn parse_division_line(line: &str) -> Option<Division> {
    if is_skippable(line) {
        return None;
    }
    let fields = split_pipe_dump(line);
    let division = Division::from_fields(&fields);
    if division.is_none() {
        debug!(fields = fields.len(), "skipping malformed division.dmp row");
    }
    division
}

/// Parse one `gencode.dmp` line into a [`GenCode`].
pub fn parse_gencode_line(line: &str) -> Option<GenCode> {
    if is_skippable(line) {
        return None;
    }
    let fields = split_pipe_dump(line);
    let gencode = GenCode::from_fields(&fields);
    if gencode.is_none() {
        debug!(fields = fields.len(), "skipping malformed gencode.dmp row");
    }
    gencode
}

/// Parse one `gi_taxid_{nucl,prot}` line into a `(gi, taxid)` pair. Returns
/// `None` for blank lines, rows that do not split into exactly two
/// tab-separated fields, or rows with an empty column.
pub fn parse_gi_taxid_line(line: &str) -> Option<(String, String)> {
    if is_skippable(line) {
        return None;
    }
    let line = line.trim_end_matches(['\n', '\r']);
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 2 {
        debug!(fields = fields.len(), "skipping malformed gi_taxid row");
        return None;
    }
    let (gi, taxid) = (fields[0], fields[1]);
    if gi.is_empty() || taxid.is_empty() {
        debug!("skipping malformed gi_taxid row");
        return None;
    }
    Some((gi.to_string(), taxid.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_node_row() {
        let line = "9606\t|\t9605\t|\tspecies\t|\t\t|\t1\t|\t1\t|\t1\t|\t1\t|\t0\t|\t1\t|\t1\t|\t0\t|\t\t|\n";
        let node = parse_node_line(line).unwrap();
        assert_eq!(node.tax_id, "9606");
        assert_eq!(node.parent_tax_id, "9605");
        assert_eq!(node.rank, "species");
    }

    #[test]
    fn skips_row_with_wrong_field_count() {
        let line = "9606\t|\t9605\t|\n";
        assert!(parse_node_line(line).is_none());
    }

    #[test]
    fn skips_blank_lines() {
        assert!(parse_node_line("\n").is_none());
        assert!(parse_name_line("").is_none());
    }

    #[test]
    fn skips_comment_lines() {
        assert!(parse_node_line("# generated by makedb\n").is_none());
        assert!(parse_gi_taxid_line("#gi\ttaxid\n").is_none());
    }

    #[test]
    fn parses_gi_taxid_line() {
        let (gi, taxid) = parse_gi_taxid_line("12345\t9606\n").unwrap();
        assert_eq!(gi, "12345");
        assert_eq!(taxid, "9606");
    }

    #[test]
    fn skips_gi_taxid_with_empty_column() {
        assert!(parse_gi_taxid_line("12345\t\n").is_none());
        assert!(parse_gi_taxid_line("\n").is_none());
    }

    #[test]
    fn skips_gi_taxid_with_extra_columns() {
        assert!(parse_gi_taxid_line("12345\t9606\textra\n").is_none());
    }

    #[test]
    fn parses_names_line() {
        let line = "9606\t|\tHomo sapiens\t|\t\t|\tscientific name\t|\n";
        let name = parse_name_line(line).unwrap();
        assert_eq!(name.tax_id, "9606");
        assert_eq!(name.names.len(), 1);
        assert_eq!(name.names[0].name, "Homo sapiens");
        assert_eq!(name.names[0].name_class, "scientific name");
    }
}
