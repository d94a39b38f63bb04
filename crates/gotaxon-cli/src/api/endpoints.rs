//! API endpoint URL builders. Query parameters are repeated keys (one `gi=`
//! per accession, etc.) so only the path is built here; [`super::client`]
//! attaches parameters via `reqwest`'s multi-pair query builder.

pub fn gi2taxid_url(base_url: &str) -> String {
    format!("{base_url}/gi2taxid")
}

pub fn taxid2taxon_url(base_url: &str) -> String {
    format!("{base_url}/taxid2taxon")
}

pub fn name2taxid_url(base_url: &str) -> String {
    format!("{base_url}/name2taxid")
}

pub fn lca_url(base_url: &str) -> String {
    format!("{base_url}/lca")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_paths_under_the_base_url() {
        assert_eq!(gi2taxid_url("http://127.0.0.1:8080"), "http://127.0.0.1:8080/gi2taxid");
        assert_eq!(taxid2taxon_url("http://127.0.0.1:8080"), "http://127.0.0.1:8080/taxid2taxon");
        assert_eq!(name2taxid_url("http://127.0.0.1:8080"), "http://127.0.0.1:8080/name2taxid");
        assert_eq!(lca_url("http://127.0.0.1:8080"), "http://127.0.0.1:8080/lca");
    }
}
