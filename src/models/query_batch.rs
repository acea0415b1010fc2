// file: src/models/query_batch.rs
// description: newline-delimited search keywords produced by the keyword model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryBatch(String);

impl QueryBatch {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trims the whole batch and splits it on `\n`. Fragments are returned
    /// untouched, so blank lines survive as empty strings.
    pub fn fragments(&self) -> Vec<&str> {
        self.0.trim().split('\n').collect()
    }

    /// Trimmed fragments with whitespace-only lines removed.
    pub fn non_blank_fragments(&self) -> Vec<&str> {
        self.fragments()
            .into_iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect()
    }
}

impl From<String> for QueryBatch {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for QueryBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fragments_trim_outer_whitespace_only() {
        let batch = QueryBatch::new("\nmRNA Vaccines\n Neoplasms \n\nImmunotherapy\n");
        assert_eq!(
            batch.fragments(),
            vec!["mRNA Vaccines", " Neoplasms ", "", "Immunotherapy"]
        );
    }

    #[test]
    fn test_non_blank_fragments() {
        let batch = QueryBatch::new("mRNA Vaccines\n   \nNeoplasms\r\n");
        assert_eq!(batch.non_blank_fragments(), vec!["mRNA Vaccines", "Neoplasms"]);
    }

    #[test]
    fn test_empty_batch_has_one_empty_fragment() {
        let batch = QueryBatch::new("   ");
        assert_eq!(batch.fragments(), vec![""]);
        assert!(batch.non_blank_fragments().is_empty());
    }
}
