//! Seed documents for the knowledge store.
//!
//! A corpus file is TOML with one `[[documents]]` table per entry:
//!
//! ```toml
//! [[documents]]
//! id = "doc1"
//! text = "Seattle tour package: ..."
//! ```

use super::KnowledgeDocument;
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    documents: Vec<KnowledgeDocument>,
}

/// Built-in MVPTour company knowledge.
pub fn default_documents() -> Vec<KnowledgeDocument> {
    vec![
        KnowledgeDocument::new(
            "doc1",
            "Seattle tour package: a 4-day, 3-night itinerary that includes \
             admission tickets to the Space Needle.",
        ),
        KnowledgeDocument::new(
            "doc2",
            "MVPTour special currency exchange service: preferential exchange rates \
             at the head office, 1st floor, from 9 AM to 4 PM.",
        ),
        KnowledgeDocument::new(
            "doc3",
            "Cancellation policy: cancellations made up to 7 days before departure \
             receive a 100% refund; after that a 50% cancellation fee applies.",
        ),
    ]
}

/// Parse a corpus from TOML text.
pub fn parse_corpus(content: &str) -> Result<Vec<KnowledgeDocument>> {
    let corpus: CorpusFile = toml::from_str(content)?;
    Ok(corpus.documents)
}

/// Load a corpus file.
pub fn load_corpus(path: &Path) -> Result<Vec<KnowledgeDocument>> {
    let content = std::fs::read_to_string(path)?;
    parse_corpus(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_documents_have_unique_ids() {
        let docs = default_documents();
        let mut ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), docs.len());
    }

    #[test]
    fn test_load_corpus_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[documents]]
id = "visa"
text = "Visa guidance for Japan."

[[documents]]
id = "insurance"
text = "Travel insurance is optional."
"#
        )
        .unwrap();

        let docs = load_corpus(file.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0], KnowledgeDocument::new("visa", "Visa guidance for Japan."));
    }

    #[test]
    fn test_parse_empty_corpus() {
        assert!(parse_corpus("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_text() {
        assert!(parse_corpus("[[documents]]\nid = \"x\"\n").is_err());
    }
}
