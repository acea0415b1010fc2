// file: src/parser/mod.rs
// description: article parsing, normalization and answer rendering exports
// reference: internal module structure

pub mod markdown;
pub mod normalizer;
pub mod pubmed_xml;

pub use markdown::MarkdownRenderer;
pub use normalizer::ArticleNormalizer;
pub use pubmed_xml::PubMedXmlParser;
