//! Index documents and search results

use crate::model::{Iri, Quad};
use crate::skolem::skolemize;
use serde::{Deserialize, Serialize};

/// One indexed quad.
///
/// Term slots hold lexical values only; the id is what keeps literals with
/// different annotations apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Skolem id of the source quad
    pub id: String,
    /// Subject IRI or blank label
    pub subject: String,
    /// Predicate IRI
    pub predicate: String,
    /// Literal lexical form
    pub object: String,
    /// Graph IRI or blank label, empty for the default graph
    pub graph: String,
    /// Embedding of `object`
    pub embedding: Vec<f32>,
}

impl Document {
    /// Build the document for a quad with its precomputed embedding
    pub fn from_quad(quad: &Quad, embedding: Vec<f32>) -> Self {
        Self {
            id: skolemize(quad),
            subject: quad.subject.value().to_string(),
            predicate: quad.predicate.as_str().to_string(),
            object: quad.object.value().to_string(),
            graph: quad
                .graph
                .as_ref()
                .map(|graph| graph.value().to_string())
                .unwrap_or_default(),
            embedding,
        }
    }
}

/// A search hit: the subject of a matching quad and its relevance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Relevance, higher is better
    pub score: f32,
    /// Subject of the matching quad
    pub value: Iri,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Literal, Term};

    #[test]
    fn test_document_from_quad() {
        let quad = Quad::new(
            Term::iri("https://example.org/jupiter"),
            "https://schema.org/description",
            Literal::lang("Jupiter is the largest planet", "en"),
        );

        let doc = Document::from_quad(&quad, vec![0.0, 1.0]);
        assert_eq!(doc.id, skolemize(&quad));
        assert_eq!(doc.subject, "https://example.org/jupiter");
        assert_eq!(doc.predicate, "https://schema.org/description");
        assert_eq!(doc.object, "Jupiter is the largest planet");
        assert_eq!(doc.graph, "");
        assert_eq!(doc.embedding, vec![0.0, 1.0]);
    }

    #[test]
    fn test_named_graph_value() {
        let quad = Quad::new(Term::blank("b1"), "https://example.org/p", Literal::plain("x"))
            .in_graph(Term::iri("https://example.org/g"));

        let doc = Document::from_quad(&quad, Vec::new());
        assert_eq!(doc.subject, "b1");
        assert_eq!(doc.graph, "https://example.org/g");
    }
}
