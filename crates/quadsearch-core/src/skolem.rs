//! Content-derived document identifiers.
//!
//! The index and the quad store share no internal ids, so every document id is
//! computed from the quad itself: the four slots are rendered canonically and
//! hashed with BLAKE3. Deleting a quad therefore recomputes exactly the id its
//! insertion produced.
//!
//! Blank nodes are hashed by the label the store reports. If a store relabels
//! blank nodes (for example across restarts), deletions issued with the new
//! labels will not find documents written under the old ones.

use crate::model::{Quad, Term};

/// Graph slot rendering for the default graph.
///
/// Real graphs render as `<iri>` or `_:label`, so this can never collide.
pub const DEFAULT_GRAPH_SENTINEL: &str = "@default";

/// Canonical string form of a quad's four slots
pub fn canonical_form(quad: &Quad) -> String {
    let graph = quad
        .graph
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| DEFAULT_GRAPH_SENTINEL.to_string());

    format!(
        "{} {} {} {}",
        quad.subject,
        Term::Iri(quad.predicate.clone()),
        quad.object,
        graph
    )
}

/// Stable document id for a quad (64 lowercase hex characters)
pub fn skolemize(quad: &Quad) -> String {
    let hash = blake3::hash(canonical_form(quad).as_bytes());
    hex::encode(hash.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;
    use crate::vocab::XSD_STRING;

    fn quad(object: Literal) -> Quad {
        Quad::new(
            Term::iri("https://example.org/s"),
            "https://example.org/p",
            object,
        )
    }

    #[test]
    fn test_identical_quads_share_id() {
        let a = quad(Literal::plain("o"));
        let b = quad(Literal::plain("o"));
        assert_eq!(skolemize(&a), skolemize(&b));
        assert_eq!(skolemize(&a).len(), 64);
    }

    #[test]
    fn test_literal_annotations_change_id() {
        let plain = skolemize(&quad(Literal::plain("o")));
        let tagged = skolemize(&quad(Literal::lang("o", "en")));
        let typed = skolemize(&quad(Literal::typed("o", XSD_STRING)));

        assert_ne!(plain, tagged);
        assert_ne!(plain, typed);
        assert_ne!(tagged, typed);
    }

    #[test]
    fn test_default_graph_differs_from_named() {
        let default_graph = quad(Literal::plain("o"));
        let named = quad(Literal::plain("o")).in_graph(Term::iri("https://example.org/g"));
        let sentinel_named = quad(Literal::plain("o")).in_graph(Term::iri("@default"));

        assert_ne!(skolemize(&default_graph), skolemize(&named));
        assert_ne!(skolemize(&default_graph), skolemize(&sentinel_named));
    }

    #[test]
    fn test_blank_and_iri_subjects_differ() {
        let iri = Quad::new(Term::iri("b0"), "https://example.org/p", Literal::plain("o"));
        let blank = Quad::new(Term::blank("b0"), "https://example.org/p", Literal::plain("o"));
        assert_ne!(skolemize(&iri), skolemize(&blank));
    }

    #[test]
    fn test_canonical_form_layout() {
        assert_eq!(
            canonical_form(&quad(Literal::lang("o", "en"))),
            "<https://example.org/s> <https://example.org/p> \"o\"@en @default"
        );
    }
}
