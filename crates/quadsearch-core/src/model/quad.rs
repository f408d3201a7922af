//! Quads and quad patterns.

use super::{Iri, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject–predicate–object statement in an optional named graph.
///
/// Identity is structural. `graph: None` is the default graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quad {
    /// IRI or blank node
    pub subject: Term,
    /// Predicate IRI
    pub predicate: Iri,
    /// Any term
    pub object: Term,
    /// Named graph (IRI or blank node), `None` for the default graph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<Term>,
}

impl Quad {
    /// Create a quad in the default graph
    pub fn new(
        subject: impl Into<Term>,
        predicate: impl Into<Iri>,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph: None,
        }
    }

    /// Builder-style: move the quad into a named graph
    #[must_use]
    pub fn in_graph(mut self, graph: impl Into<Term>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    /// Check if the quad lives in the default graph
    pub fn is_default_graph(&self) -> bool {
        self.graph.is_none()
    }
}

/// Renders as an N-Quads statement, including the trailing ` .`
impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.subject,
            Term::Iri(self.predicate.clone()),
            self.object
        )?;
        if let Some(graph) = &self.graph {
            write!(f, " {}", graph)?;
        }
        f.write_str(" .")
    }
}

/// Graph slot of a [`QuadPattern`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GraphPattern {
    /// Default graph and every named graph
    #[default]
    Any,
    /// Default graph only
    Default,
    /// One named graph
    Named(Term),
}

/// Match criteria for store reads. `None` slots are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadPattern {
    /// Required subject
    pub subject: Option<Term>,
    /// Required predicate
    pub predicate: Option<Iri>,
    /// Required object
    pub object: Option<Term>,
    /// Graph restriction
    pub graph: GraphPattern,
}

impl QuadPattern {
    /// Pattern matching every quad in every graph
    pub fn any() -> Self {
        Self::default()
    }

    /// Builder-style: fix the subject
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<Term>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Builder-style: fix the predicate
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Into<Iri>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    /// Builder-style: fix the object
    #[must_use]
    pub fn with_object(mut self, object: impl Into<Term>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Builder-style: restrict the graph
    #[must_use]
    pub fn with_graph(mut self, graph: GraphPattern) -> Self {
        self.graph = graph;
        self
    }

    /// Check a quad against every slot
    pub fn matches(&self, quad: &Quad) -> bool {
        let graph_matches = match &self.graph {
            GraphPattern::Any => true,
            GraphPattern::Default => quad.graph.is_none(),
            GraphPattern::Named(graph) => quad.graph.as_ref() == Some(graph),
        };

        graph_matches
            && self.subject.as_ref().map_or(true, |s| s == &quad.subject)
            && self.predicate.as_ref().map_or(true, |p| p == &quad.predicate)
            && self.object.as_ref().map_or(true, |o| o == &quad.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;

    fn sample() -> Quad {
        Quad::new(
            Term::iri("https://example.org/s"),
            "https://example.org/p",
            Literal::lang("o", "en"),
        )
    }

    #[test]
    fn test_quad_renders_as_nquads() {
        assert_eq!(
            sample().to_string(),
            "<https://example.org/s> <https://example.org/p> \"o\"@en ."
        );
        assert_eq!(
            sample().in_graph(Term::iri("https://example.org/g")).to_string(),
            "<https://example.org/s> <https://example.org/p> \"o\"@en <https://example.org/g> ."
        );
    }

    #[test]
    fn test_pattern_graph_slot() {
        let default_graph = sample();
        let named = sample().in_graph(Term::iri("https://example.org/g"));

        let any = QuadPattern::any();
        assert!(any.matches(&default_graph));
        assert!(any.matches(&named));

        let only_default = QuadPattern::any().with_graph(GraphPattern::Default);
        assert!(only_default.matches(&default_graph));
        assert!(!only_default.matches(&named));

        let only_named = QuadPattern::any()
            .with_graph(GraphPattern::Named(Term::iri("https://example.org/g")));
        assert!(!only_named.matches(&default_graph));
        assert!(only_named.matches(&named));
    }

    #[test]
    fn test_pattern_term_slots() {
        let quad = sample();
        assert!(QuadPattern::any()
            .with_subject(Term::iri("https://example.org/s"))
            .with_predicate("https://example.org/p")
            .matches(&quad));
        assert!(!QuadPattern::any()
            .with_object(Literal::plain("o"))
            .matches(&quad));
    }
}
