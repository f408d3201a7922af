//! RDF terms.
//!
//! Terms render in N-Quads syntax through [`std::fmt::Display`]. That rendering
//! is canonical: two terms render identically iff they are equal, which is what
//! the skolemizer relies on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An absolute IRI, stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Wrap an IRI string
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Borrow the IRI string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the IRI string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A literal value with an optional language tag or datatype.
///
/// Equality is structural: `"a"`, `"a"@en` and `"a"^^xsd:string` are three
/// different literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datatype: Option<Iri>,
}

impl Literal {
    /// A literal with neither language nor datatype
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// A language-tagged literal
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// A datatyped literal
    pub fn typed(value: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    /// Lexical form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Language tag, if any
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Datatype IRI, if any
    pub fn datatype(&self) -> Option<&Iri> {
        self.datatype.as_ref()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        write_escaped_string(f, &self.value)?;
        f.write_str("\"")?;
        if let Some(language) = &self.language {
            write!(f, "@{}", language)?;
        }
        if let Some(datatype) = &self.datatype {
            f.write_str("^^")?;
            write_iri(f, datatype.as_str())?;
        }
        Ok(())
    }
}

/// A term in any quad position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Term {
    /// Named node
    Iri(Iri),
    /// Blank node, identified by its store-assigned label
    BlankNode(String),
    /// Literal value
    Literal(Literal),
}

impl Term {
    /// Named node constructor
    pub fn iri(iri: impl Into<Iri>) -> Self {
        Self::Iri(iri.into())
    }

    /// Blank node constructor
    pub fn blank(label: impl Into<String>) -> Self {
        Self::BlankNode(label.into())
    }

    /// The IRI string, blank label, or literal lexical form
    pub fn value(&self) -> &str {
        match self {
            Self::Iri(iri) => iri.as_str(),
            Self::BlankNode(label) => label,
            Self::Literal(literal) => literal.value(),
        }
    }

    /// Check if this term is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Borrow the literal, if this term is one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Borrow the IRI, if this term is one
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(value: Iri) -> Self {
        Self::Iri(value)
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write_iri(f, iri.as_str()),
            Self::BlankNode(label) => write!(f, "_:{}", label),
            Self::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

fn write_iri(f: &mut fmt::Formatter<'_>, iri: &str) -> fmt::Result {
    f.write_str("<")?;
    for c in iri.chars() {
        match c {
            '>' => f.write_str("\\u003E")?,
            '\\' => f.write_str("\\u005C")?,
            _ => write!(f, "{}", c)?,
        }
    }
    f.write_str(">")
}

fn write_escaped_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            _ => write!(f, "{}", c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::XSD_STRING;

    #[test]
    fn test_literal_equality_is_structural() {
        let plain = Literal::plain("Ethan");
        let tagged = Literal::lang("Ethan", "en");
        let typed = Literal::typed("Ethan", XSD_STRING);

        assert_ne!(plain, tagged);
        assert_ne!(plain, typed);
        assert_ne!(tagged, typed);
        assert_eq!(plain, Literal::plain("Ethan"));
    }

    #[test]
    fn test_nquads_rendering() {
        assert_eq!(
            Term::iri("https://example.org/s").to_string(),
            "<https://example.org/s>"
        );
        assert_eq!(Term::blank("b0").to_string(), "_:b0");
        assert_eq!(
            Term::from(Literal::lang("Hello", "en")).to_string(),
            "\"Hello\"@en"
        );
        assert_eq!(
            Term::from(Literal::typed("Hello", XSD_STRING)).to_string(),
            "\"Hello\"^^<http://www.w3.org/2001/XMLSchema#string>"
        );
    }

    #[test]
    fn test_literal_escaping() {
        let literal = Literal::plain("say \"hi\"\nthen \\ leave");
        assert_eq!(literal.to_string(), r#""say \"hi\"\nthen \\ leave""#);
    }

    #[test]
    fn test_term_json_is_tagged() {
        let json = serde_json::to_value(Term::iri("https://example.org/s")).unwrap();
        assert_eq!(json["type"], "iri");
        assert_eq!(json["value"], "https://example.org/s");

        let json = serde_json::to_value(Term::from(Literal::lang("o", "en"))).unwrap();
        assert_eq!(json["type"], "literal");
        assert_eq!(json["value"]["language"], "en");
        assert!(json["value"].get("datatype").is_none());
    }
}
