//! Index-worthiness predicate.
//!
//! Only textual literals are searchable. A quad qualifies when its object is a
//! literal that has a language tag, or no datatype, or exactly `xsd:string`.
//! IRIs, blank nodes and literals of any other datatype (numbers, booleans,
//! dates) are excluded.

use crate::model::{Quad, Term};
use crate::vocab::XSD_STRING;

/// Check whether a term is a string-valued literal
pub fn is_string_literal(term: &Term) -> bool {
    let Some(literal) = term.as_literal() else {
        return false;
    };

    literal.language().is_some()
        || literal
            .datatype()
            .map_or(true, |datatype| datatype.as_str() == XSD_STRING)
}

/// Check whether a quad belongs in the search index
pub fn is_indexable(quad: &Quad) -> bool {
    is_string_literal(&quad.object)
}
