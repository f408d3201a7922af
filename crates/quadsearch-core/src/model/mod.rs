//! Quad data model and mutation batches.

mod patch;
mod quad;
mod term;

pub use patch::Patch;
pub use quad::{GraphPattern, Quad, QuadPattern};
pub use term::{Iri, Literal, Term};
