//! Library half of the `qs` binary: argument definitions, the N-Quads reader,
//! the in-memory pipeline and the command implementations.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod nquads;
pub mod pipeline;
