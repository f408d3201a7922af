//! Configuration components, one per concern.

pub mod delivery;
pub mod embedding;
pub mod index;
pub mod logging;

pub use delivery::*;
pub use embedding::*;
pub use index::*;
pub use logging::*;
