//! # Quadsearch Embedding Providers
//!
//! Implementations of [`quadsearch_core::EmbeddingProvider`]:
//!
//! - [`HashingEmbeddingProvider`]: deterministic and offline. Hashes word and
//!   character-trigram features into a fixed number of buckets. Good enough
//!   for tests, demos and lexical-leaning search without a model server.
//! - [`OllamaEmbeddingProvider`]: calls a local or remote Ollama server.
//!
//! [`create_provider`] builds whichever one the configuration selects.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod factory;
pub mod hashing;
pub mod ollama;

pub use factory::create_provider;
pub use hashing::HashingEmbeddingProvider;
pub use ollama::OllamaEmbeddingProvider;
