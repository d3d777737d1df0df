#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Grouped constants for corpus and index artifacts.
pub mod constants;
mod errors;
/// Record samplers and the deterministic RNG.
pub mod sampler;
/// Category registry mapping names to corpus/index artifact pairs.
pub mod store;
/// Shared type aliases.
pub mod types;
/// Corpus and offset-index construction.
pub mod writer;

pub use errors::CorpusError;
pub use sampler::{DeterministicRng, IndexedSampler, RecordSampler, ScanningSampler};
pub use store::CategoryStore;
pub use types::{ByteOffset, CategoryName, Record, RecordIndex};
pub use writer::{CorpusArtifacts, CorpusWriter};
