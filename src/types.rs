/// One newline-free UTF-8 record stored in a corpus.
/// Examples: `Rosalind`, `Lisbon, Portugal`
pub type Record = String;
/// Name of a category partition with its own corpus/index pair.
/// Examples: `old`, `mature`, `young`, `family_names`, `cities`
pub type CategoryName = String;
/// Zero-based position of a record in corpus build order.
pub type RecordIndex = u64;
/// Byte position inside a corpus artifact.
pub type ByteOffset = u64;
