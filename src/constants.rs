/// Constants describing the corpus text artifact.
pub mod corpus {
    /// Byte that terminates every record, including the last.
    ///
    /// 0x0A never appears as a continuation byte of a multi-byte UTF-8
    /// sequence, so it is the sole record boundary for arbitrary UTF-8 text.
    pub const RECORD_TERMINATOR: u8 = b'\n';
    /// File extension for corpus artifacts.
    pub const CORPUS_EXT: &str = "txt";
}

/// Constants describing the binary offset-index artifact.
pub mod index {
    /// Width in bytes of one big-endian index entry.
    pub const ENTRY_BYTES: usize = 2;
    /// Exclusive upper bound on record start offsets an entry can encode.
    pub const MAX_OFFSET: u64 = 1 << 16;
    /// File extension for offset-index artifacts.
    pub const INDEX_EXT: &str = "idx";
}

/// Constants used by the category store and CLI defaults.
pub mod store {
    /// Default artifact directory used by the dataset builder and CLI.
    pub const DEFAULT_ROOT: &str = "./output";
    /// Categories the stock dataset builder emits.
    pub const DEFAULT_CATEGORIES: [&str; 5] = ["old", "mature", "young", "family_names", "cities"];
}
