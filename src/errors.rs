use std::io;

use thiserror::Error;

use crate::types::{ByteOffset, CategoryName};

/// Error type for corpus construction, artifact validation, and sampling failures.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("record {record_index} starts at byte {offset}, which does not fit a 16-bit index entry")]
    OffsetOverflow {
        record_index: usize,
        offset: ByteOffset,
    },
    #[error("corpus contains no records")]
    EmptyCorpus,
    #[error("offset index is corrupt: {0}")]
    CorruptIndex(String),
    #[error("record bytes are not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
    #[error("unknown category '{}'; known categories: {}", .requested, .known.join(", "))]
    InvalidCategory {
        requested: CategoryName,
        known: Vec<CategoryName>,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
