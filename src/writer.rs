use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::constants::corpus::RECORD_TERMINATOR;
use crate::constants::index::MAX_OFFSET;
use crate::errors::CorpusError;
use crate::types::ByteOffset;

/// Builds corpus and offset-index buffers from an ordered record sequence.
///
/// Records must not contain the terminator byte; the writer does not
/// validate or deduplicate them. Record identity is positional.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusWriter {
    with_index: bool,
}

impl CorpusWriter {
    /// Create a writer that produces a corpus buffer only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also produce the companion offset index.
    ///
    /// Indexing constrains every record's start offset to fit 16 bits; a
    /// corpus whose cumulative size crosses that line fails to build.
    pub fn with_index(mut self, with_index: bool) -> Self {
        self.with_index = with_index;
        self
    }

    /// Build artifact buffers for `records`, in order.
    pub fn build<I, S>(&self, records: I) -> Result<CorpusArtifacts, CorpusError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut corpus = Vec::new();
        let mut index = self.with_index.then(Vec::new);
        let mut offset: ByteOffset = 0;
        let mut record_count = 0usize;
        for (record_index, record) in records.into_iter().enumerate() {
            // Offsets advance by encoded byte length, never char count.
            let bytes = record.as_ref().as_bytes();
            if let Some(index) = index.as_mut() {
                if offset >= MAX_OFFSET {
                    return Err(CorpusError::OffsetOverflow {
                        record_index,
                        offset,
                    });
                }
                index.extend_from_slice(&(offset as u16).to_be_bytes());
            }
            corpus.extend_from_slice(bytes);
            corpus.push(RECORD_TERMINATOR);
            offset += bytes.len() as ByteOffset + 1;
            record_count = record_index + 1;
        }
        debug!(
            records = record_count,
            corpus_bytes = corpus.len(),
            index_bytes = index.as_ref().map(Vec::len).unwrap_or(0),
            "built corpus buffers"
        );
        Ok(CorpusArtifacts {
            corpus,
            index,
            record_count,
        })
    }
}

/// In-memory artifact buffers produced by one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusArtifacts {
    /// Newline-delimited record bytes, final record terminated too.
    pub corpus: Vec<u8>,
    /// Big-endian 16-bit start offsets, one entry per record.
    pub index: Option<Vec<u8>>,
    /// Number of records written into the buffers.
    pub record_count: usize,
}

impl CorpusArtifacts {
    /// Persist the buffers as whole-file replacements.
    ///
    /// When no index was built, a leftover index file at `index_path` is
    /// removed so stale offsets can never outlive the corpus they described.
    /// Callers must serialize builds against concurrent readers.
    pub fn write_to(
        &self,
        corpus_path: impl AsRef<Path>,
        index_path: impl AsRef<Path>,
    ) -> Result<(), CorpusError> {
        fs::write(corpus_path.as_ref(), &self.corpus)?;
        match &self.index {
            Some(index) => fs::write(index_path.as_ref(), index)?,
            None => match fs::remove_file(index_path.as_ref()) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn build_concatenates_records_with_terminators() {
        let artifacts = CorpusWriter::new().build(["amy", "bob", "cara"]).unwrap();
        assert_eq!(artifacts.corpus, b"amy\nbob\ncara\n");
        assert!(artifacts.index.is_none());
        assert_eq!(artifacts.record_count, 3);
    }

    #[test]
    fn build_emits_big_endian_offsets() {
        let artifacts = CorpusWriter::new()
            .with_index(true)
            .build(["amy", "bob", "cara"])
            .unwrap();
        assert_eq!(artifacts.corpus.len(), 13);
        assert_eq!(artifacts.index.as_deref(), Some([0u8, 0, 0, 4, 0, 8].as_slice()));
    }

    #[test]
    fn offsets_advance_by_byte_length() {
        // 'ž' encodes as two bytes, so the second record starts at 6 + 1.
        let artifacts = CorpusWriter::new()
            .with_index(true)
            .build(["žofia", "amy"])
            .unwrap();
        assert_eq!(artifacts.index.as_deref(), Some([0u8, 0, 0, 7].as_slice()));
    }

    #[test]
    fn overflowing_offset_fails_at_the_offending_record() {
        let big = "x".repeat(MAX_OFFSET as usize - 1);
        let err = CorpusWriter::new()
            .with_index(true)
            .build([big.as_str(), "tail"])
            .unwrap_err();
        match err {
            CorpusError::OffsetOverflow {
                record_index,
                offset,
            } => {
                assert_eq!(record_index, 1);
                assert_eq!(offset, MAX_OFFSET);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unindexed_build_allows_large_corpora() {
        let big = "x".repeat(MAX_OFFSET as usize);
        let artifacts = CorpusWriter::new().build([big.as_str(), "tail"]).unwrap();
        assert_eq!(artifacts.corpus.len(), MAX_OFFSET as usize + 1 + 5);
        assert!(artifacts.index.is_none());
    }

    #[test]
    fn empty_input_builds_empty_buffers() {
        let artifacts = CorpusWriter::new()
            .with_index(true)
            .build(std::iter::empty::<&str>())
            .unwrap();
        assert!(artifacts.corpus.is_empty());
        assert_eq!(artifacts.index.as_deref(), Some([].as_slice()));
        assert_eq!(artifacts.record_count, 0);
    }

    #[test]
    fn write_to_truncates_previous_artifacts() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("names.txt");
        let index_path = dir.path().join("names.idx");

        let writer = CorpusWriter::new().with_index(true);
        writer
            .build(["annabelle", "bartholomew"])
            .unwrap()
            .write_to(&corpus_path, &index_path)
            .unwrap();
        let long_corpus = fs::metadata(&corpus_path).unwrap().len();

        writer
            .build(["amy"])
            .unwrap()
            .write_to(&corpus_path, &index_path)
            .unwrap();
        assert!(fs::metadata(&corpus_path).unwrap().len() < long_corpus);
        assert_eq!(fs::read(&corpus_path).unwrap(), b"amy\n");
        assert_eq!(fs::read(&index_path).unwrap(), [0u8, 0]);
    }

    #[test]
    fn unindexed_rebuild_removes_stale_index() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("names.txt");
        let index_path = dir.path().join("names.idx");

        CorpusWriter::new()
            .with_index(true)
            .build(["amy"])
            .unwrap()
            .write_to(&corpus_path, &index_path)
            .unwrap();
        assert!(index_path.exists());

        CorpusWriter::new()
            .build(["amy", "bob"])
            .unwrap()
            .write_to(&corpus_path, &index_path)
            .unwrap();
        assert!(!index_path.exists());
    }
}
