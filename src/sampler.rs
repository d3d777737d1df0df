use rand::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::constants::corpus::RECORD_TERMINATOR;
use crate::constants::index::ENTRY_BYTES;
use crate::errors::CorpusError;
use crate::types::{ByteOffset, Record, RecordIndex};

/// Small deterministic RNG used for reproducible sampling.
///
/// splitmix64; not cryptographic. Two instances built from the same seed
/// replay the same draw sequence, which is what tests and `--seed` rely on.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create an RNG whose draws are fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// One sampling capability over a corpus artifact set: produce one record.
///
/// The two implementations trade cost against distribution:
/// [`IndexedSampler`] is uniform over records in O(1) I/O, while
/// [`ScanningSampler`] needs no index but favors longer records.
pub trait RecordSampler {
    /// Draw one record using the injected random source.
    fn sample_one(&mut self, rng: &mut dyn RngCore) -> Result<Record, CorpusError>;
}

/// Read bytes up to the record terminator or end-of-file, terminator excluded.
fn read_record(reader: &mut impl BufRead) -> Result<Record, CorpusError> {
    let mut bytes = Vec::new();
    reader.read_until(RECORD_TERMINATOR, &mut bytes)?;
    if bytes.last() == Some(&RECORD_TERMINATOR) {
        bytes.pop();
    }
    Ok(String::from_utf8(bytes)?)
}

/// Uniform-over-records sampler backed by a corpus file and its offset index.
///
/// Each draw costs two fixed-size reads plus one read bounded by the longest
/// record, independent of corpus size; neither artifact is loaded whole.
pub struct IndexedSampler {
    corpus: BufReader<File>,
    index: File,
    corpus_len: u64,
    record_count: RecordIndex,
}

impl IndexedSampler {
    /// Open a corpus/index pair, validating the index shape.
    pub fn open(
        corpus_path: impl AsRef<Path>,
        index_path: impl AsRef<Path>,
    ) -> Result<Self, CorpusError> {
        let index = File::open(index_path.as_ref())?;
        let index_len = index.metadata()?.len();
        if index_len % ENTRY_BYTES as u64 != 0 {
            return Err(CorpusError::CorruptIndex(format!(
                "index length {index_len} is not a multiple of {ENTRY_BYTES}"
            )));
        }
        let record_count = index_len / ENTRY_BYTES as u64;
        if record_count == 0 {
            return Err(CorpusError::EmptyCorpus);
        }
        let corpus = File::open(corpus_path.as_ref())?;
        let corpus_len = corpus.metadata()?.len();
        Ok(Self {
            corpus: BufReader::new(corpus),
            index,
            corpus_len,
            record_count,
        })
    }

    /// Number of records the index covers.
    pub fn record_count(&self) -> RecordIndex {
        self.record_count
    }

    /// Read the record at `record_index` through the offset index.
    pub fn record_at(&mut self, record_index: RecordIndex) -> Result<Record, CorpusError> {
        if record_index >= self.record_count {
            return Err(CorpusError::CorruptIndex(format!(
                "record index {record_index} out of range for {} records",
                self.record_count
            )));
        }
        let mut entry = [0u8; ENTRY_BYTES];
        self.index
            .seek(SeekFrom::Start(record_index * ENTRY_BYTES as u64))?;
        self.index.read_exact(&mut entry)?;
        let offset = ByteOffset::from(u16::from_be_bytes(entry));
        if offset >= self.corpus_len {
            return Err(CorpusError::CorruptIndex(format!(
                "entry {record_index} points at byte {offset}, past corpus end {}",
                self.corpus_len
            )));
        }
        self.corpus.seek(SeekFrom::Start(offset))?;
        read_record(&mut self.corpus)
    }
}

impl RecordSampler for IndexedSampler {
    /// Every record is equally likely; the draw covers the full inclusive
    /// range up to and including the last record.
    fn sample_one(&mut self, rng: &mut dyn RngCore) -> Result<Record, CorpusError> {
        let drawn = rng.random_range(0..self.record_count);
        self.record_at(drawn)
    }
}

/// Length-biased sampler that needs only the corpus file.
///
/// The draw picks a uniform byte offset, so the chance of landing inside a
/// record is proportional to its byte length plus one. That bias is the
/// price of skipping the index; it is intentional, not a defect to equalize.
pub struct ScanningSampler {
    corpus: File,
    size: u64,
}

impl ScanningSampler {
    /// Open a bare corpus file.
    pub fn open(corpus_path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let corpus = File::open(corpus_path.as_ref())?;
        let size = corpus.metadata()?.len();
        if size == 0 {
            return Err(CorpusError::EmptyCorpus);
        }
        Ok(Self { corpus, size })
    }

    /// Corpus size in bytes.
    pub fn corpus_len(&self) -> u64 {
        self.size
    }

    /// Return the record whose bytes enclose `start_offset`.
    ///
    /// A record's span here is its content bytes plus its terminator, so
    /// sweeping every offset visits each record `byte_len + 1` times.
    pub fn record_enclosing(&mut self, start_offset: ByteOffset) -> Result<Record, CorpusError> {
        let start = self.scan_back_to_record_start(start_offset)?;
        self.corpus.seek(SeekFrom::Start(start))?;
        read_record(&mut BufReader::new(&mut self.corpus))
    }

    /// Walk backward one byte at a time until the previous terminator or
    /// byte 0; the record starts just after the terminator.
    fn scan_back_to_record_start(
        &mut self,
        start_offset: ByteOffset,
    ) -> Result<ByteOffset, CorpusError> {
        if start_offset == 0 {
            return Ok(0);
        }
        let mut pos = start_offset - 1;
        loop {
            self.corpus.seek(SeekFrom::Start(pos))?;
            let mut byte = [0u8; 1];
            self.corpus.read_exact(&mut byte)?;
            if byte[0] == RECORD_TERMINATOR {
                return Ok(pos + 1);
            }
            if pos == 0 {
                return Ok(0);
            }
            pos -= 1;
        }
    }
}

impl RecordSampler for ScanningSampler {
    fn sample_one(&mut self, rng: &mut dyn RngCore) -> Result<Record, CorpusError> {
        let start_offset = rng.random_range(0..self.size);
        self.record_enclosing(start_offset)
    }
}
