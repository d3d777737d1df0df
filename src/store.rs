use std::fs;
use std::path::{Path, PathBuf};

use rand::RngCore;
use tracing::debug;

use crate::constants::corpus::CORPUS_EXT;
use crate::constants::index::INDEX_EXT;
use crate::errors::CorpusError;
use crate::sampler::{IndexedSampler, RecordSampler, ScanningSampler};
use crate::types::{CategoryName, Record};
use crate::writer::CorpusWriter;

/// Closed registry of categories mapped to corpus/index artifacts.
///
/// Each known category owns `{category}.txt` and, optionally,
/// `{category}.idx` under one root directory. The category set is supplied
/// at construction and never grows; requests outside it are rejected with
/// the valid set named in the error.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    root: PathBuf,
    categories: Vec<CategoryName>,
}

impl CategoryStore {
    /// Create a store over `root` for a fixed set of category names.
    pub fn new<I, S>(root: impl Into<PathBuf>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CategoryName>,
    {
        Self {
            root: root.into(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Known category names, in registration order.
    pub fn categories(&self) -> &[CategoryName] {
        &self.categories
    }

    /// Directory the artifacts live under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the corpus artifact for `category`.
    pub fn corpus_path(&self, category: &str) -> PathBuf {
        self.root.join(format!("{category}.{CORPUS_EXT}"))
    }

    /// Path of the offset-index artifact for `category`.
    pub fn index_path(&self, category: &str) -> PathBuf {
        self.root.join(format!("{category}.{INDEX_EXT}"))
    }

    fn require_known(&self, category: &str) -> Result<(), CorpusError> {
        if self.categories.iter().any(|known| known == category) {
            return Ok(());
        }
        Err(CorpusError::InvalidCategory {
            requested: category.to_string(),
            known: self.categories.clone(),
        })
    }

    /// Persist corpus (and optionally index) artifacts for `category`.
    ///
    /// A rebuild fully replaces both files; a leftover index from an earlier
    /// indexed build is removed when `with_index` is false. Builds must not
    /// run concurrently with reads of the same category.
    pub fn write_category<I, S>(
        &self,
        category: &str,
        records: I,
        with_index: bool,
    ) -> Result<(), CorpusError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.require_known(category)?;
        fs::create_dir_all(&self.root)?;
        let artifacts = CorpusWriter::new().with_index(with_index).build(records)?;
        artifacts.write_to(self.corpus_path(category), self.index_path(category))?;
        debug!(
            category,
            records = artifacts.record_count,
            corpus_bytes = artifacts.corpus.len(),
            indexed = artifacts.index.is_some(),
            "wrote category artifacts"
        );
        Ok(())
    }

    /// Open the sampler matching the artifacts present for `category`.
    ///
    /// An offset index selects the O(1) uniform sampler; a bare corpus falls
    /// back to the length-biased scanning sampler.
    pub fn sampler_for(&self, category: &str) -> Result<Box<dyn RecordSampler>, CorpusError> {
        self.require_known(category)?;
        let corpus_path = self.corpus_path(category);
        let index_path = self.index_path(category);
        if index_path.exists() {
            debug!(category, "sampling through offset index");
            Ok(Box::new(IndexedSampler::open(corpus_path, index_path)?))
        } else {
            debug!(category, "sampling by corpus scan");
            Ok(Box::new(ScanningSampler::open(corpus_path)?))
        }
    }

    /// Draw exactly one record from `category`.
    pub fn sample(&self, category: &str, rng: &mut dyn RngCore) -> Result<Record, CorpusError> {
        self.sampler_for(category)?.sample_one(rng)
    }

    /// Draw a first name and a family name and join them with a space.
    pub fn sample_full_name(
        &self,
        first_category: &str,
        family_category: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Record, CorpusError> {
        let first = self.sample(first_category, rng)?;
        let family = self.sample(family_category, rng)?;
        Ok(format!("{first} {family}"))
    }
}
