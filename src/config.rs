//! Run configuration
//!
//! A [`Config`] is created once per run and handed to
//! [`DiseaseGeneRanking::new`](`crate::DiseaseGeneRanking::new`) and
//! [`CachedFetcher::new`](`crate::CachedFetcher::new`). Nothing in this crate
//! reads global state.

use std::path::{Path, PathBuf};

use crate::RankerError;
use crate::RankerResult;

/// Environment variable holding the base url of the remote data source
pub const ENV_BASE_URL: &str = "GENERANK_BASE_URL";
/// Environment variable holding the cache directory
pub const ENV_CACHE_DIR: &str = "GENERANK_CACHE_DIR";

const DEFAULT_CACHE_DIR: &str = ".generank_cache";
const DEFAULT_DISEASE_LIST: &str = "disease_list.txt";
const DEFAULT_GENE_LIST: &str = "gene_list.txt";
const DEFAULT_RANK_SUFFIX: &str = ".txt";

/// Locations of the remote source data and the local download cache
///
/// # Examples
///
/// ```
/// use generank::Config;
///
/// let config = Config::new("https://example.org/ranks/")
///     .with_cache_dir("/tmp/generank")
///     .with_rank_file_suffix(".tsv");
///
/// assert_eq!(
///     config.url_for("disease_list.txt").unwrap(),
///     "https://example.org/ranks/disease_list.txt"
/// );
/// assert_eq!(
///     config.rank_file_url("D001").unwrap(),
///     "https://example.org/ranks/D001.tsv"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: Option<String>,
    cache_dir: PathBuf,
    disease_list_file: String,
    gene_list_file: String,
    rank_file_suffix: String,
}

impl Default for Config {
    /// A configuration without a base url
    ///
    /// Building a [`DiseaseGeneRanking`](`crate::DiseaseGeneRanking`) from it
    /// fails with [`RankerError::MissingBaseUrl`]
    fn default() -> Self {
        Self {
            base_url: None,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            disease_list_file: DEFAULT_DISEASE_LIST.to_string(),
            gene_list_file: DEFAULT_GENE_LIST.to_string(),
            rank_file_suffix: DEFAULT_RANK_SUFFIX.to_string(),
        }
    }
}

impl Config {
    /// Creates a new `Config` with default file names and cache location
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Creates a `Config` from the environment
    ///
    /// Reads the base url from `GENERANK_BASE_URL` and the cache directory
    /// from `GENERANK_CACHE_DIR`. Missing variables fall back to the defaults,
    /// i.e. the base url stays unset.
    pub fn from_env() -> Self {
        let mut config = Self {
            base_url: std::env::var(ENV_BASE_URL)
                .ok()
                .filter(|url| !url.trim().is_empty()),
            ..Default::default()
        };
        if let Ok(dir) = std::env::var(ENV_CACHE_DIR) {
            config.cache_dir = PathBuf::from(dir);
        }
        config
    }

    /// Sets the directory for downloaded artifacts
    #[must_use]
    pub fn with_cache_dir<P: Into<PathBuf>>(mut self, cache_dir: P) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Sets the filename of the disease list
    #[must_use]
    pub fn with_disease_list_file<S: Into<String>>(mut self, filename: S) -> Self {
        self.disease_list_file = filename.into();
        self
    }

    /// Sets the filename of the gene list
    #[must_use]
    pub fn with_gene_list_file<S: Into<String>>(mut self, filename: S) -> Self {
        self.gene_list_file = filename.into();
        self
    }

    /// Sets the suffix that is appended to a disease code to name its rank artifact
    #[must_use]
    pub fn with_rank_file_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.rank_file_suffix = suffix.into();
        self
    }

    /// The base url, if configured
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// The directory holding downloaded artifacts
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Filename of the disease list artifact
    pub fn disease_list_file(&self) -> &str {
        &self.disease_list_file
    }

    /// Filename of the gene list artifact
    pub fn gene_list_file(&self) -> &str {
        &self.gene_list_file
    }

    /// Returns the full url of `filename`
    ///
    /// # Errors
    ///
    /// [`RankerError::MissingBaseUrl`] if no base url is configured
    pub fn url_for(&self, filename: &str) -> RankerResult<String> {
        let base = self.base_url.as_deref().ok_or(RankerError::MissingBaseUrl)?;
        Ok(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            filename.trim_start_matches('/')
        ))
    }

    /// Returns the url of the rank artifact for the internal disease code `code`
    ///
    /// # Errors
    ///
    /// [`RankerError::MissingBaseUrl`] if no base url is configured
    pub fn rank_file_url(&self, code: &str) -> RankerResult<String> {
        self.url_for(&format!("{code}{}", self.rank_file_suffix))
    }
}
