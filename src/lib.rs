#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
use std::num::ParseIntError;
use thiserror::Error;

pub mod config;
pub mod directory;
pub mod disease;
pub mod fetch;
pub mod gene;
mod parser;
pub mod ranking;
pub mod table;

pub use config::Config;
pub use directory::{GeneDirectory, GeneRecordId, IdentifierDirectory, IdentifierSpace};
pub use disease::{normalize_disease_id, DiseaseIndex};
pub use fetch::{CachedFetcher, Fetch};
pub use gene::GeneIndex;
pub use ranking::{DiseaseGeneRanking, RankTableBuilder};
pub use table::{RankedGene, RankedTable, Score};

/// Main Error type for this crate
///
/// Only the configuration, fetch and parse errors are ever returned from
/// [`DiseaseGeneRanking::new`]. [`RankerError::InvalidDiseaseId`] and
/// [`RankerError::UnknownDisease`] describe requested disease identifiers
/// that are skipped during construction.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RankerError {
    /// No base location to fetch the source data from is configured
    #[error("base url for fetching is not configured")]
    MissingBaseUrl,
    /// The identifier directory is missing or empty
    #[error("identifier directory is not available")]
    DirectoryUnavailable,
    /// Failed to open or write a file
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// A line of a source artifact is malformed
    #[error("invalid data: {0}")]
    InvalidInput(String),
    /// Failed to parse an integer
    #[error("unable to parse Integer")]
    ParseIntError,
    /// Failed to download a source artifact
    #[error("unable to fetch {url}: {reason}")]
    Fetch {
        /// The requested url
        url: String,
        /// Description of the underlying failure
        reason: String,
    },
    /// A requested disease identifier does not contain any digits
    #[error("invalid disease identifier {0}")]
    InvalidDiseaseId(String),
    /// A requested disease identifier is not part of the disease list
    #[error("disease {0} does not exist")]
    UnknownDisease(String),
}

impl From<ParseIntError> for RankerError {
    fn from(_: ParseIntError) -> Self {
        RankerError::ParseIntError
    }
}

/// Shortcut for `Result<T, RankerError>`
pub type RankerResult<T> = Result<T, RankerError>;

impl RankerError {
    /// Returns `true` for errors that only affect a single requested disease
    ///
    /// Such diseases are skipped while building a [`DiseaseGeneRanking`],
    /// all other errors abort the build.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RankerError::InvalidDiseaseId(_) | RankerError::UnknownDisease(_)
        )
    }
}
