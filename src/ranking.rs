//! Building the ranked gene tables of all requested diseases

use std::ops::Index;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, warn};

use crate::disease::{normalize_disease_id, DiseaseIndex};
use crate::gene::GeneIndex;
use crate::parser::rank_list;
use crate::table::{RankedGene, RankedTable};
use crate::Config;
use crate::Fetch;
use crate::IdentifierDirectory;
use crate::RankerError;
use crate::RankerResult;

/// Builds the [`RankedTable`] of single diseases
///
/// The builder borrows the shared [`DiseaseIndex`] and [`GeneIndex`] and
/// fetches the rank artifact of every disease it builds.
pub struct RankTableBuilder<'a, F> {
    diseases: &'a DiseaseIndex,
    genes: &'a GeneIndex,
    fetcher: &'a F,
    config: &'a Config,
}

impl<'a, F: Fetch> RankTableBuilder<'a, F> {
    /// Creates a new `RankTableBuilder`
    pub fn new(
        diseases: &'a DiseaseIndex,
        genes: &'a GeneIndex,
        fetcher: &'a F,
        config: &'a Config,
    ) -> Self {
        Self {
            diseases,
            genes,
            fetcher,
            config,
        }
    }

    /// The internal disease code of the requested identifier `disease_id`
    ///
    /// # Errors
    ///
    /// - [`RankerError::InvalidDiseaseId`]: `disease_id` does not contain any digits
    /// - [`RankerError::UnknownDisease`]: `disease_id` is not part of the disease list
    pub fn code(&self, disease_id: &str) -> RankerResult<&'a str> {
        let external_id = normalize_disease_id(disease_id)
            .ok_or_else(|| RankerError::InvalidDiseaseId(disease_id.to_string()))?;
        self.diseases
            .code(external_id)
            .ok_or_else(|| RankerError::UnknownDisease(disease_id.to_string()))
    }

    /// Fetches the rank artifact of the disease `code` and builds its table
    ///
    /// # Errors
    ///
    /// - [`RankerError::MissingBaseUrl`]: No base url configured
    /// - [`RankerError::Fetch`]: The rank artifact cannot be fetched
    /// - [`RankerError::InvalidInput`] or [`RankerError::ParseIntError`]: The rank artifact is malformed
    pub fn build_code(&self, code: &str) -> RankerResult<RankedTable> {
        let url = self.config.rank_file_url(code)?;
        let content = self.fetcher.fetch(&url)?;
        let table = self.table_from_rank_list(&content)?;
        debug!("Built table of {} with {} genes", code, table.len());
        Ok(table)
    }

    /// Builds the table of the requested identifier `disease_id`
    ///
    /// Returns the internal disease code together with the table.
    ///
    /// # Errors
    ///
    /// All errors of [`RankTableBuilder::code`] and [`RankTableBuilder::build_code`]
    pub fn build(&self, disease_id: &str) -> RankerResult<(&'a str, RankedTable)> {
        let code = self.code(disease_id)?;
        Ok((code, self.build_code(code)?))
    }

    /// Folds the rows of a rank artifact into a [`RankedTable`]
    ///
    /// Rows whose gene cannot be resolved are skipped. A symbol that
    /// appears in several rows keeps the smallest rank.
    pub fn table_from_rank_list(&self, content: &str) -> RankerResult<RankedTable> {
        let mut table = RankedTable::default();
        for row in rank_list::parse(content)? {
            let Some(symbol) = self.genes.symbol(row.row) else {
                continue;
            };
            table.insert(symbol, RankedGene::new(row.rank, row.score));
        }
        table.sort();
        Ok(table)
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Ranked candidate genes of a set of diseases
///
/// `DiseaseGeneRanking` is the main interface of this crate. It holds one
/// [`RankedTable`] per requested disease, keyed by the internal disease code.
/// All tables are built once, during construction, and are read-only
/// afterwards.
///
/// # Construction
///
/// ```mermaid
/// flowchart LR
///     DL[disease list] --> DI[DiseaseIndex]
///     GL[gene list] --> GI[GeneIndex]
///     DIR[IdentifierDirectory] --> GI
///     ID[requested ids] --> B[RankTableBuilder]
///     DI --> B
///     GI --> B
///     RL[rank artifact per disease] --> B
///     B --> R[DiseaseGeneRanking]
/// ```
///
/// Requested identifiers that contain no digits or are not part of the
/// disease list are logged and skipped. They are listed in
/// [`DiseaseGeneRanking::skipped`]. Callers must expect that some
/// requested identifiers have no table.
///
/// # Examples
///
/// ```
/// use generank::{Config, DiseaseGeneRanking, GeneDirectory, RankerError, RankerResult};
///
/// let mut directory = GeneDirectory::default();
/// directory.add_gene("GENE3");
///
/// let fetcher = |url: &str| -> RankerResult<String> {
///     match url {
///         "http://localhost/disease_list.txt" => Ok("D001\t100001\n".to_string()),
///         "http://localhost/gene_list.txt" => Ok(
///             "1\t-\t-\t-\t-\n2\t-\t-\t-\t-\n3\t-\t-\t-\tGENE3\n".to_string()
///         ),
///         "http://localhost/D001.txt" => Ok("3\t0.91\n3\t0.50\n".to_string()),
///         _ => Err(RankerError::Fetch { url: url.to_string(), reason: "404".to_string() }),
///     }
/// };
///
/// let ranking = DiseaseGeneRanking::new(
///     &Config::new("http://localhost"),
///     &directory,
///     &fetcher,
///     ["100001", "100999 (suspected)"],
/// ).unwrap();
///
/// assert_eq!(ranking.len(), 1);
/// assert_eq!(ranking.skipped(), ["100999 (suspected)"]);
///
/// let table = &ranking["D001"];
/// assert_eq!(table.len(), 1);
/// assert_eq!(table["GENE3"].rank(), 1);
/// assert_eq!(table["GENE3"].score().as_str(), "0.91");
/// ```
#[derive(Debug, Default, Clone)]
pub struct DiseaseGeneRanking {
    tables: IndexMap<String, RankedTable>,
    skipped: Vec<String>,
}

impl DiseaseGeneRanking {
    /// Fetches all source data and builds the tables of `disease_ids`
    ///
    /// `disease_ids` can be any collection of identifiers, duplicates
    /// are built only once.
    ///
    /// # Errors
    ///
    /// - [`RankerError::MissingBaseUrl`]: `config` has no base url
    /// - [`RankerError::DirectoryUnavailable`]: `directory` cannot be queried
    /// - [`RankerError::Fetch`]: Any artifact cannot be fetched
    /// - [`RankerError::InvalidInput`] or [`RankerError::ParseIntError`]: Any artifact is malformed
    pub fn new<D, F, I, S>(
        config: &Config,
        directory: &D,
        fetcher: &F,
        disease_ids: I,
    ) -> RankerResult<Self>
    where
        D: IdentifierDirectory,
        F: Fetch,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if config.base_url().is_none() {
            return Err(RankerError::MissingBaseUrl);
        }
        if !directory.is_available() {
            return Err(RankerError::DirectoryUnavailable);
        }

        let disease_list = fetcher.fetch(&config.url_for(config.disease_list_file())?)?;
        let gene_list = fetcher.fetch(&config.url_for(config.gene_list_file())?)?;

        Self::from_artifacts(
            &disease_list,
            &gene_list,
            directory,
            fetcher,
            config,
            disease_ids,
        )
    }

    /// Builds the tables of `disease_ids` from already retrieved shared artifacts
    ///
    /// Only the per-disease rank artifacts are fetched.
    ///
    /// # Errors
    ///
    /// Same as [`DiseaseGeneRanking::new`]
    pub fn from_artifacts<D, F, I, S>(
        disease_list: &str,
        gene_list: &str,
        directory: &D,
        fetcher: &F,
        config: &Config,
        disease_ids: I,
    ) -> RankerResult<Self>
    where
        D: IdentifierDirectory,
        F: Fetch,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if config.base_url().is_none() {
            return Err(RankerError::MissingBaseUrl);
        }
        if !directory.is_available() {
            return Err(RankerError::DirectoryUnavailable);
        }

        let diseases = DiseaseIndex::build(disease_list)?;
        let genes = GeneIndex::build(gene_list, directory)?;
        let builder = RankTableBuilder::new(&diseases, &genes, fetcher, config);

        let requested: IndexSet<String> = disease_ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect();

        let mut ranking = Self::default();
        for disease_id in &requested {
            let code = match builder.code(disease_id) {
                Ok(code) => code,
                Err(err) if err.is_recoverable() => {
                    warn!("Skipping {}: {}", disease_id, err);
                    ranking.skipped.push(disease_id.clone());
                    continue;
                }
                Err(err) => return Err(err),
            };
            if ranking.tables.contains_key(code) {
                continue;
            }
            let table = builder.build_code(code)?;
            ranking.tables.insert(code.to_string(), table);
        }

        info!(
            "Built {} disease tables, skipped {} identifiers",
            ranking.len(),
            ranking.skipped.len()
        );
        Ok(ranking)
    }

    /// Internal codes of all diseases with a table, in the requested order
    pub fn diseases(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// The table of the disease with the internal code `code`
    pub fn table(&self, code: &str) -> Option<&RankedTable> {
        self.tables.get(code)
    }

    /// Returns `true` if a table for the internal code `code` exists
    pub fn contains(&self, code: &str) -> bool {
        self.tables.contains_key(code)
    }

    /// Requested identifiers that were skipped
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no table was built
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterates all internal disease codes and their tables
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RankedTable)> {
        self.tables.iter().map(|(code, table)| (code.as_str(), table))
    }
}

impl Index<&str> for DiseaseGeneRanking {
    type Output = RankedTable;

    /// Returns the table of the internal disease code `code`
    ///
    /// # Panics
    ///
    /// Panics if no table exists for `code`
    fn index(&self, code: &str) -> &Self::Output {
        &self.tables[code]
    }
}

impl<'a> IntoIterator for &'a DiseaseGeneRanking {
    type Item = (&'a String, &'a RankedTable);
    type IntoIter = indexmap::map::Iter<'a, String, RankedTable>;
    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
