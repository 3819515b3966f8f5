//! Canonical gene identifiers
//!
//! The source data refers to genes by several alternative identifiers:
//! display names, protein accessions and transcript accessions. An
//! [`IdentifierDirectory`] maps each of those identifier spaces to a gene
//! record and a gene record back to its canonical symbol.
//!
//! [`GeneDirectory`] is an in-memory directory that can be populated
//! manually or loaded from an HGNC complete-set TSV file.

use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::RankerError;
use crate::RankerResult;

/// A unique identifier of a gene record in an [`IdentifierDirectory`]
#[derive(Clone, Copy, Default, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct GeneRecordId {
    inner: u32,
}

impl GeneRecordId {
    /// Convert `self` to `u32`
    pub fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for GeneRecordId {
    type Error = RankerError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(GeneRecordId {
            inner: value.parse::<u32>()?,
        })
    }
}

impl From<u32> for GeneRecordId {
    fn from(inner: u32) -> Self {
        GeneRecordId { inner }
    }
}

impl Display for GeneRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GeneRecord:{}", self.inner)
    }
}

/// The alternative identifier spaces that resolve to a gene record
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum IdentifierSpace {
    /// Gene symbols, alias symbols and previous symbols
    DisplayName,
    /// Protein accessions, e.g. `UniProt` IDs
    ProteinAccession,
    /// Transcript accessions, e.g. `RefSeq` or `Ensembl` transcripts
    TranscriptAccession,
}

/// Resolves alternative gene identifiers to canonical gene symbols
pub trait IdentifierDirectory {
    /// The gene record of a display name
    fn by_display_name(&self, name: &str) -> Option<GeneRecordId>;

    /// The gene record of a protein accession
    fn by_protein_accession(&self, accession: &str) -> Option<GeneRecordId>;

    /// The gene record of a transcript accession
    fn by_transcript_accession(&self, accession: &str) -> Option<GeneRecordId>;

    /// The canonical symbol of a gene record
    fn symbol(&self, id: GeneRecordId) -> Option<&str>;

    /// Returns `false` if the directory cannot be queried
    fn is_available(&self) -> bool {
        true
    }
}

/// In-memory [`IdentifierDirectory`]
///
/// # Examples
///
/// ```
/// use generank::{GeneDirectory, IdentifierDirectory, IdentifierSpace};
///
/// let mut directory = GeneDirectory::default();
/// let id = directory.add_gene("BRCA1");
/// directory.add_alias(IdentifierSpace::ProteinAccession, "P38398", id);
///
/// let record = directory.by_protein_accession("P38398").unwrap();
/// assert_eq!(directory.symbol(record), Some("BRCA1"));
/// assert_eq!(directory.by_display_name("BRCA1"), Some(id));
/// ```
#[derive(Default, Debug, Clone)]
pub struct GeneDirectory {
    symbols: Vec<String>,
    display_names: HashMap<String, GeneRecordId>,
    proteins: HashMap<String, GeneRecordId>,
    transcripts: HashMap<String, GeneRecordId>,
}

impl GeneDirectory {
    /// Adds a gene with the canonical `symbol` and returns its [`GeneRecordId`]
    ///
    /// The symbol is also registered as a display name. If a gene with
    /// the same symbol already exists, its ID is returned instead.
    ///
    /// IDs are assigned sequentially, starting at `0`.
    ///
    /// # Panics
    ///
    /// Panics if the directory already holds `u32::MAX` genes
    pub fn add_gene(&mut self, symbol: &str) -> GeneRecordId {
        if let Some(id) = self
            .display_names
            .get(symbol)
            .filter(|id| self.symbol(**id) == Some(symbol))
        {
            return *id;
        }
        let inner = u32::try_from(self.symbols.len()).expect("fewer than u32::MAX genes");
        let id = GeneRecordId::from(inner);
        self.symbols.push(symbol.to_string());
        self.display_names.insert(symbol.to_string(), id);
        id
    }

    /// Registers `alias` in the identifier `space` for the gene `id`
    ///
    /// The first gene registered for an alias keeps it, later calls for
    /// the same alias are ignored. Returns `true` if the alias was added.
    pub fn add_alias(&mut self, space: IdentifierSpace, alias: &str, id: GeneRecordId) -> bool {
        let map = match space {
            IdentifierSpace::DisplayName => &mut self.display_names,
            IdentifierSpace::ProteinAccession => &mut self.proteins,
            IdentifierSpace::TranscriptAccession => &mut self.transcripts,
        };
        if alias.is_empty() || map.contains_key(alias) {
            return false;
        }
        map.insert(alias.to_string(), id);
        true
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the directory does not contain any genes
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Loads the directory from an HGNC complete-set TSV file
    ///
    /// # Errors
    ///
    /// - [`RankerError::CannotOpenFile`]: The file cannot be read
    /// - [`RankerError::InvalidInput`]: See [`GeneDirectory::from_hgnc_str`]
    pub fn from_hgnc_file<P: AsRef<Path>>(path: P) -> RankerResult<Self> {
        let filename = path.as_ref().display().to_string();
        let content = fs::read_to_string(path).map_err(|_| RankerError::CannotOpenFile(filename))?;
        Self::from_hgnc_str(&content)
    }

    /// Parses an HGNC complete-set TSV
    ///
    /// The first line must be a header with at least a `symbol` column.
    /// The following columns are used if present, all of them may contain
    /// multiple `|`-separated values:
    ///
    /// | Column | Identifier space |
    /// | --- | --- |
    /// | `alias_symbol`, `prev_symbol` | [`IdentifierSpace::DisplayName`] |
    /// | `uniprot_ids` | [`IdentifierSpace::ProteinAccession`] |
    /// | `refseq_accession`, `ensembl_transcript_id` | [`IdentifierSpace::TranscriptAccession`] |
    ///
    /// Official symbols are registered before any aliases, so an alias never
    /// shadows the official symbol of another gene.
    ///
    /// ```
    /// use generank::{GeneDirectory, IdentifierDirectory};
    ///
    /// let tsv = "hgnc_id\tsymbol\talias_symbol\tuniprot_ids\n\
    ///            HGNC:1100\tBRCA1\tRNF53\tP38398\n";
    /// let directory = GeneDirectory::from_hgnc_str(tsv).unwrap();
    /// let id = directory.by_display_name("RNF53").unwrap();
    /// assert_eq!(directory.symbol(id), Some("BRCA1"));
    /// ```
    ///
    /// # Errors
    ///
    /// [`RankerError::InvalidInput`] if the header has no `symbol` column
    /// or a data line has fewer columns than required for the `symbol`
    pub fn from_hgnc_str(content: &str) -> RankerResult<Self> {
        let mut lines = content.lines().map(|line| line.trim_end_matches('\r'));

        let header: Vec<&str> = lines.next().unwrap_or_default().split('\t').collect();
        let column = |name: &str| header.iter().position(|col| *col == name);
        let Some(symbol_col) = column("symbol") else {
            error!("HGNC file does not contain a symbol column");
            return Err(RankerError::InvalidInput(header.join("\t")));
        };

        let alias_columns = [
            (column("alias_symbol"), IdentifierSpace::DisplayName),
            (column("prev_symbol"), IdentifierSpace::DisplayName),
            (column("uniprot_ids"), IdentifierSpace::ProteinAccession),
            (column("refseq_accession"), IdentifierSpace::TranscriptAccession),
            (column("ensembl_transcript_id"), IdentifierSpace::TranscriptAccession),
        ];

        let mut directory = GeneDirectory::default();
        let mut aliases: Vec<(IdentifierSpace, &str, GeneRecordId)> = Vec::new();

        for line in lines.filter(|line| !line.is_empty()) {
            let cols: Vec<&str> = line.split('\t').collect();
            let Some(symbol) = cols.get(symbol_col).copied().map(str::trim) else {
                error!("HGNC line is missing the symbol column: {}", line);
                return Err(RankerError::InvalidInput(line.to_string()));
            };
            if symbol.is_empty() {
                continue;
            }
            let id = directory.add_gene(symbol);

            for (col, space) in alias_columns {
                let Some(value) = col.and_then(|idx| cols.get(idx).copied()) else {
                    continue;
                };
                for alias in value.split('|').map(|s| s.trim().trim_matches('"')) {
                    aliases.push((space, alias, id));
                }
            }
        }

        for (space, alias, id) in aliases {
            directory.add_alias(space, alias, id);
        }

        info!("Loaded {} genes into the identifier directory", directory.len());
        Ok(directory)
    }
}

impl IdentifierDirectory for GeneDirectory {
    fn by_display_name(&self, name: &str) -> Option<GeneRecordId> {
        self.display_names.get(name).copied()
    }

    fn by_protein_accession(&self, accession: &str) -> Option<GeneRecordId> {
        self.proteins.get(accession).copied()
    }

    fn by_transcript_accession(&self, accession: &str) -> Option<GeneRecordId> {
        self.transcripts.get(accession).copied()
    }

    fn symbol(&self, id: GeneRecordId) -> Option<&str> {
        self.symbols.get(id.as_u32() as usize).map(String::as_str)
    }

    fn is_available(&self) -> bool {
        !self.is_empty()
    }
}
