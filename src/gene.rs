//! Gene Index: row numbers of the gene list resolved to canonical symbols

use std::ops::Index;

use tracing::info;

use crate::directory::{GeneRecordId, IdentifierDirectory};
use crate::parser::gene_list::{self, GeneRow};
use crate::RankerResult;

/// Looks up a single identifier space of a directory
type Lookup<D> = fn(&D, &GeneRow<'_>) -> Option<GeneRecordId>;

/// Identifier spaces in the order they are tried
///
/// Display names are the most trustworthy, protein accessions the
/// second best and transcript accessions the last resort.
fn lookup_chain<D: IdentifierDirectory>() -> [Lookup<D>; 3] {
    [
        |directory, row| directory.by_display_name(row.display_name),
        |directory, row| directory.by_protein_accession(row.protein_accession),
        |directory, row| directory.by_transcript_accession(row.transcript_accession),
    ]
}

/// Returns the result of the first lookup that finds a gene record
fn first_match<D: IdentifierDirectory>(
    directory: &D,
    row: &GeneRow<'_>,
    lookups: &[Lookup<D>],
) -> Option<GeneRecordId> {
    lookups.iter().find_map(|lookup| lookup(directory, row))
}

/// Resolves a gene list row to its canonical symbol
fn resolve<D: IdentifierDirectory>(directory: &D, row: &GeneRow<'_>) -> Option<String> {
    let record = first_match(directory, row, &lookup_chain::<D>())?;
    directory.symbol(record).map(str::to_string)
}

/// Ordered lookup from gene list row numbers to canonical gene symbols
///
/// Row numbers are the 1-based line positions in the gene list. Row `0`,
/// blank or comment lines and all rows whose identifiers are unknown to
/// the [`IdentifierDirectory`] resolve to `None`.
///
/// # Examples
///
/// ```
/// use generank::{GeneDirectory, GeneIndex, IdentifierSpace};
///
/// let mut directory = GeneDirectory::default();
/// let id = directory.add_gene("A2M");
/// directory.add_alias(IdentifierSpace::ProteinAccession, "P01023", id);
///
/// let genes = GeneIndex::build(
///     "1\tx\tP04217\tNM_130786\tA1BG\n2\tx\tP01023\tNM_000014\tA2M-old\n",
///     &directory,
/// ).unwrap();
///
/// assert_eq!(genes.len(), 2);
/// assert_eq!(genes.symbol(0), None);
/// assert_eq!(genes.symbol(1), None);
/// assert_eq!(genes.symbol(2), Some("A2M"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct GeneIndex {
    symbols: Vec<Option<String>>,
}

impl GeneIndex {
    /// Builds the index from the gene list artifact
    ///
    /// # Errors
    ///
    /// [`RankerError::InvalidInput`](`crate::RankerError::InvalidInput`)
    /// if the gene list is malformed
    pub fn build<D: IdentifierDirectory>(
        gene_list: &str,
        directory: &D,
    ) -> RankerResult<Self> {
        let rows = gene_list::parse(gene_list)?;

        let last_row = rows.last().map_or(0, |(row, _)| *row);
        let mut symbols = vec![None; last_row + 1];
        for (row, gene) in &rows {
            symbols[*row] = resolve(directory, gene);
        }

        let genes = GeneIndex { symbols };
        info!(
            "Resolved {} of {} genes to a canonical symbol",
            genes.resolved(),
            genes.len()
        );
        Ok(genes)
    }

    /// The canonical symbol of gene list row `row`
    pub fn symbol(&self, row: usize) -> Option<&str> {
        self.symbols.get(row).and_then(Option::as_deref)
    }

    /// Number of rows in the gene list, including blank and comment lines
    /// before the last gene
    pub fn len(&self) -> usize {
        self.symbols.len().saturating_sub(1)
    }

    /// Returns `true` if the gene list did not contain any rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of rows that resolved to a symbol
    pub fn resolved(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_some()).count()
    }
}

impl Index<usize> for GeneIndex {
    type Output = Option<String>;

    /// Returns the resolved symbol of row `row`
    ///
    /// # Panics
    ///
    /// Panics if `row` is larger than [`GeneIndex::len`]
    fn index(&self, row: usize) -> &Self::Output {
        &self.symbols[row]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::directory::{GeneDirectory, IdentifierSpace};
    use std::cell::RefCell;

    /// Directory that records the identifier spaces that were queried
    struct Spy {
        inner: GeneDirectory,
        calls: RefCell<Vec<&'static str>>,
    }

    impl IdentifierDirectory for Spy {
        fn by_display_name(&self, name: &str) -> Option<GeneRecordId> {
            self.calls.borrow_mut().push("display");
            self.inner.by_display_name(name)
        }
        fn by_protein_accession(&self, accession: &str) -> Option<GeneRecordId> {
            self.calls.borrow_mut().push("protein");
            self.inner.by_protein_accession(accession)
        }
        fn by_transcript_accession(&self, accession: &str) -> Option<GeneRecordId> {
            self.calls.borrow_mut().push("transcript");
            self.inner.by_transcript_accession(accession)
        }
        fn symbol(&self, id: GeneRecordId) -> Option<&str> {
            self.inner.symbol(id)
        }
    }

    fn directory() -> GeneDirectory {
        let mut directory = GeneDirectory::default();
        let a = directory.add_gene("GENEA");
        let b = directory.add_gene("GENEB");
        let c = directory.add_gene("GENEC");
        directory.add_alias(IdentifierSpace::ProteinAccession, "PA", a);
        directory.add_alias(IdentifierSpace::ProteinAccession, "PB", b);
        directory.add_alias(IdentifierSpace::TranscriptAccession, "TA", a);
        directory.add_alias(IdentifierSpace::TranscriptAccession, "TC", c);
        directory
    }

    fn spy() -> Spy {
        Spy {
            inner: directory(),
            calls: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn display_name_stops_fallback() {
        let spy = spy();
        let row = GeneRow {
            protein_accession: "PB",
            transcript_accession: "TC",
            display_name: "GENEA",
        };
        assert_eq!(resolve(&spy, &row).as_deref(), Some("GENEA"));
        assert_eq!(*spy.calls.borrow(), vec!["display"]);
    }

    #[test]
    fn protein_before_transcript() {
        let spy = spy();
        let row = GeneRow {
            protein_accession: "PB",
            transcript_accession: "TC",
            display_name: "unknown",
        };
        assert_eq!(resolve(&spy, &row).as_deref(), Some("GENEB"));
        assert_eq!(*spy.calls.borrow(), vec!["display", "protein"]);
    }

    #[test]
    fn transcript_is_last_resort() {
        let spy = spy();
        let row = GeneRow {
            protein_accession: "unknown",
            transcript_accession: "TC",
            display_name: "unknown",
        };
        assert_eq!(resolve(&spy, &row).as_deref(), Some("GENEC"));
        assert_eq!(*spy.calls.borrow(), vec!["display", "protein", "transcript"]);
    }

    #[test]
    fn unresolvable_row() {
        let row = GeneRow {
            protein_accession: "x",
            transcript_accession: "y",
            display_name: "z",
        };
        assert!(resolve(&directory(), &row).is_none());
    }

    #[test]
    fn build_index() {
        let content = "1\tx\tPA\tTA\tfoo\n\
            2\tx\t-\t-\tGENEB\n\
            3\tx\t-\t-\t-\n\
            4\tx\t-\tTC\t-\n";
        let genes = GeneIndex::build(content, &directory()).expect("gene list is valid");
        assert_eq!(genes.len(), 4);
        assert_eq!(genes.resolved(), 3);
        assert_eq!(genes.symbol(0), None);
        assert_eq!(genes.symbol(1), Some("GENEA"));
        assert_eq!(genes.symbol(2), Some("GENEB"));
        assert_eq!(genes.symbol(3), None);
        assert_eq!(genes.symbol(4), Some("GENEC"));
        assert_eq!(genes.symbol(5), None);
        assert_eq!(genes[2].as_deref(), Some("GENEB"));
    }

    #[test]
    fn blank_lines_keep_row_numbers() {
        let content = "1\tx\t-\t-\tGENEA\n\n# note\n4\tx\t-\t-\tGENEB\n";
        let genes = GeneIndex::build(content, &directory()).expect("gene list is valid");
        assert_eq!(genes.len(), 4);
        assert_eq!(genes.resolved(), 2);
        assert_eq!(genes.symbol(1), Some("GENEA"));
        assert_eq!(genes.symbol(2), None);
        assert_eq!(genes.symbol(3), None);
        assert_eq!(genes.symbol(4), Some("GENEB"));
    }

    #[test]
    fn build_index_malformed() {
        let content = "1\tx\tPA\tTA\tfoo\n2\tx\tPA\n";
        assert!(GeneIndex::build(content, &directory()).is_err());
    }

    #[test]
    fn empty_index() {
        let genes = GeneIndex::build("", &directory()).expect("empty list is valid");
        assert!(genes.is_empty());
        assert_eq!(genes.symbol(0), None);
    }
}
