//! Ranked genes of a single disease

use std::fmt::Display;
use std::ops::Index;

use indexmap::IndexMap;

/// The score of a gene as it appears in the source data
///
/// The value is passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Score(String);

impl Score {
    /// The score as it appears in the source data
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The score as a floating point number, if it is numeric
    pub fn to_f64(&self) -> Option<f64> {
        self.0.parse::<f64>().ok()
    }
}

impl From<&str> for Score {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rank and score of a single gene within a [`RankedTable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedGene {
    rank: usize,
    score: Score,
}

impl RankedGene {
    /// Creates a new `RankedGene`
    pub fn new<S: Into<Score>>(rank: usize, score: S) -> Self {
        Self {
            rank,
            score: score.into(),
        }
    }

    /// The 1-based rank, smaller is better
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The score from the source data
    pub fn score(&self) -> &Score {
        &self.score
    }
}

/// Genes of one disease, keyed by their canonical symbol
///
/// Every symbol appears only once. If the source data lists a symbol
/// more than once, only the occurrence with the smallest rank is kept.
/// Iteration yields genes in ascending rank.
///
/// # Examples
///
/// ```
/// use generank::{DiseaseGeneRanking, Config, GeneDirectory, RankerResult};
///
/// let mut directory = GeneDirectory::default();
/// directory.add_gene("GENE3");
/// directory.add_gene("GENE5");
///
/// let fetcher = |_: &str| -> RankerResult<String> { Ok("5\t0.9\n3\t0.8\n5\t0.1\n".to_string()) };
/// let genes = "1\t-\t-\t-\t-\n2\t-\t-\t-\t-\n3\t-\t-\t-\tGENE3\n4\t-\t-\t-\t-\n5\t-\t-\t-\tGENE5\n";
///
/// let ranking = DiseaseGeneRanking::from_artifacts(
///     "D001\t100001\n",
///     genes,
///     &directory,
///     &fetcher,
///     &Config::new("http://localhost"),
///     ["100001"],
/// ).unwrap();
///
/// let table = ranking.table("D001").unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table["GENE5"].rank(), 1);
/// assert_eq!(table["GENE5"].score().as_str(), "0.9");
/// assert_eq!(table.symbols().collect::<Vec<_>>(), vec!["GENE5", "GENE3"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedTable {
    genes: IndexMap<String, RankedGene>,
}

impl RankedTable {
    /// Adds a gene, unless the symbol is already present with a smaller rank
    ///
    /// Returns `true` if the table changed.
    pub(crate) fn insert(&mut self, symbol: &str, gene: RankedGene) -> bool {
        match self.genes.get_mut(symbol) {
            Some(existing) if existing.rank <= gene.rank => false,
            Some(existing) => {
                *existing = gene;
                true
            }
            None => {
                self.genes.insert(symbol.to_string(), gene);
                true
            }
        }
    }

    /// Restores ascending rank order after out-of-order inserts
    pub(crate) fn sort(&mut self) {
        self.genes.sort_by(|_, a, _, b| a.rank.cmp(&b.rank));
    }

    /// The rank and score of `symbol`
    pub fn get(&self, symbol: &str) -> Option<&RankedGene> {
        self.genes.get(symbol)
    }

    /// The rank of `symbol`
    pub fn rank_of(&self, symbol: &str) -> Option<usize> {
        self.get(symbol).map(RankedGene::rank)
    }

    /// Returns `true` if the table contains `symbol`
    pub fn contains(&self, symbol: &str) -> bool {
        self.genes.contains_key(symbol)
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the table does not contain any genes
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Iterates all symbols and their rank and score in ascending rank
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RankedGene)> {
        self.genes.iter().map(|(symbol, gene)| (symbol.as_str(), gene))
    }

    /// Iterates all symbols in ascending rank
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.genes.keys().map(String::as_str)
    }

    /// The `n` best ranked genes
    pub fn top(&self, n: usize) -> impl Iterator<Item = (&str, &RankedGene)> {
        self.iter().take(n)
    }
}

impl Index<&str> for RankedTable {
    type Output = RankedGene;

    /// Returns the rank and score of `symbol`
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is not present in the table
    fn index(&self, symbol: &str) -> &Self::Output {
        &self.genes[symbol]
    }
}

impl<'a> IntoIterator for &'a RankedTable {
    type Item = (&'a String, &'a RankedGene);
    type IntoIter = indexmap::map::Iter<'a, String, RankedGene>;
    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn score_passthrough() {
        let score = Score::from("0.91");
        assert_eq!(score.as_str(), "0.91");
        assert_eq!(score.to_string(), "0.91");
        assert_eq!(score.to_f64(), Some(0.91));
        assert_eq!(Score::from("n/a").to_f64(), None);
    }

    #[test]
    fn first_occurrence_wins_in_order() {
        let mut table = RankedTable::default();
        assert!(table.insert("GENE3", RankedGene::new(1, "0.91")));
        assert!(!table.insert("GENE3", RankedGene::new(2, "0.50")));
        assert_eq!(table.len(), 1);
        assert_eq!(table["GENE3"], RankedGene::new(1, "0.91"));
    }

    #[test]
    fn smaller_rank_replaces() {
        let mut table = RankedTable::default();
        table.insert("A", RankedGene::new(4, "0.4"));
        table.insert("B", RankedGene::new(2, "0.2"));
        assert!(table.insert("A", RankedGene::new(1, "0.1")));
        assert!(!table.insert("A", RankedGene::new(1, "0.0")));
        table.sort();

        assert_eq!(table.rank_of("A"), Some(1));
        assert_eq!(table["A"].score().as_str(), "0.1");
        assert_eq!(table.symbols().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn accessors() {
        let mut table = RankedTable::default();
        assert!(table.is_empty());
        table.insert("A", RankedGene::new(1, "3"));
        table.insert("B", RankedGene::new(2, "2"));
        table.insert("C", RankedGene::new(3, "1"));

        assert!(table.contains("B"));
        assert!(!table.contains("D"));
        assert!(table.get("D").is_none());
        assert_eq!(table.rank_of("D"), None);
        assert_eq!(
            table.top(2).map(|(s, g)| (s, g.rank())).collect::<Vec<_>>(),
            vec![("A", 1), ("B", 2)]
        );
        assert_eq!(table.top(10).count(), 3);
        assert_eq!((&table).into_iter().count(), 3);
    }

    #[test]
    #[should_panic]
    fn index_missing_symbol() {
        let table = RankedTable::default();
        let _ = &table["A"];
    }
}
