//! Module to parse the gene list
//!
//! Each data line describes one gene, its row number is the 1-based
//! position of the line. Blank and comment lines occupy a row number
//! without describing a gene. Only the last three columns are used:
//!
//! ```text
//! 1   9606.ENSP00000263100    P04217  NM_130786   A1BG
//! 2   9606.ENSP00000323929    P01023  NM_000014   A2M
//! ```
use tracing::error;

use crate::RankerError;
use crate::RankerResult;

const NUM_COLUMNS: usize = 5;

/// The alternative identifiers of a single gene list row
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct GeneRow<'a> {
    /// Column 2
    pub protein_accession: &'a str,
    /// Column 3
    pub transcript_accession: &'a str,
    /// Column 4
    pub display_name: &'a str,
}

/// Parses a single line of the gene list
pub(crate) fn parse_line(line: &str) -> RankerResult<GeneRow<'_>> {
    let cols: Vec<&str> = line.split('\t').map(str::trim).collect();
    if cols.len() < NUM_COLUMNS {
        error!(
            "Gene list line has {} instead of {} columns: {}",
            cols.len(),
            NUM_COLUMNS,
            line
        );
        return Err(RankerError::InvalidInput(line.to_string()));
    }

    Ok(GeneRow {
        protein_accession: cols[2],
        transcript_accession: cols[3],
        display_name: cols[4],
    })
}

/// Parses the full gene list
///
/// Returns every gene together with its row number.
///
/// # Errors
///
/// [`RankerError::InvalidInput`] if any line has fewer than five columns
pub(crate) fn parse(content: &str) -> RankerResult<Vec<(usize, GeneRow<'_>)>> {
    super::data_lines(content)
        .map(|(row, line)| parse_line(line).map(|gene| (row, gene)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn correct_line() {
        let row = parse_line("1\tx\tP04217\tNM_130786\tA1BG").expect("line is valid");
        assert_eq!(row.protein_accession, "P04217");
        assert_eq!(row.transcript_accession, "NM_130786");
        assert_eq!(row.display_name, "A1BG");
    }

    #[test]
    fn empty_columns_are_allowed() {
        let row = parse_line("1\t\t\t\tA1BG").expect("line is valid");
        assert_eq!(row.protein_accession, "");
        assert_eq!(row.display_name, "A1BG");
    }

    #[test]
    fn too_few_columns() {
        assert!(parse_line("1\tx\tP04217\tNM_130786").is_err());
    }

    #[test]
    fn parse_keeps_line_positions() {
        let content = "1\tx\tP1\tT1\tA\n2\tx\tP2\tT2\tB\r\n\n3\tx\tP3\tT3\tC\n";
        let rows = parse(content).expect("content is valid");
        let names: Vec<(usize, &str)> = rows.iter().map(|(n, r)| (*n, r.display_name)).collect();
        assert_eq!(names, vec![(1, "A"), (2, "B"), (4, "C")]);
    }
}
