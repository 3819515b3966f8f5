//! Parsing the tab-delimited source artifacts
//!
//! All three artifacts share the same basic layout: one record per line,
//! columns separated by `\t`. Blank lines and lines starting with `#`
//! are ignored, but still occupy a line position.

pub(crate) mod gene_list;

/// Iterates all data lines of an artifact with their 1-based line position
///
/// Trailing line breaks (`\n` or `\r\n`) are removed. Blank and comment
/// lines are skipped, but still count towards the position of the
/// following lines.
pub(crate) fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|(idx, line)| (idx + 1, line))
}

/// Module to parse the disease list
///
/// ```text
/// D001    100001  Some disease name
/// D002    100002  Another disease
/// ```
pub(crate) mod disease_list {
    use tracing::error;

    use crate::RankerError;
    use crate::RankerResult;

    pub(crate) struct ParsedDisease<'a> {
        pub code: &'a str,
        pub external_id: &'a str,
    }

    /// Parses a single line of the disease list
    ///
    /// Column 1 is the internal disease code, column 2 the external
    /// identifier. All other columns are ignored.
    pub(crate) fn parse_line(line: &str) -> RankerResult<ParsedDisease<'_>> {
        let mut cols = line.split('\t');

        let Some(code) = cols.next().map(str::trim).filter(|s| !s.is_empty()) else {
            error!("Disease list line without code: {}", line);
            return Err(RankerError::InvalidInput(line.to_string()));
        };

        let Some(external_id) = cols.next().map(str::trim) else {
            error!("Disease list line without external id: {}", line);
            return Err(RankerError::InvalidInput(line.to_string()));
        };

        Ok(ParsedDisease { code, external_id })
    }

    /// Parses the full disease list
    ///
    /// # Errors
    ///
    /// [`RankerError::InvalidInput`] if any line has fewer than two columns
    pub(crate) fn parse(content: &str) -> RankerResult<Vec<ParsedDisease<'_>>> {
        super::data_lines(content)
            .map(|(_, line)| parse_line(line))
            .collect()
    }

}

/// Module to parse the ranked genes of a single disease
///
/// The 1-based line position is the rank of the gene. Blank and comment
/// lines count towards the position.
///
/// ```text
/// 3       0.91
/// 17      0.88
/// 3       0.50
/// ```
pub(crate) mod rank_list {
    use tracing::error;

    use crate::RankerError;
    use crate::RankerResult;

    #[derive(Debug, PartialEq, Eq)]
    pub(crate) struct RankRow<'a> {
        /// Row number in the gene list
        pub row: usize,
        /// 1-based position in the artifact
        pub rank: usize,
        pub score: &'a str,
    }

    /// Parses a single line of a rank list
    ///
    /// Column 1 is the row reference into the gene list, column 2 the score.
    /// The score is kept exactly as it appears in the line.
    pub(crate) fn parse_line(line: &str, rank: usize) -> RankerResult<RankRow<'_>> {
        let mut cols = line.split('\t');

        let Some(row) = cols.next() else {
            return Err(RankerError::InvalidInput(line.to_string()));
        };

        let Some(score) = cols.next() else {
            error!("Rank list line without score: {}", line);
            return Err(RankerError::InvalidInput(line.to_string()));
        };

        Ok(RankRow {
            row: row.trim().parse::<usize>()?,
            rank,
            score,
        })
    }

    /// Parses a full rank list
    ///
    /// # Errors
    ///
    /// - [`RankerError::InvalidInput`]: A line has fewer than two columns
    /// - [`RankerError::ParseIntError`]: A row reference is not a number
    pub(crate) fn parse(content: &str) -> RankerResult<Vec<RankRow<'_>>> {
        super::data_lines(content)
            .map(|(position, line)| parse_line(line, position))
            .collect()
    }

    #[cfg(test)]
    mod test_rank_list_parsing {
        use super::*;

        #[test]
        fn correct_line() {
            let row = parse_line("3\t0.91", 1).expect("line is valid");
            assert_eq!(
                row,
                RankRow {
                    row: 3,
                    rank: 1,
                    score: "0.91"
                }
            );
        }

        #[test]
        fn extra_columns_are_ignored() {
            let row = parse_line("3\t0.91\tfoo\tbar", 7).expect("line is valid");
            assert_eq!(row.rank, 7);
            assert_eq!(row.score, "0.91");
        }

        #[test]
        fn missing_score() {
            assert!(matches!(
                parse_line("3", 1),
                Err(RankerError::InvalidInput(_))
            ));
        }

        #[test]
        fn invalid_row() {
            assert!(matches!(
                parse_line("GENE3\t0.91", 1),
                Err(RankerError::ParseIntError)
            ));
            assert!(parse_line("-3\t0.91", 1).is_err());
        }

        #[test]
        fn ranks_follow_line_position() {
            let rows = parse("3\t0.91\n3\t0.50\n# comment\n8\t0.1\n").expect("content is valid");
            let ranks: Vec<(usize, usize)> = rows.iter().map(|r| (r.row, r.rank)).collect();
            assert_eq!(ranks, vec![(3, 1), (3, 2), (8, 4)]);
        }

        #[test]
        fn blank_lines_keep_their_rank() {
            let rows = parse("1\t0.9\n\n# note\n2\t0.5\n").expect("content is valid");
            let ranks: Vec<(usize, usize)> = rows.iter().map(|r| (r.row, r.rank)).collect();
            assert_eq!(ranks, vec![(1, 1), (2, 4)]);
        }

        #[test]
        fn score_is_not_modified() {
            let row = parse_line("1\t 0.9 ", 1).expect("line is valid");
            assert_eq!(row.score, " 0.9 ");
        }
    }
}
