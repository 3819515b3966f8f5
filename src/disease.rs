//! Disease Index: external disease identifiers mapped to internal disease codes

use std::collections::HashMap;

use tracing::info;

use crate::parser::disease_list;
use crate::RankerResult;

/// Returns the first run of ASCII digits in `value`
///
/// External disease identifiers are numeric, but requested identifiers
/// often carry a prefix or some annotation.
///
/// # Examples
///
/// ```
/// use generank::normalize_disease_id;
///
/// assert_eq!(normalize_disease_id("100999 (suspected)"), Some("100999"));
/// assert_eq!(normalize_disease_id("OMIM:100001"), Some("100001"));
/// assert_eq!(normalize_disease_id("unknown"), None);
/// ```
pub fn normalize_disease_id(value: &str) -> Option<&str> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let rest = &value[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Mapping from external disease identifiers to internal disease codes
///
/// Internal codes name the per-disease rank artifacts of the remote
/// data source.
///
/// # Examples
///
/// ```
/// use generank::DiseaseIndex;
///
/// let diseases = DiseaseIndex::build("D001\t100001\nD002\t100002\tfoo\n").unwrap();
/// assert_eq!(diseases.code("100002"), Some("D002"));
/// assert_eq!(diseases.code("100003"), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct DiseaseIndex {
    codes: HashMap<String, String>,
}

impl DiseaseIndex {
    /// Builds the index from the disease list artifact
    ///
    /// If an external identifier appears more than once, the last
    /// occurrence wins.
    ///
    /// # Errors
    ///
    /// [`RankerError::InvalidInput`](`crate::RankerError::InvalidInput`)
    /// if any line has fewer than two columns
    pub fn build(disease_list: &str) -> RankerResult<Self> {
        let codes: HashMap<String, String> = disease_list::parse(disease_list)?
            .into_iter()
            .map(|disease| (disease.external_id.to_string(), disease.code.to_string()))
            .collect();
        info!("Loaded {} diseases", codes.len());
        Ok(Self { codes })
    }

    /// The internal code of the disease with the external identifier `external_id`
    pub fn code(&self, external_id: &str) -> Option<&str> {
        self.codes.get(external_id).map(String::as_str)
    }

    /// Returns `true` if `external_id` is part of the index
    pub fn contains(&self, external_id: &str) -> bool {
        self.codes.contains_key(external_id)
    }

    /// Number of diseases
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns `true` if the index does not contain any diseases
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::RankerError;

    #[test]
    fn normalize() {
        assert_eq!(normalize_disease_id("100001"), Some("100001"));
        assert_eq!(normalize_disease_id("  100001  "), Some("100001"));
        assert_eq!(normalize_disease_id("100999 (suspected)"), Some("100999"));
        assert_eq!(normalize_disease_id("OMIM:100001"), Some("100001"));
        assert_eq!(normalize_disease_id("#1234, 5678"), Some("1234"));
        assert_eq!(normalize_disease_id(""), None);
        assert_eq!(normalize_disease_id("no digits"), None);
    }

    #[test]
    fn build_index() {
        let diseases =
            DiseaseIndex::build("# header\nD001\t100001\nD002\t100002\n").expect("list is valid");
        assert_eq!(diseases.len(), 2);
        assert!(diseases.contains("100001"));
        assert!(!diseases.contains("D001"));
        assert_eq!(diseases.code("100001"), Some("D001"));
    }

    #[test]
    fn last_duplicate_wins() {
        let diseases = DiseaseIndex::build("D001\t100001\nD009\t100001\n").expect("list is valid");
        assert_eq!(diseases.len(), 1);
        assert_eq!(diseases.code("100001"), Some("D009"));
    }

    #[test]
    fn malformed_list() {
        assert!(matches!(
            DiseaseIndex::build("D001\t100001\nD002 100002\n"),
            Err(RankerError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_list() {
        let diseases = DiseaseIndex::build("").expect("list is valid");
        assert!(diseases.is_empty());
    }
}
