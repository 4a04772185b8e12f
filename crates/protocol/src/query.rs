//! The shareable query representation of search state.
//!
//! A filter encodes to URL-style key/value pairs (`searchTerm`, `sort`,
//! `category`) and decodes back to an equal filter; pagination continuation
//! adds a `startIndex` pair on top. The encoded string is what gets
//! bookmarked and shared.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed page size of the posts listing endpoint.
pub const PAGE_SIZE: usize = 9;

/// Category assigned to posts that were never categorized, and the value a
/// filter falls back to. The store filters by it literally.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(UnknownSortOrder),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSortOrder;

impl fmt::Display for UnknownSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sort order must be 'asc' or 'desc'")
    }
}

impl std::error::Error for UnknownSortOrder {}

/// Immutable snapshot of the search controls. Submitting a new filter
/// replaces the previous one wholesale; there is no partial mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub term: String,
    pub sort: SortOrder,
    pub category: String,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            term: String::new(),
            sort: SortOrder::Descending,
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl SearchFilter {
    pub fn new(
        term: impl Into<String>,
        sort: SortOrder,
        category: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            sort,
            category: category.into(),
        }
    }

    /// Fill unset fields with their defaults. Applied on every filter
    /// submission so downstream code never sees an empty category.
    pub fn normalized(mut self) -> Self {
        if self.category.trim().is_empty() {
            self.category = DEFAULT_CATEGORY.to_string();
        }
        self
    }

    /// Canonical query-string form: `searchTerm=&sort=desc&category=...`.
    pub fn encode(&self) -> String {
        format!(
            "searchTerm={}&sort={}&category={}",
            urlencoding::encode(&self.term),
            self.sort,
            urlencoding::encode(&self.category),
        )
    }

    /// Query string for one page fetch starting at `start_index`.
    pub fn page_query(&self, start_index: usize) -> String {
        format!("{}&startIndex={start_index}", self.encode())
    }

    /// Lenient inverse of [`encode`](Self::encode): missing pairs fall back
    /// to defaults, unknown keys (including `startIndex`) are ignored.
    pub fn decode(query: &str) -> Self {
        let mut filter = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = match pair.split_once('=') {
                Some(split) => split,
                None => continue,
            };
            let value = urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string());
            match key {
                "searchTerm" => filter.term = value,
                "sort" => filter.sort = value.parse().unwrap_or_default(),
                "category" if !value.trim().is_empty() => filter.category = value,
                _ => {}
            }
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_decode_round_trip() {
        let filter = SearchFilter::new("tank", SortOrder::Ascending, "military-aid");
        assert_eq!(
            filter.encode(),
            "searchTerm=tank&sort=asc&category=military-aid"
        );
        assert_eq!(SearchFilter::decode(&filter.encode()), filter);
    }

    #[test]
    fn test_round_trip_survives_reserved_characters() {
        let filter = SearchFilter::new(
            "armor & \"deep strikes\"?",
            SortOrder::Descending,
            "defense-policy",
        );
        assert_eq!(SearchFilter::decode(&filter.encode()), filter);
    }

    #[test]
    fn test_decode_empty_query_yields_defaults() {
        let filter = SearchFilter::decode("");
        assert_eq!(filter, SearchFilter::default());
        assert_eq!(filter.sort, SortOrder::Descending);
        assert_eq!(filter.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_decode_ignores_unknown_keys_and_start_index() {
        let filter =
            SearchFilter::decode("?searchTerm=tank&sort=asc&category=leadership&startIndex=18&x=1");
        assert_eq!(filter, SearchFilter::new("tank", SortOrder::Ascending, "leadership"));
    }

    #[test]
    fn test_decode_falls_back_on_bad_sort() {
        let filter = SearchFilter::decode("sort=upsidedown");
        assert_eq!(filter.sort, SortOrder::Descending);
    }

    #[test]
    fn test_normalized_fills_blank_category() {
        let filter = SearchFilter::new("", SortOrder::Descending, "  ").normalized();
        assert_eq!(filter.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_page_query_appends_start_index() {
        let filter = SearchFilter::default();
        assert_eq!(
            filter.page_query(18),
            "searchTerm=&sort=desc&category=uncategorized&startIndex=18"
        );
    }
}
