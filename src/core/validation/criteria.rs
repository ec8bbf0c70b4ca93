//! Typed search criteria produced by validation

use crate::core::predicate::Comparator;
use crate::core::query::{TextExactness, TextField};
use serde::Serialize;

/// Criteria of the quick search: one piece of text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicCriteria {
    pub generic_text: String,
}

/// Criteria of the advanced search
///
/// Every list is a set of options; an empty list means "no restriction".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedCriteria {
    pub generic_text: String,
    pub text_search_fields: Vec<TextField>,
    pub text_exactness: TextExactness,
    pub colours: Vec<String>,
    pub sets: Vec<String>,
    pub card_type: Vec<String>,
    pub rarity: Vec<String>,
    pub divinity: Vec<String>,
    pub atk_comparator: Option<Comparator>,
    pub atk_value: Option<i64>,
    pub def_comparator: Option<Comparator>,
    pub def_value: Option<i64>,
    /// Total cost buckets; "X" also selects cards with a wildcard cost
    pub cost: Vec<String>,
    pub sort_by: String,
    pub reverse_sort: bool,
}
