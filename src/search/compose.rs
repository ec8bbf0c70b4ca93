//! Predicate composition for the two search modes, plus the in-memory
//! total-cost filter
//!
//! Filtering runs in two phases. Phase 1 is a single [`Predicate`] executed by
//! the catalog. Phase 2 ([`filter_by_total_cost`]) runs on the returned cards:
//! total cost is an aggregate over the cost tokens, which a catalog cannot
//! cheaply express as a field predicate.

use crate::config::CatalogConfig;
use crate::core::card::{Card, StatField};
use crate::core::predicate::Predicate;
use crate::core::query::{
    TextExactness, TextField, attribute_predicate, card_type_predicate, divinity_predicate,
    rarity_predicate, set_predicate, stat_predicate, text_predicate,
};
use crate::core::validation::{AdvancedCriteria, BasicCriteria};
use std::collections::HashSet;

/// Fields searched by the quick search
pub const BASIC_TEXT_FIELDS: [TextField; 4] = [
    TextField::Name,
    TextField::NameWithoutPunctuation,
    TextField::AbilityText,
    TextField::Race,
];

/// Bucket that also selects cards with a wildcard in their cost
pub const WILDCARD_BUCKET: &str = "X";

/// Cards belonging to a partition hidden from search
pub fn unsupported_partitions(config: &CatalogConfig) -> Predicate {
    set_predicate(&config.unsupported_sets)
}

/// Quick search: every word somewhere in the name, ability text or races
pub fn basic_filter(criteria: &BasicCriteria, config: &CatalogConfig) -> Predicate {
    text_predicate(
        &criteria.generic_text,
        &BASIC_TEXT_FIELDS,
        TextExactness::ContainsAll,
    )
    .and(unsupported_partitions(config).not())
}

/// Advanced search: OR inside each category, AND across categories
pub fn advanced_filter(criteria: &AdvancedCriteria, config: &CatalogConfig) -> Predicate {
    Predicate::all_of([
        text_predicate(
            &criteria.generic_text,
            &criteria.text_search_fields,
            criteria.text_exactness,
        ),
        attribute_predicate(&criteria.colours, config),
        set_predicate(&criteria.sets),
        card_type_predicate(&criteria.card_type),
        rarity_predicate(&criteria.rarity),
        divinity_predicate(&criteria.divinity),
        stat_predicate(StatField::Atk, criteria.atk_comparator, criteria.atk_value),
        stat_predicate(StatField::Def, criteria.def_comparator, criteria.def_value),
        unsupported_partitions(config).not(),
    ])
}

/// Drop repeated identifiers, keeping the first occurrence
pub fn distinct(cards: Vec<Card>) -> Vec<Card> {
    let mut seen = HashSet::new();
    cards
        .into_iter()
        .filter(|card| seen.insert(card.card_id.clone()))
        .collect()
}

/// Keep cards whose total cost is one of `buckets`
///
/// When the wildcard bucket is selected, cards with `{X}` in their cost are
/// kept whatever their numeric total. No buckets means no filtering.
pub fn filter_by_total_cost(cards: Vec<Card>, buckets: &[String]) -> Vec<Card> {
    if buckets.is_empty() {
        return cards;
    }

    let wildcard = buckets.iter().any(|b| b == WILDCARD_BUCKET);
    cards
        .into_iter()
        .filter(|card| {
            let total = card.total_cost().to_string();
            buckets.contains(&total) || (wildcard && card.cost.has_wildcard())
        })
        .collect()
}
