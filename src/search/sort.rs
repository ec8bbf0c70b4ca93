//! Sort strategies
//!
//! Every strategy breaks ties by partition rank, then by the partition-local
//! sequence code, so the resulting order is total over distinct identifiers.

use crate::config::CatalogConfig;
use crate::core::card::Card;
use crate::core::error::SearchError;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Supported sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest partition first by default; the reverse flag is inverted
    MostRecent,
    /// Cheapest first by default
    TotalCost,
    /// A to Z by default
    Alphabetical,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::MostRecent => "most_recent",
            SortKey::TotalCost => "total_cost",
            SortKey::Alphabetical => "alphabetical",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "most_recent" => Ok(SortKey::MostRecent),
            "total_cost" => Ok(SortKey::TotalCost),
            "alphabetical" => Ok(SortKey::Alphabetical),
            other => Err(SearchError::UnsupportedSortKey {
                sort_by: other.to_string(),
            }),
        }
    }
}

/// Sort by a key name as submitted
///
/// An unknown key is a mismatch between the offered sort options and the
/// strategies above; it fails instead of falling back to a default order.
pub fn sort_cards(
    cards: Vec<Card>,
    sort_by: &str,
    reversed: bool,
    config: &CatalogConfig,
) -> Result<Vec<Card>, SearchError> {
    let key = sort_by.parse::<SortKey>()?;
    Ok(sort_by_key(cards, key, reversed, config))
}

/// Sort with a known strategy
pub fn sort_by_key(
    mut cards: Vec<Card>,
    key: SortKey,
    reversed: bool,
    config: &CatalogConfig,
) -> Vec<Card> {
    let rank = |card: &Card| config.partition_rank(card.card_id.set_code());
    let sequence = |card: &Card| card.card_id.sequence().to_string();

    match key {
        SortKey::MostRecent => {
            sort_with(&mut cards, !reversed, |c| (rank(c), sequence(c)));
        }
        SortKey::TotalCost => {
            sort_with(&mut cards, reversed, |c| (c.total_cost(), rank(c), sequence(c)));
        }
        SortKey::Alphabetical => {
            sort_with(&mut cards, reversed, |c| (c.name.clone(), rank(c), sequence(c)));
        }
    }
    cards
}

/// Stable sort on `key`, descending when asked
fn sort_with<K, F>(cards: &mut [Card], descending: bool, key: F)
where
    K: Ord,
    F: Fn(&Card) -> K,
{
    if descending {
        cards.sort_by_cached_key(|c| Reverse(key(c)));
    } else {
        cards.sort_by_cached_key(key);
    }
}
