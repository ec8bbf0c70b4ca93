//! Catalog store trait

use crate::core::card::Card;
use crate::core::predicate::Predicate;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only card catalog
///
/// Implementations interpret a [`Predicate`] with their native query
/// mechanism. The engine never mutates catalog data.
#[async_trait]
pub trait CardCatalog: Send + Sync {
    /// All cards matching `predicate`, each card at most once
    async fn find(&self, predicate: &Predicate) -> Result<Vec<Card>>;

    /// The card with exactly this identifier, if any
    async fn get(&self, card_id: &str) -> Result<Option<Card>>;

    /// Number of cards in the catalog
    async fn len(&self) -> Result<usize>;

    /// Whether the catalog holds no cards
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
