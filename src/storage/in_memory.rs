//! In-memory implementation of CardCatalog for testing and small deployments

use crate::core::card::Card;
use crate::core::error::CatalogError;
use crate::core::predicate::Predicate;
use crate::core::store::CardCatalog;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// In-memory card catalog
///
/// Cards are kept in insertion order, keyed by identifier. Uses RwLock for
/// thread-safe access.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    cards: Arc<RwLock<IndexMap<String, Card>>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            cards: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Build a catalog from card records, rejecting duplicate identifiers
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let catalog = Self::new();
        for card in cards {
            catalog.insert(card)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of card records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cards: Vec<Card> = serde_json::from_str(json).map_err(|e| CatalogError::LoadFailed {
            source_name: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        Self::from_cards(cards)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: &str) -> Result<Self> {
        let load_failed = |message: String| CatalogError::LoadFailed {
            source_name: path.to_string(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let cards: Vec<Card> =
            serde_json::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        let catalog = Self::from_cards(cards)?;

        tracing::info!(path = %path, cards = catalog.count()?, "Card catalog loaded");
        Ok(catalog)
    }

    /// Add a card, filling in its normalized name if missing
    pub fn insert(&self, card: Card) -> Result<()> {
        let mut cards = self
            .cards
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let card = card.normalized();
        let key = card.card_id.as_str().to_string();
        if cards.contains_key(&key) {
            return Err(CatalogError::DuplicateCard { card_id: key }.into());
        }
        cards.insert(key, card);

        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let cards = self
            .cards
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(cards.len())
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardCatalog for InMemoryCatalog {
    async fn find(&self, predicate: &Predicate) -> Result<Vec<Card>> {
        let cards = self
            .cards
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(cards
            .values()
            .filter(|card| predicate.matches(card))
            .cloned()
            .collect())
    }

    async fn get(&self, card_id: &str) -> Result<Option<Card>> {
        let cards = self
            .cards
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(cards.get(card_id).cloned())
    }

    async fn len(&self) -> Result<usize> {
        self.count()
    }
}
