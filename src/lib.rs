//! # cardbase
//!
//! Search, filter and sort engine for a trading-card database.
//!
//! ## Features
//!
//! - **Composable predicates**: form input becomes a boolean [`Predicate`](core::Predicate)
//!   tree any catalog backend can interpret
//! - **Two search modes**: a quick text search and an advanced search with
//!   per-category selections, stat comparisons and total cost buckets
//! - **Three sort strategies**: most recent, total cost, alphabetical
//! - **Configuration-Based**: attribute codes, release order and hidden sets
//!   are loaded from YAML
//! - **JSON and HTML**: pages are served as JSON or rendered with tera
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cardbase::prelude::*;
//!
//! let catalog = InMemoryCatalog::from_json_file("data/cards.json")?;
//! let config = CatalogConfig::from_yaml_file("config/cardbase.yaml")?;
//!
//! let service = CardSearchService::new(Arc::new(catalog), Arc::new(config));
//! let page = service
//!     .search(Some(SearchSubmission::Basic(BasicSearchForm {
//!         generic_text: "lumia".to_string(),
//!     })))
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod search;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        card::{Card, CardField, CardId, Cost, CostToken, StatField},
        error::{CardError, CardbaseError, SearchError},
        predicate::{Comparator, Predicate},
        query::{TextExactness, TextField},
        store::CardCatalog,
        validation::{
            AdvancedCriteria, AdvancedSearchForm, BasicCriteria, BasicSearchForm,
            CriteriaValidator, FieldErrors, SearchSubmission, StatInput,
        },
    };

    // === Search ===
    pub use crate::search::{
        CardPage, CardSearchService, FormChoice, ReferenceData, SearchPage, SortKey,
    };

    // === Storage ===
    pub use crate::storage::InMemoryCatalog;

    // === Config ===
    pub use crate::config::{CardTypeGroup, CatalogConfig, SetInfo, SortOption};

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
