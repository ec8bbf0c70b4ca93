//! The search engine: predicate composition, sorting, and orchestration

pub mod compose;
pub mod service;
pub mod sort;

pub use compose::{advanced_filter, basic_filter, filter_by_total_cost, unsupported_partitions};
pub use service::{CardPage, CardSearchService, FormChoice, ReferenceData, SearchPage};
pub use sort::{SortKey, sort_cards};
