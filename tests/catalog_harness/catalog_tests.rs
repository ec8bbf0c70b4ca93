//! Macro-generated test suite for `CardCatalog` contract validation.
//!
//! The `catalog_contract_tests!` macro generates a test module that validates
//! any `CardCatalog` implementation against the contract the search engine
//! relies on: predicate interpretation, lookups by identifier, and
//! concurrent reads.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod catalog_harness;
//!
//! use catalog_harness::*;
//! use cardbase::storage::InMemoryCatalog;
//!
//! catalog_contract_tests!(|cards: Vec<Card>| InMemoryCatalog::from_cards(cards).unwrap());
//! ```

/// Generate a `CardCatalog` conformance test suite.
///
/// `$factory` must be a callable taking the fixture cards and returning a
/// catalog holding them. It is invoked once per test.
#[macro_export]
macro_rules! catalog_contract_tests {
    ($factory:expr) => {
        mod catalog_contract_tests {
            use super::*;
            use cardbase::prelude::*;

            fn catalog() -> impl CardCatalog + 'static {
                ($factory)(sample_cards())
            }

            // ==================================================================
            // Lookups
            // ==================================================================

            #[tokio::test]
            async fn test_len_counts_every_card() {
                let catalog = catalog();
                assert_eq!(catalog.len().await.unwrap(), sample_cards().len());
                assert!(!catalog.is_empty().await.unwrap());
            }

            #[tokio::test]
            async fn test_get_existing() {
                let card = catalog().get("TAT-012").await.unwrap().unwrap();
                assert_eq!(card.name, "Flame Dragon");
                assert_eq!(card.total_cost(), 2);
            }

            #[tokio::test]
            async fn test_get_is_exact() {
                let catalog = catalog();
                assert!(catalog.get("TAT-999").await.unwrap().is_none());
                assert!(catalog.get("TAT").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_normalized_name_is_filled_in() {
                let card = catalog().get("CMF-045").await.unwrap().unwrap();
                assert_eq!(card.name_without_punctuation, "Lumia Fated Rebirth");
            }

            // ==================================================================
            // Predicate interpretation
            // ==================================================================

            #[tokio::test]
            async fn test_find_all() {
                let cards = catalog().find(&Predicate::All).await.unwrap();
                assert_eq!(cards.len(), sample_cards().len());
            }

            #[tokio::test]
            async fn test_find_results_match_and_are_distinct() {
                let predicate = Predicate::equals(CardField::CardType, "Resonator")
                    .or(Predicate::equals(CardField::Rarity, "R"));
                let cards = catalog().find(&predicate).await.unwrap();

                assert!(cards.iter().all(|c| predicate.matches(c)));
                let mut unique = ids(&cards);
                unique.sort_unstable();
                unique.dedup();
                assert_eq!(unique.len(), cards.len());
                assert_same_ids(
                    &cards,
                    &["CMF-001", "TAT-012", "TAT-020", "SKL-003", "TTW-007", "PR-001"],
                );
            }

            #[tokio::test]
            async fn test_find_prefix_ignores_case() {
                let predicate = Predicate::istarts_with(CardField::CardId, "skl-");
                let cards = catalog().find(&predicate).await.unwrap();
                assert_same_ids(&cards, &["SKL-003", "SKL-030"]);
            }

            #[tokio::test]
            async fn test_find_null_stat_never_matches() {
                let predicate = Predicate::compare(StatField::Atk, Comparator::Lte, 100_000);
                let cards = catalog().find(&predicate).await.unwrap();
                assert!(!ids(&cards).contains(&"TTW-007"));
                assert!(!ids(&cards).contains(&"CMF-045"));
            }

            #[tokio::test]
            async fn test_find_no_results() {
                let predicate = Predicate::equals(CardField::Rarity, "XR");
                assert!(catalog().find(&predicate).await.unwrap().is_empty());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_reads() {
                let catalog = std::sync::Arc::new(catalog());
                let mut handles = Vec::new();
                for _ in 0..8 {
                    let catalog = catalog.clone();
                    handles.push(tokio::spawn(async move {
                        catalog.find(&Predicate::All).await.unwrap().len()
                    }));
                }
                for handle in handles {
                    assert_eq!(handle.await.unwrap(), sample_cards().len());
                }
            }
        }
    };
}
