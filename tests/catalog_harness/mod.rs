//! Shared fixtures for catalog and search testing
//!
//! Provides a small catalog spanning several partitions (including a hidden
//! promo partition), helpers to build services and forms, and the
//! `catalog_contract_tests!` macro.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod catalog_harness;
//! use catalog_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod catalog_tests;

use cardbase::prelude::*;

// ---------------------------------------------------------------------------
// Card fixtures
// ---------------------------------------------------------------------------

fn cost(text: &str) -> Cost {
    text.parse().expect("fixture cost should parse")
}

/// Sample catalog, one card per line:
///
/// | id | name | cost (total) | notes |
/// |---|---|---|---|
/// | CMF-001 | Alice | {W}{1} (2) | 500/500 |
/// | CMF-045 | Lumia, Fated Rebirth | {W}{W}{2} (4) | quotes "Alice" |
/// | TAT-012 | Flame Dragon | {X}{R}{1} (2) | 1000/800 |
/// | TAT-020 | Lumia's Fated Rebirth Ritual | {W}{2} (3) | chant |
/// | SKL-003 | Charlotte's Golem | {3} (3) | 600/600, no attribute |
/// | SKL-030 | Rebirth of the Moon | {U}{U} (2) | chant |
/// | TTW-007 | Cheshire Cat | {X}{X}{B} (1) | no ATK, quotes "Alice" |
/// | BFA-020 | Magic Stone of Flame | none (0) | stone |
/// | PR-001 | Flame Dragon | {R}{1} (2) | hidden promo |
pub fn sample_cards() -> Vec<Card> {
    vec![
        Card::new("CMF-001", "Alice")
            .with_cost(cost("{W}{1}"))
            .with_stats(Some(500), Some(500))
            .with_rarity("R")
            .with_type("Resonator")
            .with_race("Human")
            .with_ability("Alice gains [+100/+100] while you control a Ruler."),
        Card::new("CMF-045", "Lumia, Fated Rebirth")
            .with_cost(cost("{W}{W}{2}"))
            .with_rarity("SR")
            .with_type("Ruler")
            .with_race("Angel")
            .with_ability("Search your deck for a card named \"Alice\"."),
        Card::new("TAT-012", "Flame Dragon")
            .with_cost(cost("{X}{R}{1}"))
            .with_stats(Some(1000), Some(800))
            .with_rarity("U")
            .with_type("Resonator")
            .with_race("Dragon")
            .with_ability("Flying"),
        Card::new("TAT-020", "Lumia's Fated Rebirth Ritual")
            .with_cost(cost("{W}{2}"))
            .with_rarity("R")
            .with_type("Chant")
            .with_ability("Draw two cards."),
        Card::new("SKL-003", "Charlotte's Golem")
            .with_cost(cost("{3}"))
            .with_stats(Some(600), Some(600))
            .with_rarity("C")
            .with_type("Resonator")
            .with_race("Golem"),
        Card::new("SKL-030", "Rebirth of the Moon")
            .with_cost(cost("{U}{U}"))
            .with_rarity("U")
            .with_type("Chant")
            .with_ability("Return target resonator to its owner's hand."),
        Card::new("TTW-007", "Cheshire Cat")
            .with_cost(cost("{X}{X}{B}"))
            .with_stats(None, Some(200))
            .with_rarity("R")
            .with_divinity("2")
            .with_type("Resonator")
            .with_race("Beast")
            .with_ability("When this card enters the field, put \"Alice\" into your hand."),
        Card::new("BFA-020", "Magic Stone of Flame")
            .with_rarity("C")
            .with_type("Magic Stone"),
        Card::new("PR-001", "Flame Dragon")
            .with_cost(cost("{R}{1}"))
            .with_stats(Some(1000), Some(800))
            .with_rarity("PR")
            .with_type("Resonator")
            .with_race("Dragon")
            .with_ability("Flying"),
    ]
}

/// Identifiers of every supported card, newest partition first
pub const SUPPORTED_NEWEST_FIRST: [&str; 8] = [
    "BFA-020", "TTW-007", "SKL-030", "SKL-003", "TAT-020", "TAT-012", "CMF-045", "CMF-001",
];

// ---------------------------------------------------------------------------
// Service helpers
// ---------------------------------------------------------------------------

pub fn sample_catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_cards(sample_cards()).expect("fixture cards are unique")
}

pub fn test_service() -> CardSearchService {
    CardSearchService::new(
        Arc::new(sample_catalog()),
        Arc::new(CatalogConfig::default_config()),
    )
}

pub fn ids(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|c| c.card_id.as_str()).collect()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn basic(text: &str) -> SearchSubmission {
    SearchSubmission::Basic(BasicSearchForm {
        generic_text: text.to_string(),
    })
}

/// An advanced form with no restriction, sorted most recent first
pub fn advanced_form() -> AdvancedSearchForm {
    AdvancedSearchForm {
        text_exactness: "contains_all".to_string(),
        sort_by: "most_recent".to_string(),
        ..Default::default()
    }
}

/// Run a search that must be valid and return its cards
pub async fn search_cards(service: &CardSearchService, submission: SearchSubmission) -> Vec<Card> {
    let page = service
        .search(Some(submission))
        .await
        .expect("search should succeed");
    assert!(!page.has_errors(), "unexpected errors: {:?}", page.errors);
    page.cards.expect("valid search should carry cards")
}

pub async fn advanced_cards(service: &CardSearchService, form: AdvancedSearchForm) -> Vec<Card> {
    search_cards(service, SearchSubmission::Advanced(form)).await
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert the result holds exactly `expected`, in any order
pub fn assert_same_ids(cards: &[Card], expected: &[&str]) {
    let mut actual = ids(cards);
    actual.sort_unstable();
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(actual, expected);
}
