//! Request orchestration: validate, filter, sort, and bundle a page

use super::compose::{advanced_filter, basic_filter, distinct, filter_by_total_cost};
use super::sort::{SortKey, sort_by_key, sort_cards};
use crate::config::{CardTypeGroup, CatalogConfig, SetInfo, SortOption};
use crate::core::card::{Card, CardField};
use crate::core::error::{CardError, CardbaseError};
use crate::core::predicate::{Comparator, Predicate};
use crate::core::query::{TextExactness, TextField};
use crate::core::store::CardCatalog;
use crate::core::validation::{
    AdvancedCriteria, AdvancedSearchForm, BasicCriteria, BasicSearchForm, CriteriaValidator,
    FieldErrors, SearchSubmission,
};
use serde::Serialize;
use std::sync::Arc;

/// A value offered by a form control, with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormChoice {
    pub value: String,
    pub label: String,
}

impl FormChoice {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    fn plain(value: &str) -> Self {
        Self::new(value, value)
    }
}

/// Static data rendered next to the search forms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceData {
    pub card_types_list: Vec<CardTypeGroup>,
    pub sets: Vec<SetInfo>,
    pub sort_options: Vec<SortOption>,
    /// Attribute codes followed by the void sentinel
    pub colour_choices: Vec<FormChoice>,
    pub rarity_choices: Vec<FormChoice>,
    pub divinity_choices: Vec<FormChoice>,
    pub cost_choices: Vec<FormChoice>,
    pub text_field_choices: Vec<FormChoice>,
    pub text_exactness_choices: Vec<FormChoice>,
    pub comparator_choices: Vec<FormChoice>,
}

impl ReferenceData {
    pub fn from_config(config: &CatalogConfig) -> Self {
        let plain = |values: &[String]| -> Vec<FormChoice> {
            values.iter().map(|v| FormChoice::plain(v)).collect()
        };

        let mut colour_choices = plain(&config.attribute_codes);
        colour_choices.push(FormChoice::new(config.void_code.as_str(), "Void"));

        Self {
            card_types_list: config.card_type_groups.clone(),
            sets: config.sets.clone(),
            sort_options: config.sort_options.clone(),
            colour_choices,
            rarity_choices: plain(&config.rarities),
            divinity_choices: plain(&config.divinities),
            cost_choices: plain(&config.cost_buckets),
            text_field_choices: TextField::ALL
                .into_iter()
                .map(|f| FormChoice::new(f.as_str(), f.label()))
                .collect(),
            text_exactness_choices: TextExactness::ALL
                .into_iter()
                .map(|m| FormChoice::new(m.as_str(), m.label()))
                .collect(),
            comparator_choices: Comparator::ALL
                .into_iter()
                .map(|c| FormChoice::new(c.as_str(), c.label()))
                .collect(),
        }
    }
}

/// Everything the search page needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    #[serde(flatten)]
    pub reference: ReferenceData,
    pub basic_form: BasicSearchForm,
    pub advanced_form: AdvancedSearchForm,
    /// Typed criteria of a valid advanced search
    pub advanced_form_data: Option<AdvancedCriteria>,
    /// `None` when no valid search ran
    pub cards: Option<Vec<Card>>,
    pub errors: FieldErrors,
}

impl SearchPage {
    fn blank(reference: ReferenceData) -> Self {
        Self {
            reference,
            basic_form: BasicSearchForm::default(),
            advanced_form: AdvancedSearchForm::default(),
            advanced_form_data: None,
            cards: None,
            errors: FieldErrors::new(),
        }
    }

    /// Whether the submitted form was rejected
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Everything the single-card page needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardPage {
    #[serde(flatten)]
    pub reference: ReferenceData,
    pub card: Card,
    /// Other cards quoting this card's name in their ability text
    pub referred_by: Vec<Card>,
    pub basic_form: BasicSearchForm,
    pub advanced_form: AdvancedSearchForm,
}

/// Card search engine over a catalog
///
/// Stateless apart from its two shared, read-only collaborators; a single
/// instance serves concurrent requests.
#[derive(Clone)]
pub struct CardSearchService {
    catalog: Arc<dyn CardCatalog>,
    config: Arc<CatalogConfig>,
}

impl CardSearchService {
    pub fn new(catalog: Arc<dyn CardCatalog>, config: Arc<CatalogConfig>) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn reference_data(&self) -> ReferenceData {
        ReferenceData::from_config(&self.config)
    }

    /// Run a search; `None` renders the blank page
    ///
    /// An invalid submission is not an error: the page comes back with the
    /// submitted form and its field errors, and no result set.
    pub async fn search(
        &self,
        submission: Option<SearchSubmission>,
    ) -> Result<SearchPage, CardbaseError> {
        let mut page = SearchPage::blank(self.reference_data());
        let validator = CriteriaValidator::new(&self.config);

        match submission {
            None => {}
            Some(SearchSubmission::Basic(form)) => {
                match validator.validate_basic(&form) {
                    Ok(criteria) => page.cards = Some(self.basic_search(&criteria).await?),
                    Err(errors) => {
                        tracing::debug!(fields = errors.len(), "Basic search rejected");
                        page.errors = errors;
                    }
                }
                page.basic_form = form;
            }
            Some(SearchSubmission::Advanced(form)) => {
                match validator.validate_advanced(&form) {
                    Ok(criteria) => {
                        page.cards = Some(self.advanced_search(&criteria).await?);
                        page.advanced_form_data = Some(criteria);
                    }
                    Err(errors) => {
                        tracing::debug!(fields = errors.len(), "Advanced search rejected");
                        page.errors = errors;
                    }
                }
                page.advanced_form = form;
            }
        }

        Ok(page)
    }

    /// Quick search, newest cards first
    pub async fn basic_search(&self, criteria: &BasicCriteria) -> Result<Vec<Card>, CardbaseError> {
        let predicate = basic_filter(criteria, &self.config);
        let cards = self.find(&predicate).await?;

        tracing::debug!(text = %criteria.generic_text, results = cards.len(), "Basic search");
        Ok(sort_by_key(cards, SortKey::MostRecent, false, &self.config))
    }

    /// Advanced search, sorted as requested
    pub async fn advanced_search(
        &self,
        criteria: &AdvancedCriteria,
    ) -> Result<Vec<Card>, CardbaseError> {
        let predicate = advanced_filter(criteria, &self.config);
        let cards = filter_by_total_cost(self.find(&predicate).await?, &criteria.cost);

        tracing::debug!(
            results = cards.len(),
            sort_by = %criteria.sort_by,
            reverse = criteria.reverse_sort,
            "Advanced search"
        );

        sort_cards(cards, &criteria.sort_by, criteria.reverse_sort, &self.config).map_err(|e| {
            tracing::error!(sort_by = %criteria.sort_by, "No sort strategy for offered sort key");
            e.into()
        })
    }

    /// Fetch one card and the cards that reference it
    pub async fn view_card(&self, card_id: &str) -> Result<CardPage, CardbaseError> {
        let card = self
            .catalog
            .get(card_id)
            .await?
            .ok_or_else(|| CardError::NotFound {
                card_id: card_id.to_string(),
            })?;
        let referred_by = self.referred_by(&card).await?;

        Ok(CardPage {
            reference: self.reference_data(),
            card,
            referred_by,
            basic_form: BasicSearchForm::default(),
            advanced_form: AdvancedSearchForm::default(),
        })
    }

    /// Cards whose ability text quotes `card`'s name, excluding `card` itself
    pub async fn referred_by(&self, card: &Card) -> Result<Vec<Card>, CardbaseError> {
        let quoted = format!("\"{}\"", card.name);
        let predicate = Predicate::contains(CardField::AbilityText, quoted).and(
            Predicate::equals(CardField::CardId, card.card_id.as_str()).not(),
        );

        self.find(&predicate).await
    }

    async fn find(&self, predicate: &Predicate) -> Result<Vec<Card>, CardbaseError> {
        tracing::debug!(?predicate, "Querying catalog");
        Ok(distinct(self.catalog.find(predicate).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Cost;
    use crate::storage::InMemoryCatalog;

    fn service(cards: Vec<Card>) -> CardSearchService {
        let catalog = InMemoryCatalog::from_cards(cards).unwrap();
        CardSearchService::new(Arc::new(catalog), Arc::new(CatalogConfig::default_config()))
    }

    #[tokio::test]
    async fn test_no_submission_is_blank_page() {
        let page = service(vec![]).search(None).await.unwrap();

        assert!(page.cards.is_none());
        assert!(!page.has_errors());
        assert_eq!(page.reference.card_types_list.len(), 3);
    }

    #[test]
    fn test_reference_data_offers_every_form_choice() {
        let reference = ReferenceData::from_config(&CatalogConfig::default_config());

        let values = |choices: &[FormChoice]| -> Vec<String> {
            choices.iter().map(|c| c.value.clone()).collect()
        };
        assert_eq!(values(&reference.colour_choices), vec!["W", "R", "U", "G", "B", "V"]);
        assert_eq!(reference.colour_choices.last().map(|c| c.label.as_str()), Some("Void"));
        assert_eq!(reference.cost_choices.len(), 12);
        assert_eq!(reference.rarity_choices.len(), 7);
        assert_eq!(reference.divinity_choices.len(), 5);
        assert_eq!(
            values(&reference.text_field_choices),
            vec!["name", "name_without_punctuation", "ability_text", "race"]
        );
        assert_eq!(reference.text_exactness_choices[0].value, "contains_all");
        assert_eq!(reference.comparator_choices.len(), 5);
    }

    #[tokio::test]
    async fn test_invalid_basic_search_echoes_form() {
        let form = BasicSearchForm {
            generic_text: "   ".to_string(),
        };
        let page = service(vec![])
            .search(Some(SearchSubmission::Basic(form.clone())))
            .await
            .unwrap();

        assert!(page.cards.is_none());
        assert!(page.errors.contains("generic_text"));
        assert_eq!(page.basic_form, form);
    }

    #[tokio::test]
    async fn test_advanced_search_keeps_criteria() {
        let svc = service(vec![
            Card::new("CMF-001", "Fire")
                .with_cost("{R}{1}".parse::<Cost>().unwrap())
                .with_type("Resonator"),
        ]);
        let form = AdvancedSearchForm {
            text_exactness: "contains_all".to_string(),
            sort_by: "total_cost".to_string(),
            colours: vec!["R".to_string()],
            ..Default::default()
        };

        let page = svc
            .search(Some(SearchSubmission::Advanced(form)))
            .await
            .unwrap();

        assert_eq!(page.cards.as_ref().map(Vec::len), Some(1));
        let criteria = page.advanced_form_data.unwrap();
        assert_eq!(criteria.colours, vec!["R".to_string()]);
        assert!(!criteria.reverse_sort);
    }

    #[tokio::test]
    async fn test_view_card_not_found() {
        let err = service(vec![]).view_card("CMF-404").await.unwrap_err();

        assert!(matches!(err, CardbaseError::Card(CardError::NotFound { .. })));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_referred_by_excludes_self() {
        let svc = service(vec![
            Card::new("CMF-001", "Alice").with_ability("Search for \"Alice\" and put it into your hand."),
            Card::new("CMF-002", "Cheshire").with_ability("Call \"Alice\" from your hand."),
            Card::new("CMF-003", "Bob").with_ability("Alice is not quoted here."),
        ]);

        let page = svc.view_card("CMF-001").await.unwrap();
        let ids: Vec<_> = page.referred_by.iter().map(|c| c.card_id.as_str()).collect();
        assert_eq!(ids, vec!["CMF-002"]);
    }
}
