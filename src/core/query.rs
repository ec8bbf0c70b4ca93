//! Predicate builders
//!
//! Each builder turns one category of selected options into a [`Predicate`].
//! Within a category any selected option suffices (OR); an empty selection
//! returns [`Predicate::All`].

use crate::config::CatalogConfig;
use crate::core::card::{CardField, StatField};
use crate::core::predicate::{Comparator, Predicate};
use serde::{Deserialize, Serialize};

/// How free text is matched against a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextExactness {
    /// The whole phrase must appear as typed
    Exact,
    /// Every whitespace-separated word must appear somewhere
    ContainsAll,
    /// At least one word must appear
    ContainsAny,
}

impl TextExactness {
    /// Every mode, in the order the form offers them
    pub const ALL: [TextExactness; 3] = [
        TextExactness::ContainsAll,
        TextExactness::ContainsAny,
        TextExactness::Exact,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == value)
    }

    /// Form value
    pub fn as_str(self) -> &'static str {
        match self {
            TextExactness::Exact => "exact",
            TextExactness::ContainsAll => "contains_all",
            TextExactness::ContainsAny => "contains_any",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextExactness::Exact => "Exact phrase",
            TextExactness::ContainsAll => "All words",
            TextExactness::ContainsAny => "Any word",
        }
    }
}

/// Fields a user may target with free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Name,
    NameWithoutPunctuation,
    AbilityText,
    Race,
}

impl TextField {
    pub const ALL: [TextField; 4] = [
        TextField::Name,
        TextField::NameWithoutPunctuation,
        TextField::AbilityText,
        TextField::Race,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }

    /// Form value
    pub fn as_str(self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::NameWithoutPunctuation => "name_without_punctuation",
            TextField::AbilityText => "ability_text",
            TextField::Race => "race",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextField::Name => "Name",
            TextField::NameWithoutPunctuation => "Name (ignoring punctuation)",
            TextField::AbilityText => "Ability text",
            TextField::Race => "Race / trait",
        }
    }

    pub fn card_field(self) -> CardField {
        match self {
            TextField::Name => CardField::Name,
            TextField::NameWithoutPunctuation => CardField::NameWithoutPunctuation,
            TextField::AbilityText => CardField::AbilityText,
            TextField::Race => CardField::Race,
        }
    }
}

pub fn rarity_predicate(rarities: &[String]) -> Predicate {
    Predicate::any_of(
        rarities
            .iter()
            .map(|rarity| Predicate::equals(CardField::Rarity, rarity.as_str())),
    )
}

pub fn card_type_predicate(card_types: &[String]) -> Predicate {
    Predicate::any_of(
        card_types
            .iter()
            .map(|card_type| Predicate::equals(CardField::CardType, card_type.as_str())),
    )
}

pub fn divinity_predicate(divinities: &[String]) -> Predicate {
    Predicate::any_of(
        divinities
            .iter()
            .map(|divinity| Predicate::equals(CardField::Divinity, divinity.as_str())),
    )
}

/// Cards whose identifier starts with `<set>-`, ignoring case
pub fn set_predicate(sets: &[String]) -> Predicate {
    Predicate::any_of(
        sets.iter()
            .map(|set| Predicate::istarts_with(CardField::CardId, format!("{}-", set))),
    )
}

/// Colour selection
///
/// The void sentinel selects cards whose cost mentions none of the real
/// attribute codes. It is OR'd with the other selected colours like any
/// other option.
pub fn attribute_predicate(colours: &[String], config: &CatalogConfig) -> Predicate {
    Predicate::any_of(colours.iter().map(|colour| {
        if *colour == config.void_code {
            Predicate::all_of(
                config
                    .attribute_codes
                    .iter()
                    .map(|code| Predicate::contains(CardField::Cost, code.as_str()).not()),
            )
        } else {
            Predicate::contains(CardField::Cost, colour.as_str())
        }
    }))
}

/// Stat comparison, only when both a comparator and a value are supplied
pub fn stat_predicate(
    field: StatField,
    comparator: Option<Comparator>,
    value: Option<i64>,
) -> Predicate {
    match (comparator, value) {
        (Some(comparator), Some(value)) => Predicate::compare(field, comparator, value),
        _ => Predicate::All,
    }
}

/// Free-text predicate on a single field
pub fn field_text_predicate(
    field: CardField,
    search_text: &str,
    exactness: TextExactness,
) -> Predicate {
    if search_text.is_empty() {
        return Predicate::All;
    }

    match exactness {
        TextExactness::Exact => Predicate::icontains(field, search_text),
        TextExactness::ContainsAll => Predicate::all_of(
            search_text
                .split_whitespace()
                .map(|word| Predicate::icontains(field, word)),
        ),
        TextExactness::ContainsAny => Predicate::any_of(
            search_text
                .split_whitespace()
                .map(|word| Predicate::icontains(field, word)),
        ),
    }
}

/// Free-text predicate across several fields (OR'd)
///
/// Targeting `name` also searches the punctuation-stripped name with the same
/// word logic.
pub fn text_predicate(
    search_text: &str,
    fields: &[TextField],
    exactness: TextExactness,
) -> Predicate {
    if search_text.is_empty() {
        return Predicate::All;
    }

    let mut predicate = Predicate::All;
    for field in fields {
        predicate = predicate.or(field_text_predicate(
            field.card_field(),
            search_text,
            exactness,
        ));
        if *field == TextField::Name {
            predicate = predicate.or(field_text_predicate(
                CardField::NameWithoutPunctuation,
                search_text,
                exactness,
            ));
        }
    }
    predicate
}
