//! Composable boolean predicates over cards
//!
//! A [`Predicate`] is a plain value: builders produce it, the composer
//! combines it, and a catalog interprets it against whatever storage it sits
//! on. [`Predicate::matches`] is the reference interpretation used by the
//! in-memory catalog.
//!
//! [`Predicate::All`] is the identity of both combinators, so a builder can
//! start from `All` and fold its selections in; an empty selection leaves
//! `All` untouched and therefore filters nothing.

use crate::core::card::{Card, CardField, StatField};
use serde::{Deserialize, Serialize};

/// Numeric comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Exact,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl Comparator {
    pub const ALL: [Comparator; 5] = [
        Comparator::Exact,
        Comparator::Gt,
        Comparator::Lt,
        Comparator::Gte,
        Comparator::Lte,
    ];

    /// Parse the form value of a comparator ("exact", "gt", "lt", "gte", "lte")
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Exact => "exact",
            Comparator::Gt => "gt",
            Comparator::Lt => "lt",
            Comparator::Gte => "gte",
            Comparator::Lte => "lte",
        }
    }

    /// Symbol shown in the form
    pub fn label(self) -> &'static str {
        match self {
            Comparator::Exact => "=",
            Comparator::Gt => ">",
            Comparator::Lt => "<",
            Comparator::Gte => ">=",
            Comparator::Lte => "<=",
        }
    }

    pub fn compare(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparator::Exact => lhs == rhs,
            Comparator::Gt => lhs > rhs,
            Comparator::Lt => lhs < rhs,
            Comparator::Gte => lhs >= rhs,
            Comparator::Lte => lhs <= rhs,
        }
    }
}

/// Boolean predicate tree over card fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Predicate {
    /// Matches every card
    All,

    /// Field (any value, for multi-valued fields) equals `value`
    Equals { field: CardField, value: String },

    /// Field (any value) contains `value` as a substring
    Contains {
        field: CardField,
        value: String,
        case_sensitive: bool,
    },

    /// Field starts with `prefix`, ignoring case
    PrefixMatch { field: CardField, prefix: String },

    /// Numeric comparison; a null stat never matches
    Comparison {
        field: StatField,
        comparator: Comparator,
        value: i64,
    },

    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn equals(field: CardField, value: impl Into<String>) -> Self {
        Predicate::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn contains(field: CardField, value: impl Into<String>) -> Self {
        Predicate::Contains {
            field,
            value: value.into(),
            case_sensitive: true,
        }
    }

    pub fn icontains(field: CardField, value: impl Into<String>) -> Self {
        Predicate::Contains {
            field,
            value: value.into(),
            case_sensitive: false,
        }
    }

    pub fn istarts_with(field: CardField, prefix: impl Into<String>) -> Self {
        Predicate::PrefixMatch {
            field,
            prefix: prefix.into(),
        }
    }

    pub fn compare(field: StatField, comparator: Comparator, value: i64) -> Self {
        Predicate::Comparison {
            field,
            comparator,
            value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Predicate::All)
    }

    /// Conjunction, with `All` as identity
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::All, p) | (p, Predicate::All) => p,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, Predicate::And(mut right)) => {
                right.insert(0, p);
                Predicate::And(right)
            }
            (left, right) => Predicate::And(vec![left, right]),
        }
    }

    /// Disjunction, with `All` as identity
    ///
    /// An empty selection contributes nothing to an OR, so `All | p` is `p`
    /// rather than "everything".
    pub fn or(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::All, p) | (p, Predicate::All) => p,
            (Predicate::Or(mut left), Predicate::Or(right)) => {
                left.extend(right);
                Predicate::Or(left)
            }
            (Predicate::Or(mut left), p) => {
                left.push(p);
                Predicate::Or(left)
            }
            (p, Predicate::Or(mut right)) => {
                right.insert(0, p);
                Predicate::Or(right)
            }
            (left, right) => Predicate::Or(vec![left, right]),
        }
    }

    /// Negation; negating `All` stays `All` so an empty exclusion excludes nothing
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        match self {
            Predicate::All => Predicate::All,
            Predicate::Not(inner) => *inner,
            p => Predicate::Not(Box::new(p)),
        }
    }

    /// Fold predicates with AND
    pub fn all_of(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
        predicates.into_iter().fold(Predicate::All, Predicate::and)
    }

    /// Fold predicates with OR
    pub fn any_of(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
        predicates.into_iter().fold(Predicate::All, Predicate::or)
    }

    /// Evaluate against a single card
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Equals { field, value } => {
                card.text_values(*field).iter().any(|v| v == value)
            }
            Predicate::Contains {
                field,
                value,
                case_sensitive: true,
            } => card
                .text_values(*field)
                .iter()
                .any(|v| v.contains(value.as_str())),
            Predicate::Contains {
                field,
                value,
                case_sensitive: false,
            } => {
                let needle = value.to_lowercase();
                card.text_values(*field)
                    .iter()
                    .any(|v| v.to_lowercase().contains(&needle))
            }
            Predicate::PrefixMatch { field, prefix } => {
                let prefix = prefix.to_lowercase();
                card.text_values(*field)
                    .iter()
                    .any(|v| v.to_lowercase().starts_with(&prefix))
            }
            Predicate::Comparison {
                field,
                comparator,
                value,
            } => card
                .stat(*field)
                .is_some_and(|stat| comparator.compare(stat, *value)),
            Predicate::And(predicates) => predicates.iter().all(|p| p.matches(card)),
            Predicate::Or(predicates) => predicates.iter().any(|p| p.matches(card)),
            Predicate::Not(inner) => !inner.matches(card),
        }
    }
}
