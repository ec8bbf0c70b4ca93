//! Configuration loading and management
//!
//! Every catalog-wide constant the engine needs (attribute codes, the
//! chronological partition ordering, partitions hidden from search, the
//! reference data shown next to the search forms) lives in one immutable
//! [`CatalogConfig`] handed to the engine at construction.

use crate::core::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named group of card types, as offered by the advanced search form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTypeGroup {
    /// Group label (e.g., "Rulers")
    pub name: String,

    /// Card type tags belonging to the group
    pub types: Vec<String>,
}

/// Metadata for a released set (partition of the card identifier space)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetInfo {
    /// Identifier prefix (e.g., "CMF" for "CMF-001")
    pub code: String,

    /// Display name
    pub name: String,

    /// Optional cluster/block the set was released in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
}

/// A sort option offered to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    /// Value submitted by the form (e.g., "most_recent")
    pub value: String,

    /// Human-readable label
    pub label: String,
}

/// Immutable catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Real attribute codes that may appear in a cost (e.g., "R", "G")
    pub attribute_codes: Vec<String>,

    /// Sentinel selecting cards whose cost carries no attribute at all
    pub void_code: String,

    /// Partition codes from oldest to newest release
    pub sets_in_order: Vec<String>,

    /// Partitions excluded from every search result
    #[serde(default)]
    pub unsupported_sets: Vec<String>,

    /// Set metadata shown by the presentation layer
    #[serde(default)]
    pub sets: Vec<SetInfo>,

    /// Card type grouping shown by the presentation layer
    #[serde(default)]
    pub card_type_groups: Vec<CardTypeGroup>,

    /// Rarity codes accepted by the advanced form
    #[serde(default)]
    pub rarities: Vec<String>,

    /// Divinity values accepted by the advanced form
    #[serde(default)]
    pub divinities: Vec<String>,

    /// Total cost buckets accepted by the advanced form ("X" is the wildcard bucket)
    #[serde(default)]
    pub cost_buckets: Vec<String>,

    /// Sort options offered by the advanced form
    pub sort_options: Vec<SortOption>,
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the constants are consistent with each other
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attribute_codes.is_empty() {
            return Err(ConfigError::MissingField {
                field: "attribute_codes".to_string(),
                context: "catalog config".to_string(),
            });
        }

        if self.void_code.is_empty() || self.attribute_codes.contains(&self.void_code) {
            return Err(ConfigError::InvalidValue {
                field: "void_code".to_string(),
                value: self.void_code.clone(),
                message: "must be non-empty and distinct from every attribute code".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for code in &self.sets_in_order {
            if !seen.insert(code.to_uppercase()) {
                return Err(ConfigError::InvalidValue {
                    field: "sets_in_order".to_string(),
                    value: code.clone(),
                    message: "partition listed more than once".to_string(),
                });
            }
        }

        if let Some(option) = self.sort_options.iter().find(|o| o.value.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "sort_options".to_string(),
                value: option.label.clone(),
                message: "sort option without a value".to_string(),
            });
        }

        Ok(())
    }

    /// Position of a partition in the chronological ordering
    ///
    /// Later releases have a higher rank. Unknown partitions yield `None`.
    pub fn partition_rank(&self, set_code: &str) -> Option<usize> {
        self.sets_in_order
            .iter()
            .position(|code| code.eq_ignore_ascii_case(set_code))
    }

    /// Whether a selected colour value is accepted (real codes plus the void sentinel)
    pub fn is_colour_choice(&self, value: &str) -> bool {
        value == self.void_code || self.attribute_codes.iter().any(|c| c == value)
    }

    // Choice checks below accept anything when the corresponding list is not
    // configured (permissive mode).

    /// Whether a set code is known, either from metadata or the release ordering
    pub fn is_set_choice(&self, value: &str) -> bool {
        (self.sets.is_empty() && self.sets_in_order.is_empty())
            || self.sets.iter().any(|s| s.code.eq_ignore_ascii_case(value))
            || self.partition_rank(value).is_some()
    }

    /// Whether a card type appears in any configured group
    pub fn is_card_type_choice(&self, value: &str) -> bool {
        self.card_type_groups.is_empty()
            || self
                .card_type_groups
                .iter()
                .any(|g| g.types.iter().any(|t| t == value))
    }

    pub fn is_rarity_choice(&self, value: &str) -> bool {
        self.rarities.is_empty() || self.rarities.iter().any(|r| r == value)
    }

    pub fn is_divinity_choice(&self, value: &str) -> bool {
        self.divinities.is_empty() || self.divinities.iter().any(|d| d == value)
    }

    pub fn is_cost_bucket_choice(&self, value: &str) -> bool {
        self.cost_buckets.is_empty() || self.cost_buckets.iter().any(|c| c == value)
    }

    /// Whether a sort key is offered to users
    pub fn is_sort_choice(&self, value: &str) -> bool {
        self.sort_options.is_empty() || self.sort_options.iter().any(|o| o.value == value)
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        let strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();

        Self {
            attribute_codes: strings(&["W", "R", "U", "G", "B"]),
            void_code: "V".to_string(),
            sets_in_order: strings(&["CMF", "TAT", "MPR", "MOA", "SKL", "TTW", "TMS", "BFA"]),
            unsupported_sets: strings(&["PR"]),
            sets: vec![
                SetInfo {
                    code: "CMF".to_string(),
                    name: "Crimson Moon's Fairy Tale".to_string(),
                    cluster: Some("Grimm".to_string()),
                },
                SetInfo {
                    code: "TAT".to_string(),
                    name: "The Castle of Heaven and The Two Towers".to_string(),
                    cluster: Some("Grimm".to_string()),
                },
                SetInfo {
                    code: "SKL".to_string(),
                    name: "The Seven Kings of the Lands".to_string(),
                    cluster: Some("Alice".to_string()),
                },
                SetInfo {
                    code: "BFA".to_string(),
                    name: "Battle for Attoractia".to_string(),
                    cluster: Some("Lapis".to_string()),
                },
            ],
            card_type_groups: vec![
                CardTypeGroup {
                    name: "Rulers".to_string(),
                    types: strings(&["Ruler", "J-Ruler"]),
                },
                CardTypeGroup {
                    name: "Main deck".to_string(),
                    types: strings(&[
                        "Resonator",
                        "Chant",
                        "Addition: Field",
                        "Addition: Resonator",
                        "Regalia",
                    ]),
                },
                CardTypeGroup {
                    name: "Stones".to_string(),
                    types: strings(&["Magic Stone", "Special Magic Stone"]),
                },
            ],
            rarities: strings(&["C", "U", "R", "SR", "XR", "RR", "JR"]),
            divinities: strings(&["1", "2", "3", "4", "5"]),
            cost_buckets: strings(&["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "X"]),
            sort_options: vec![
                SortOption {
                    value: "most_recent".to_string(),
                    label: "Most Recent".to_string(),
                },
                SortOption {
                    value: "total_cost".to_string(),
                    label: "Total Cost".to_string(),
                },
                SortOption {
                    value: "alphabetical".to_string(),
                    label: "Alphabetical".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default_config();

        assert_eq!(config.attribute_codes.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = CatalogConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = CatalogConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partition_rank_is_case_insensitive() {
        let config = CatalogConfig::default_config();

        assert_eq!(config.partition_rank("CMF"), Some(0));
        assert_eq!(config.partition_rank("bfa"), Some(7));
        assert_eq!(config.partition_rank("NOPE"), None);
    }

    #[test]
    fn test_void_code_must_not_shadow_attribute() {
        let mut config = CatalogConfig::default_config();
        config.void_code = "R".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "void_code"));
    }

    #[test]
    fn test_duplicate_partition_rejected() {
        let mut config = CatalogConfig::default_config();
        config.sets_in_order.push("cmf".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_choice_helpers() {
        let config = CatalogConfig::default_config();

        assert!(config.is_colour_choice("V"));
        assert!(config.is_colour_choice("R"));
        assert!(!config.is_colour_choice("Q"));
        assert!(config.is_set_choice("skl"));
        assert!(config.is_card_type_choice("J-Ruler"));
        assert!(config.is_sort_choice("alphabetical"));
        assert!(!config.is_sort_choice("random"));
        assert!(config.is_cost_bucket_choice("X"));
        assert!(!config.is_rarity_choice("Z"));
    }

    #[test]
    fn test_unconfigured_choices_are_permissive() {
        let mut config = CatalogConfig::default_config();
        config.rarities.clear();
        config.card_type_groups.clear();

        assert!(config.is_rarity_choice("anything"));
        assert!(config.is_card_type_choice("anything"));
        assert!(!config.is_divinity_choice("anything"));
    }
}
