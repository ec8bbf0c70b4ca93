//! Raw search forms, exactly as submitted
//!
//! Raw forms keep every value as the user sent it so an invalid submission
//! can be echoed back for correction. Static rules (lengths, selection
//! counts) are declared with `validator`; choices that depend on the catalog
//! configuration are checked by [`CriteriaValidator`](super::CriteriaValidator).

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stat value as submitted: JSON clients send numbers, HTML forms send text
///
/// Floats are kept as submitted so the validator can reject fractions with a
/// field error instead of failing the whole body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatInput {
    Number(i64),
    Float(f64),
    Text(String),
}

/// The single-field quick search form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BasicSearchForm {
    #[validate(length(max = 200, message = "Ensure this value has at most 200 characters."))]
    pub generic_text: String,
}

/// The advanced search form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AdvancedSearchForm {
    #[validate(length(max = 200, message = "Ensure this value has at most 200 characters."))]
    pub generic_text: String,

    #[validate(length(max = 8, message = "Too many fields selected."))]
    pub text_search_fields: Vec<String>,

    pub text_exactness: String,

    #[validate(length(max = 16, message = "Too many colours selected."))]
    pub colours: Vec<String>,

    #[validate(length(max = 128, message = "Too many sets selected."))]
    pub sets: Vec<String>,

    #[validate(length(max = 64, message = "Too many card types selected."))]
    pub card_type: Vec<String>,

    #[validate(length(max = 32, message = "Too many rarities selected."))]
    pub rarity: Vec<String>,

    #[validate(length(max = 32, message = "Too many divinities selected."))]
    pub divinity: Vec<String>,

    pub atk_comparator: Option<String>,
    pub atk_value: Option<StatInput>,

    pub def_comparator: Option<String>,
    pub def_value: Option<StatInput>,

    #[validate(length(max = 32, message = "Too many costs selected."))]
    pub cost: Vec<String>,

    pub sort_by: String,
    pub reverse_sort: Option<bool>,
}

/// A submitted search, tagged by the form it came from
///
/// ```json
/// { "form": "basic", "generic_text": "lumia" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum SearchSubmission {
    Basic(BasicSearchForm),
    Advanced(AdvancedSearchForm),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submission_tag_selects_form() {
        let basic: SearchSubmission =
            serde_json::from_value(json!({"form": "basic", "generic_text": "lumia"})).unwrap();
        assert_eq!(
            basic,
            SearchSubmission::Basic(BasicSearchForm {
                generic_text: "lumia".to_string()
            })
        );

        let advanced: SearchSubmission =
            serde_json::from_value(json!({"form": "advanced", "colours": ["R"]})).unwrap();
        match advanced {
            SearchSubmission::Advanced(form) => {
                assert_eq!(form.colours, vec!["R".to_string()]);
                assert!(form.sets.is_empty());
                assert_eq!(form.reverse_sort, None);
            }
            other => panic!("expected advanced form, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_form_rejected() {
        let result = serde_json::from_value::<SearchSubmission>(json!({"form": "expert"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_stat_input_accepts_number_or_text() {
        let form: AdvancedSearchForm =
            serde_json::from_value(json!({"atk_value": 500, "def_value": "300"})).unwrap();

        assert_eq!(form.atk_value, Some(StatInput::Number(500)));
        assert_eq!(form.def_value, Some(StatInput::Text("300".to_string())));
    }

    #[test]
    fn test_stat_input_keeps_floats() {
        let form: AdvancedSearchForm =
            serde_json::from_value(json!({"atk_value": 500.5, "def_value": 300.0})).unwrap();

        assert_eq!(form.atk_value, Some(StatInput::Float(500.5)));
        assert_eq!(form.def_value, Some(StatInput::Float(300.0)));
    }

    #[test]
    fn test_length_rules() {
        let form = BasicSearchForm {
            generic_text: "x".repeat(201),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("generic_text"));
    }
}
