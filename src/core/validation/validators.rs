//! Criteria validation
//!
//! Turns a raw form into typed criteria, or into per-field error messages
//! when anything is off. Small reusable checks are built the same way the
//! rest of the validation layer builds them: factories returning closures.

use super::criteria::{AdvancedCriteria, BasicCriteria};
use super::forms::{AdvancedSearchForm, BasicSearchForm, StatInput};
use crate::config::CatalogConfig;
use crate::core::predicate::Comparator;
use crate::core::query::{TextExactness, TextField};
use indexmap::IndexMap;
use serde::Serialize;
use validator::{Validate, ValidationErrors};

const REQUIRED: &str = "This field is required.";
const WHOLE_NUMBER: &str = "Enter a whole number.";

/// Upper bound accepted for ATK/DEF values
pub const MAX_STAT_VALUE: i64 = 99_999;

/// Ordered map of field name to error messages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields in the order their first error was recorded
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Collect the errors of a `validator` derive
    pub fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        let mut errors = Self::new();
        if let Err(validation) = result {
            let mut fields: Vec<_> = validation.field_errors().into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            for (field, field_errors) in fields {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({}).", error.code));
                    errors.add(&field, message);
                }
            }
        }
        errors
    }
}

/// Validator: value must not be empty
pub fn required() -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    |value: &str| {
        if value.is_empty() {
            Err(REQUIRED.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: every selected value must be accepted by `accept`
pub fn all_in<F>(accept: F) -> impl Fn(&[String]) -> Result<(), String>
where
    F: Fn(&str) -> bool,
{
    move |values: &[String]| match values.iter().find(|v| !accept(v.as_str())) {
        Some(invalid) => Err(invalid_choice(invalid)),
        None => Ok(()),
    }
}

/// Validator: optional stat value, within `0..=max`
///
/// Empty text counts as "not supplied".
pub fn stat_value(
    max: i64,
) -> impl Fn(Option<&StatInput>) -> Result<Option<i64>, String> + Send + Sync + Clone {
    move |value: Option<&StatInput>| {
        let number = match value {
            None => return Ok(None),
            Some(StatInput::Number(n)) => *n,
            Some(StatInput::Float(f)) if f.is_finite() && f.fract() == 0.0 => *f as i64,
            Some(StatInput::Float(_)) => return Err(WHOLE_NUMBER.to_string()),
            Some(StatInput::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse::<i64>()
                    .map_err(|_| WHOLE_NUMBER.to_string())?
            }
        };

        if number < 0 {
            Err("Ensure this value is greater than or equal to 0.".to_string())
        } else if number > max {
            Err(format!("Ensure this value is less than or equal to {}.", max))
        } else {
            Ok(Some(number))
        }
    }
}

fn invalid_choice(value: &str) -> String {
    format!(
        "Select a valid choice. {} is not one of the available choices.",
        value
    )
}

/// Validates raw forms against a catalog configuration
pub struct CriteriaValidator<'a> {
    config: &'a CatalogConfig,
}

impl<'a> CriteriaValidator<'a> {
    pub fn new(config: &'a CatalogConfig) -> Self {
        Self { config }
    }

    /// Validate the quick search form; the text is required
    pub fn validate_basic(&self, form: &BasicSearchForm) -> Result<BasicCriteria, FieldErrors> {
        let mut errors = FieldErrors::from_validation(form.validate());

        let generic_text = form.generic_text.trim().to_string();
        if let Err(message) = required()(&generic_text) {
            errors.add("generic_text", message);
        }

        if errors.is_empty() {
            Ok(BasicCriteria { generic_text })
        } else {
            Err(errors)
        }
    }

    /// Validate the advanced search form
    pub fn validate_advanced(
        &self,
        form: &AdvancedSearchForm,
    ) -> Result<AdvancedCriteria, FieldErrors> {
        let config = self.config;
        let mut errors = FieldErrors::from_validation(form.validate());

        let text_search_fields =
            parse_each(&mut errors, "text_search_fields", &form.text_search_fields, TextField::parse);
        let text_exactness = parse_required(
            &mut errors,
            "text_exactness",
            &form.text_exactness,
            TextExactness::parse,
        );

        check(&mut errors, "colours", &form.colours, |v| config.is_colour_choice(v));
        check(&mut errors, "sets", &form.sets, |v| config.is_set_choice(v));
        check(&mut errors, "card_type", &form.card_type, |v| config.is_card_type_choice(v));
        check(&mut errors, "rarity", &form.rarity, |v| config.is_rarity_choice(v));
        check(&mut errors, "divinity", &form.divinity, |v| config.is_divinity_choice(v));
        check(&mut errors, "cost", &form.cost, |v| config.is_cost_bucket_choice(v));

        let atk_comparator = parse_optional(&mut errors, "atk_comparator", &form.atk_comparator);
        let def_comparator = parse_optional(&mut errors, "def_comparator", &form.def_comparator);
        let atk_value = stat(&mut errors, "atk_value", form.atk_value.as_ref());
        let def_value = stat(&mut errors, "def_value", form.def_value.as_ref());

        let sort_by = form.sort_by.trim().to_string();
        match required()(&sort_by) {
            Err(message) => errors.add("sort_by", message),
            Ok(()) if !config.is_sort_choice(&sort_by) => {
                errors.add("sort_by", invalid_choice(&sort_by))
            }
            Ok(()) => {}
        }

        match text_exactness {
            Some(text_exactness) if errors.is_empty() => Ok(AdvancedCriteria {
                generic_text: form.generic_text.trim().to_string(),
                text_search_fields,
                text_exactness,
                colours: form.colours.clone(),
                sets: form.sets.clone(),
                card_type: form.card_type.clone(),
                rarity: form.rarity.clone(),
                divinity: form.divinity.clone(),
                atk_comparator,
                atk_value,
                def_comparator,
                def_value,
                cost: form.cost.clone(),
                sort_by,
                reverse_sort: form.reverse_sort.unwrap_or(false),
            }),
            _ => Err(errors),
        }
    }
}

fn check<F>(errors: &mut FieldErrors, field: &str, values: &[String], accept: F)
where
    F: Fn(&str) -> bool,
{
    if let Err(message) = all_in(accept)(values) {
        errors.add(field, message);
    }
}

fn parse_each<T>(
    errors: &mut FieldErrors,
    field: &str,
    values: &[String],
    parse: impl Fn(&str) -> Option<T>,
) -> Vec<T> {
    let mut parsed = Vec::with_capacity(values.len());
    for value in values {
        match parse(value) {
            Some(v) => parsed.push(v),
            None => errors.add(field, invalid_choice(value)),
        }
    }
    parsed
}

fn parse_required<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let value = value.trim();
    if let Err(message) = required()(value) {
        errors.add(field, message);
        return None;
    }
    let parsed = parse(value);
    if parsed.is_none() {
        errors.add(field, invalid_choice(value));
    }
    parsed
}

fn parse_optional(
    errors: &mut FieldErrors,
    field: &str,
    value: &Option<String>,
) -> Option<Comparator> {
    let value = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
    let parsed = Comparator::parse(value);
    if parsed.is_none() {
        errors.add(field, invalid_choice(value));
    }
    parsed
}

fn stat(errors: &mut FieldErrors, field: &str, value: Option<&StatInput>) -> Option<i64> {
    match stat_value(MAX_STAT_VALUE)(value) {
        Ok(number) => number,
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}
