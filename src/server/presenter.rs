//! Page presenters
//!
//! A presenter turns a page bundle into a response body. JSON is the default;
//! clients preferring `text/html` get the tera-rendered pages.

use crate::core::error::{CardbaseError, RequestError};
use crate::search::{CardPage, SearchPage};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tera::{Context, Tera};

const SEARCH_TEMPLATE: &str = "search.html";
const CARD_TEMPLATE: &str = "view_card.html";
const FORMS_TEMPLATE: &str = "search_forms.html";

/// Renders page bundles
pub trait Presenter: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn search_page(&self, page: &SearchPage) -> Result<String, CardbaseError>;

    fn card_page(&self, page: &CardPage) -> Result<String, CardbaseError>;
}

/// JSON bodies, the pages serialized as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPresenter;

impl JsonPresenter {
    fn render<T: Serialize>(template: &str, page: &T) -> Result<String, CardbaseError> {
        serde_json::to_string(page).map_err(|e| {
            RequestError::RenderFailed {
                template: template.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

impl Presenter for JsonPresenter {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn search_page(&self, page: &SearchPage) -> Result<String, CardbaseError> {
        Self::render(SEARCH_TEMPLATE, page)
    }

    fn card_page(&self, page: &CardPage) -> Result<String, CardbaseError> {
        Self::render(CARD_TEMPLATE, page)
    }
}

/// HTML pages rendered with tera
pub struct HtmlPresenter {
    tera: Tera,
}

impl HtmlPresenter {
    /// Build the presenter from the embedded templates
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (FORMS_TEMPLATE, include_str!("../../templates/search_forms.html")),
            (SEARCH_TEMPLATE, include_str!("../../templates/search.html")),
            (CARD_TEMPLATE, include_str!("../../templates/view_card.html")),
        ])?;
        Ok(Self { tera })
    }

    fn render<T: Serialize>(&self, template: &str, page: &T) -> Result<String, CardbaseError> {
        let failed = |message: String| -> CardbaseError {
            tracing::error!(template, error = %message, "Template rendering failed");
            RequestError::RenderFailed {
                template: template.to_string(),
                message,
            }
            .into()
        };

        let context = Context::from_serialize(page).map_err(|e| failed(e.to_string()))?;
        self.tera
            .render(template, &context)
            .map_err(|e| failed(e.to_string()))
    }
}

impl Presenter for HtmlPresenter {
    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn search_page(&self, page: &SearchPage) -> Result<String, CardbaseError> {
        self.render(SEARCH_TEMPLATE, page)
    }

    fn card_page(&self, page: &CardPage) -> Result<String, CardbaseError> {
        self.render(CARD_TEMPLATE, page)
    }
}

/// Whether the `Accept` header ranks HTML before JSON
///
/// Media types are taken in the order listed; quality factors are ignored.
pub fn prefers_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    for media in accept.split(',') {
        let media = media.split(';').next().unwrap_or_default().trim();
        match media {
            "text/html" | "application/xhtml+xml" => return true,
            "application/json" => return false,
            _ => {}
        }
    }
    false
}

/// Wrap a rendered body in a response
pub fn respond(presenter: &dyn Presenter, status: StatusCode, body: String) -> Response {
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(presenter.content_type()),
        )],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::core::card::Card;
    use crate::core::validation::{AdvancedSearchForm, BasicSearchForm, FieldErrors, StatInput};
    use crate::search::ReferenceData;

    fn page(cards: Option<Vec<Card>>) -> SearchPage {
        SearchPage {
            reference: ReferenceData::from_config(&CatalogConfig::default_config()),
            basic_form: BasicSearchForm::default(),
            advanced_form: AdvancedSearchForm::default(),
            advanced_form_data: None,
            cards,
            errors: FieldErrors::new(),
        }
    }

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_prefers_html() {
        assert!(prefers_html(&accept("text/html,application/xhtml+xml,*/*;q=0.8")));
        assert!(!prefers_html(&accept("application/json, text/html")));
        assert!(!prefers_html(&accept("*/*")));
        assert!(!prefers_html(&HeaderMap::new()));
    }

    #[test]
    fn test_html_search_page_lists_cards() {
        let presenter = HtmlPresenter::new().unwrap();
        let body = presenter
            .search_page(&page(Some(vec![Card::new("CMF-001", "Lumia & Co")])))
            .unwrap();

        assert!(body.contains("/cards/CMF-001"));
        assert!(body.contains("Lumia &amp; Co"));
    }

    #[test]
    fn test_html_blank_page_renders() {
        let presenter = HtmlPresenter::new().unwrap();

        assert!(presenter.search_page(&page(None)).is_ok());
    }

    #[test]
    fn test_html_advanced_form_echoes_selections() {
        let presenter = HtmlPresenter::new().unwrap();
        let mut echoed = page(None);
        echoed.advanced_form = AdvancedSearchForm {
            generic_text: "flame".to_string(),
            text_search_fields: vec!["ability_text".to_string()],
            text_exactness: "contains_any".to_string(),
            colours: vec!["V".to_string()],
            rarity: vec!["SR".to_string()],
            divinity: vec!["3".to_string()],
            cost: vec!["X".to_string()],
            def_comparator: Some("lt".to_string()),
            def_value: Some(StatInput::Text("400".to_string())),
            sort_by: "total_cost".to_string(),
            ..Default::default()
        };

        let body = presenter.search_page(&echoed).unwrap();
        assert!(body.contains(r#"name="text_search_fields" value="ability_text" checked"#));
        assert!(!body.contains(r#"name="text_search_fields" value="name" checked"#));
        assert!(body.contains(r#"<option value="contains_any" selected>"#));
        assert!(body.contains(r#"name="colours" value="V" checked"#));
        assert!(body.contains(r#"name="rarity" value="SR" checked"#));
        assert!(body.contains(r#"name="divinity" value="3" checked"#));
        assert!(body.contains(r#"name="cost" value="X" checked"#));
        assert!(body.contains(r#"<option value="lt" selected>"#));
        assert!(body.contains(r#"name="def_value" min="0" step="1" value="400""#));
        assert!(body.contains(r#"name="atk_value" min="0" step="1" value="">"#));
    }

    #[test]
    fn test_html_blank_form_targets_name() {
        let presenter = HtmlPresenter::new().unwrap();
        let body = presenter.search_page(&page(None)).unwrap();

        assert!(body.contains(r#"name="text_search_fields" value="name" checked"#));
        assert!(body.contains(r#"name="colours" value="V""#));
        assert!(!body.contains(" selected>"));
    }

    #[test]
    fn test_html_card_page_offers_search_forms() {
        let presenter = HtmlPresenter::new().unwrap();
        let card_page = CardPage {
            reference: ReferenceData::from_config(&CatalogConfig::default_config()),
            card: Card::new("CMF-001", "Alice"),
            referred_by: vec![],
            basic_form: BasicSearchForm::default(),
            advanced_form: AdvancedSearchForm::default(),
        };

        let body = presenter.card_page(&card_page).unwrap();
        assert!(body.contains(r#"id="basic-search""#));
        assert!(body.contains(r#"id="advanced-search""#));
        assert!(body.contains("Alice"));
    }

    #[test]
    fn test_json_search_page_flattens_reference_data() {
        let body = JsonPresenter.search_page(&page(None)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert!(json["card_types_list"].is_array());
        assert!(json["cards"].is_null());
    }
}
