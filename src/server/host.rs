//! Server host for transport-agnostic API exposure
//!
//! The host holds everything an exposure needs to answer requests: the search
//! service and the presenters. It knows nothing about routing.

use crate::config::CatalogConfig;
use crate::core::store::CardCatalog;
use crate::search::CardSearchService;
use crate::server::presenter::{HtmlPresenter, JsonPresenter, Presenter};
use anyhow::Result;
use std::sync::Arc;

/// Host context shared by every exposure
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::from_builder_components(catalog, config)?;
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    /// Search engine over the configured catalog
    pub search: Arc<CardSearchService>,

    /// Default presenter
    pub json: Arc<JsonPresenter>,

    /// Presenter for clients asking for HTML
    pub html: Arc<HtmlPresenter>,
}

impl ServerHost {
    /// Build the host from builder components
    pub fn from_builder_components(
        catalog: Arc<dyn CardCatalog>,
        config: CatalogConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            search: Arc::new(CardSearchService::new(catalog, Arc::new(config))),
            json: Arc::new(JsonPresenter),
            html: Arc::new(HtmlPresenter::new()?),
        })
    }

    /// Pick a presenter for a request
    pub fn presenter(&self, html: bool) -> &dyn Presenter {
        if html {
            self.html.as_ref()
        } else {
            self.json.as_ref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Card;
    use crate::storage::InMemoryCatalog;

    fn make_host() -> ServerHost {
        let catalog = InMemoryCatalog::from_cards(vec![Card::new("CMF-001", "Alice")]).unwrap();
        ServerHost::from_builder_components(Arc::new(catalog), CatalogConfig::default_config())
            .expect("should build host")
    }

    #[test]
    fn test_from_builder_components_creates_host() {
        let host = make_host();
        assert_eq!(host.search.config().sets_in_order.len(), 8);
    }

    #[test]
    fn test_presenter_selection() {
        let host = make_host();
        assert_eq!(host.presenter(false).content_type(), "application/json");
        assert!(host.presenter(true).content_type().starts_with("text/html"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = CatalogConfig::default_config();
        config.attribute_codes.clear();

        let result =
            ServerHost::from_builder_components(Arc::new(InMemoryCatalog::new()), config);
        assert!(result.is_err());
    }
}
