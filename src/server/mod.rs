//! HTTP server for the search pages
//!
//! `ServerBuilder` wires a catalog and its configuration into a `ServerHost`,
//! which the REST exposure turns into an Axum router.

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod host;
pub mod presenter;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
pub use presenter::{HtmlPresenter, JsonPresenter, Presenter};
