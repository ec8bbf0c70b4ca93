//! Core module containing the card model, predicates and the catalog trait

pub mod card;
pub mod error;
pub mod predicate;
pub mod query;
pub mod store;
pub mod validation;

pub use card::{Card, CardField, CardId, Cost, CostToken, StatField};
pub use error::{CardbaseError, ErrorResponse};
pub use predicate::{Comparator, Predicate};
pub use query::{TextExactness, TextField};
pub use store::CardCatalog;
