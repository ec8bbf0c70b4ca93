//! Validation of submitted search forms
//!
//! Raw forms ([`forms`]) are turned into typed criteria ([`criteria`]) by the
//! [`CriteriaValidator`]. A rejected form is not an error: the caller echoes
//! it back together with the [`FieldErrors`].

pub mod criteria;
pub mod extractor;
pub mod forms;
pub mod validators;

pub use criteria::{AdvancedCriteria, BasicCriteria};
pub use extractor::Submitted;
pub use forms::{AdvancedSearchForm, BasicSearchForm, SearchSubmission, StatInput};
pub use validators::{CriteriaValidator, FieldErrors};
