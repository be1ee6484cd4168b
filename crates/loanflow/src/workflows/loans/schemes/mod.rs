mod catalog;
mod matcher;

pub use catalog::{LoanScheme, SchemeCatalog, SchemeEligibility};
pub use matcher::{is_eligible, match_score, SchemeMatch, SchemeMatcher};
