mod parser;
mod types;

pub use parser::parse_catalog;
pub use types::{Catalog, CatalogError, MalformedReason, ScenarioRecord};
