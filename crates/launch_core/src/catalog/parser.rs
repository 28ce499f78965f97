use tracing::debug;

use super::types::{Catalog, CatalogError, MalformedReason, ScenarioRecord, ID_KEY};

const ATTRIBUTE_SEPARATOR: &str = ": ";
const ID_TERMINATOR: char = ':';

/// Parses the lister's stdout.
///
/// An unindented line starts a scenario and names its id (a trailing `:` is
/// dropped). Indented lines are `key: value` attributes of the most recent
/// scenario, split on the first `": "`. Blank lines are ignored.
pub fn parse_catalog(raw: &str) -> Result<Catalog, CatalogError> {
    let mut records = Vec::<ScenarioRecord>::new();

    for (index, line) in raw.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            let record = records
                .last_mut()
                .ok_or_else(|| malformed(line_number, MalformedReason::AttributeBeforeScenario))?;
            let (key, value) = line
                .trim()
                .split_once(ATTRIBUTE_SEPARATOR)
                .ok_or_else(|| malformed(line_number, MalformedReason::MissingSeparator))?;
            if key == ID_KEY {
                record.set_id(value);
            } else {
                record.set(key, value);
            }
        } else {
            let trimmed = line.trim_end();
            let id = trimmed.strip_suffix(ID_TERMINATOR).unwrap_or(trimmed);
            if id.is_empty() {
                return Err(malformed(line_number, MalformedReason::EmptyId));
            }
            records.push(ScenarioRecord::new(id));
        }
    }

    debug!(scenario_count = records.len(), "catalog_parsed");
    Ok(Catalog::from_records(records))
}

fn malformed(line: usize, reason: MalformedReason) -> CatalogError {
    CatalogError::MalformedCatalog { line, reason }
}
