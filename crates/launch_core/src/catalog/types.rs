use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

pub(crate) const ID_KEY: &str = "id";
const TITLE_KEY: &str = "title";
const AUTHOR_KEY: &str = "author";
const AUTHOR_URL_KEY: &str = "author url";
const DOWNLOAD_URL_KEY: &str = "download url";
const VERSION_KEY: &str = "version";

/// One installable scenario as reported by the lister.
///
/// The id is always non-empty. Every other key the lister printed is kept
/// verbatim, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioRecord {
    id: String,
    attributes: Vec<(String, String)>,
}

impl ScenarioRecord {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Looks up any key, including `id`.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == ID_KEY {
            return Some(&self.id);
        }
        self.attributes
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn title(&self) -> Option<&str> {
        self.get(TITLE_KEY)
    }

    pub fn author(&self) -> Option<&str> {
        self.get(AUTHOR_KEY)
    }

    pub fn author_url(&self) -> Option<&str> {
        self.get(AUTHOR_URL_KEY)
    }

    pub fn download_url(&self) -> Option<&str> {
        self.get(DOWNLOAD_URL_KEY)
    }

    pub fn version(&self) -> Option<&str> {
        self.get(VERSION_KEY)
    }

    /// The label a selector shows: the title, or the id when the lister gave none.
    pub fn display_title(&self) -> &str {
        self.title().unwrap_or(&self.id)
    }

    pub(crate) fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    pub(crate) fn set(&mut self, key: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|(existing, _)| existing == key)
        {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }
}

impl Serialize for ScenarioRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len() + 1))?;
        map.serialize_entry(ID_KEY, &self.id)?;
        for (key, value) in &self.attributes {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Scenarios in the order the lister printed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<ScenarioRecord>,
}

impl Catalog {
    pub(crate) fn from_records(records: Vec<ScenarioRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScenarioRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioRecord> {
        self.records.iter()
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ScenarioRecord;
    type IntoIter = std::slice::Iter<'a, ScenarioRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("attribute line appears before any scenario id")]
    AttributeBeforeScenario,
    #[error("attribute line has no \": \" separator")]
    MissingSeparator,
    #[error("scenario id is empty")]
    EmptyId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("malformed scenario listing at line {line}: {reason}")]
    MalformedCatalog { line: usize, reason: MalformedReason },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_key_overwrites_in_place() {
        let mut record = ScenarioRecord::new("a");
        record.set("title", "First");
        record.set("version", "1");
        record.set("title", "Second");

        assert_eq!(record.title(), Some("Second"));
        assert_eq!(
            record.attributes().collect::<Vec<_>>(),
            vec![("title", "Second"), ("version", "1")]
        );
    }

    #[test]
    fn display_title_falls_back_to_id() {
        let mut record = ScenarioRecord::new("com.example.untitled");
        assert_eq!(record.display_title(), "com.example.untitled");
        record.set("title", "Untitled No More");
        assert_eq!(record.display_title(), "Untitled No More");
    }

    #[test]
    fn serializes_id_first_then_attributes_in_order() {
        let mut record = ScenarioRecord::new("com.biggerplanet.ares");
        record.set("title", "Ares");
        record.set("author url", "http://www.biggerplanet.com");

        let json = serde_json::to_string(&Catalog::from_records(vec![record])).expect("json");
        assert_eq!(
            json,
            r#"[{"id":"com.biggerplanet.ares","title":"Ares","author url":"http://www.biggerplanet.com"}]"#
        );
    }

    #[test]
    fn position_of_finds_first_matching_id() {
        let catalog = Catalog::from_records(vec![
            ScenarioRecord::new("a"),
            ScenarioRecord::new("b"),
        ]);
        assert_eq!(catalog.position_of("b"), Some(1));
        assert_eq!(catalog.position_of("c"), None);
    }
}
