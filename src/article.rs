use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One record from the publications proxy (a Google Scholar organic result).
///
/// Nothing is required. A field that is missing, null or of an unexpected
/// type decodes as `None` rather than rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub citation_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,
    #[serde(default, deserialize_with = "lenient_cited_by", skip_serializing_if = "Option::is_none")]
    pub cited_by: Option<CitedBy>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitedBy {
    #[serde(default, deserialize_with = "lenient_count")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub serpapi_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cites_id: Option<String>,
}

// Strings pass through and numbers are shown as written, e.g. `"year": 2019`.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_cited_by<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CitedBy>, D::Error> {
    let value = Value::deserialize(d)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// String field lookup by name, used for deduplicating on a configurable key.
pub trait FieldLookup {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FieldLookup for Article {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => self.title.as_deref(),
            "link" => self.link.as_deref(),
            "citation_id" => self.citation_id.as_deref(),
            "authors" => self.authors.as_deref(),
            "publication" => self.publication.as_deref(),
            "year" => self.year.as_deref(),
            _ => None,
        }
    }
}

impl Article {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Decode one element of the proxy's array. Anything but an object is dropped.
    pub fn from_record(record: Value) -> Option<Self> {
        if !record.is_object() {
            return None;
        }
        serde_json::from_value(record).ok()
    }

    /// Citation count worth showing. A count of zero is treated as absent.
    pub fn cited_by_count(&self) -> Option<f64> {
        self.cited_by
            .as_ref()
            .and_then(|c| c.value)
            .filter(|value| *value != 0.0 && !value.is_nan())
    }

    pub fn authors_line(&self) -> Option<&str> {
        self.authors.as_deref().filter(|a| !a.is_empty())
    }

    pub fn year_line(&self) -> Option<&str> {
        self.year.as_deref().filter(|y| !y.is_empty())
    }

    /// List key: the citation id when there is one, otherwise the position.
    pub fn list_key(&self, index: usize) -> String {
        match self.citation_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => index.to_string(),
        }
    }
}
