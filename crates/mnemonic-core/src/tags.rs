use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Deref;
use thiserror::Error;

/// Free-text labels attached to a bookmark.
///
/// Semantically a set, but kept as a sequence: order and duplicates are
/// preserved as given and carry no meaning. Stored as a JSON array of
/// strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

/// Returned when a stored tag value is not a JSON array of strings.
#[derive(Debug, Error)]
#[error("unable to parse tags from {raw:?}: {source}")]
pub struct TagDecodeError {
    raw: String,
    #[source]
    source: serde_json::Error,
}

impl TagDecodeError {
    /// The raw stored value that failed to decode.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes the tags into their storage form.
    pub fn encode(&self) -> String {
        Value::Array(self.0.iter().cloned().map(Value::String).collect()).to_string()
    }

    /// Decodes tags from their storage form.
    ///
    /// A missing value (SQL `NULL`) and the JSON literal `null` both decode
    /// to an empty set of tags.
    pub fn decode(raw: Option<&str>) -> Result<Self, TagDecodeError> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };

        serde_json::from_str::<Option<Vec<String>>>(raw)
            .map(|tags| Self(tags.unwrap_or_default()))
            .map_err(|source| TagDecodeError {
                raw: raw.to_string(),
                source,
            })
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for Tags {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
