//! Request body encoding.

use url::form_urlencoded;

use crate::config::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON};

/// Data sent with a request: a query string for `GET`, a body otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestData {
    /// Nothing to send.
    #[default]
    Empty,
    /// Text sent as-is. A JSON object or array is labelled `application/json`.
    Raw(String),
    /// Key/value pairs, url-encoded and labelled as a form.
    Form(Vec<(String, String)>),
}

impl RequestData {
    /// Returns `true` if there is nothing to send.
    pub fn is_empty(&self) -> bool {
        match self {
            RequestData::Empty => true,
            RequestData::Raw(text) => text.is_empty(),
            RequestData::Form(pairs) => pairs.is_empty(),
        }
    }

    /// Encodes the data as text, without any content type.
    pub fn to_query(&self) -> String {
        match self {
            RequestData::Empty => String::new(),
            RequestData::Raw(text) => text.clone(),
            RequestData::Form(pairs) => form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish(),
        }
    }

    /// Encodes the data as a body and picks its content type.
    ///
    /// Returns `None` when there is nothing to send. Raw text that is not a JSON
    /// object or array carries no content type.
    pub fn encode(&self) -> Option<(String, Option<&'static str>)> {
        if self.is_empty() {
            return None;
        }

        let content_type = match self {
            RequestData::Empty => None,
            RequestData::Raw(text) => is_json_document(text).then_some(CONTENT_TYPE_JSON),
            RequestData::Form(_) => Some(CONTENT_TYPE_FORM),
        };

        Some((self.to_query(), content_type))
    }
}

fn is_json_document(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text)
        .map(|value| value.is_object() || value.is_array())
        .unwrap_or(false)
}

impl From<&str> for RequestData {
    fn from(text: &str) -> Self {
        RequestData::Raw(text.to_string())
    }
}

impl From<String> for RequestData {
    fn from(text: String) -> Self {
        RequestData::Raw(text)
    }
}

impl<K, V> From<Vec<(K, V)>> for RequestData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        RequestData::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for RequestData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        RequestData::from(Vec::from(pairs))
    }
}

impl From<()> for RequestData {
    fn from(_: ()) -> Self {
        RequestData::Empty
    }
}
