//! DuckDuckGo Instant Answer response schema
//!
//! Raw responses are parsed into a [`PartialAnswer`], a record where every
//! field is optional. Parsing never fails: values of an unexpected shape are
//! treated as absent, so a malformed section costs that section only.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Number, Value};

/// One upstream response, reduced to the fields the reconciler reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialAnswer {
    /// Abstract, may contain markup
    #[serde(default, rename = "Abstract", deserialize_with = "scalar")]
    pub summary: Option<String>,

    /// Abstract as plain text
    #[serde(default, rename = "AbstractText", deserialize_with = "scalar")]
    pub text_summary: Option<String>,

    /// Abstract source (e.g., "Wikipedia")
    #[serde(default, rename = "AbstractSource", deserialize_with = "scalar")]
    pub abstract_source: Option<String>,

    /// Abstract URL
    #[serde(default, rename = "AbstractURL", deserialize_with = "scalar")]
    pub abstract_url: Option<String>,

    /// Image URL
    #[serde(default, rename = "Image", deserialize_with = "scalar")]
    pub image: Option<String>,

    /// Heading/title
    #[serde(default, rename = "Heading", deserialize_with = "scalar")]
    pub heading: Option<String>,

    /// Instant answer
    #[serde(default, rename = "Answer", deserialize_with = "scalar")]
    pub answer: Option<String>,

    /// Instant answer type (e.g., "calc")
    #[serde(default, rename = "AnswerType", deserialize_with = "scalar")]
    pub answer_type: Option<String>,

    /// Definition
    #[serde(default, rename = "Definition", deserialize_with = "scalar")]
    pub definition: Option<String>,

    /// Definition source
    #[serde(default, rename = "DefinitionSource", deserialize_with = "scalar")]
    pub definition_source: Option<String>,

    /// Definition URL
    #[serde(default, rename = "DefinitionURL", deserialize_with = "scalar")]
    pub definition_url: Option<String>,

    /// Response type tag (A, C, D, E, N)
    #[serde(default, rename = "Type", deserialize_with = "scalar")]
    pub response_type: Option<String>,

    /// `Infobox.content`
    #[serde(default, rename = "Infobox", deserialize_with = "infobox_content")]
    pub infobox: Option<Vec<RawInfoboxEntry>>,

    /// Related topics (internal links)
    #[serde(default, rename = "RelatedTopics", deserialize_with = "sequence")]
    pub related_topics: Option<Vec<RawTopic>>,

    /// Results (external links)
    #[serde(default, rename = "Results", deserialize_with = "sequence")]
    pub results: Option<Vec<RawTopic>>,
}

impl PartialAnswer {
    /// Parse a raw JSON tree
    ///
    /// Anything that is not a JSON object yields the all-absent record.
    #[must_use]
    pub fn from_tree(tree: &Value) -> Self {
        if !tree.is_object() {
            return Self::default();
        }
        Self::deserialize(tree).unwrap_or_default()
    }
}

/// Entry of `Infobox.content`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawInfoboxEntry {
    /// `data_type`, usually "string"
    #[serde(default, deserialize_with = "scalar")]
    pub data_type: Option<String>,

    /// `value`
    #[serde(default, deserialize_with = "scalar")]
    pub value: Option<String>,

    /// `label`
    #[serde(default, deserialize_with = "scalar")]
    pub label: Option<String>,

    /// `wiki_order`, 0 when missing or not an unsigned integer
    #[serde(default, deserialize_with = "unsigned")]
    pub wiki_order: u32,
}

/// Entry of `RelatedTopics` or `Results`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawTopic {
    /// Result fragment, usually an anchor followed by a description
    #[serde(default, rename = "Result", deserialize_with = "scalar")]
    pub result: Option<String>,

    /// `FirstURL`
    #[serde(default, rename = "FirstURL", deserialize_with = "scalar")]
    pub first_url: Option<String>,

    /// `Icon`, absent unless it is an object
    #[serde(default, rename = "Icon", deserialize_with = "object")]
    pub icon: Option<RawIcon>,

    /// `Text`
    #[serde(default, rename = "Text", deserialize_with = "scalar")]
    pub text: Option<String>,
}

/// `Icon` object of a topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawIcon {
    /// `URL`
    #[serde(default, rename = "URL", deserialize_with = "scalar")]
    pub url: Option<String>,

    /// `Width`, 0 when empty or not numeric
    #[serde(default, rename = "Width", deserialize_with = "unsigned")]
    pub width: u32,

    /// `Height`, 0 when empty or not numeric
    #[serde(default, rename = "Height", deserialize_with = "unsigned")]
    pub height: u32,
}

/// Strings pass through, numbers and booleans are rendered, anything else is absent
fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(render_number(&n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Integral floats print without a fraction, so `42.0` reads as `42`
fn render_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{f:.0}")
        },
        _ => n.to_string(),
    }
}

/// Non-negative integers or numeric strings, 0 otherwise
fn unsigned<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or(0))
}

fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(parse_object(Value::deserialize(deserializer)?))
}

fn sequence<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(parse_sequence(Value::deserialize(deserializer)?))
}

/// `Infobox` is an object holding `content`; upstream sends `""` when there is none
fn infobox_content<'de, D>(deserializer: D) -> Result<Option<Vec<RawInfoboxEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(mut infobox) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(infobox.remove("content").and_then(parse_sequence))
}

fn parse_object<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_object() {
        T::deserialize(value).ok()
    } else {
        None
    }
}

/// Every array element becomes an entry; elements of the wrong shape become empty ones
fn parse_sequence<T: DeserializeOwned + Default>(value: Value) -> Option<Vec<T>> {
    let Value::Array(items) = value else {
        return None;
    };
    Some(
        items
            .into_iter()
            .map(|item| parse_object(item).unwrap_or_default())
            .collect(),
    )
}
