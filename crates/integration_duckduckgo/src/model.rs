//! Normalized answer model
//!
//! The single output contract of the crate: one [`NormalizedAnswer`] per
//! query, built by the reconciler and handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Long-form answer card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abstract {
    /// Summary, may contain markup
    pub summary: String,
    /// Summary as plain text
    pub text_summary: String,
    /// Attribution (e.g., "Wikipedia")
    pub source: String,
    /// Link to the source article
    pub url: String,
    /// Illustrative image
    pub image_url: String,
    /// Heading/title
    pub heading: String,
}

/// Short direct answer (e.g., calculator output)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The answer itself
    pub instant_answer: String,
    /// Answer type; empty means no answer is present
    pub answer_type: String,
}

impl Answer {
    /// Check whether an answer is present
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.answer_type.is_empty()
    }
}

/// Dictionary definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Definition text
    pub definition: String,
    /// Name of the dictionary
    pub source: String,
    /// Link to the dictionary entry
    pub url: String,
}

/// One fact of the infobox
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoboxEntry {
    /// Value type, in practice always "string"
    pub data_type: String,
    /// Displayed value
    pub value: String,
    /// Name of the fact
    pub label: String,
    /// Upstream ordering hint; display order is the sequence order
    pub wiki_order: u32,
}

/// Icon attached to a topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Image URL, often relative to duckduckgo.com
    pub url: String,
    /// Width in pixels, 0 when unknown
    pub width: u32,
    /// Height in pixels, 0 when unknown
    pub height: u32,
}

/// Entry of the related topics or results lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Result fragment, usually an anchor followed by a description
    pub result: String,
    /// Target of the topic
    pub url: String,
    /// Topic icon
    pub icon: Icon,
    /// Plain-text rendering of the result
    pub text: String,
}

/// Classification of the upstream `Type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// `A`: a single article
    Article,
    /// `C`: a category listing
    Category,
    /// `D`: the query matches several subjects
    Disambiguation,
    /// `E`: an answer-only response
    Exclusive,
    /// `N`: a name
    Name,
    /// No tag
    Nothing,
    /// A tag this crate does not know
    Other,
}

impl ResponseKind {
    /// Classify a raw `Type` tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "A" => Self::Article,
            "C" => Self::Category,
            "D" => Self::Disambiguation,
            "E" => Self::Exclusive,
            "N" => Self::Name,
            "" => Self::Nothing,
            _ => Self::Other,
        }
    }

    /// Whether the response is a list of subjects rather than one subject
    #[must_use]
    pub const fn is_listing(self) -> bool {
        matches!(self, Self::Category | Self::Disambiguation)
    }
}

/// Reconciled result of one query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAnswer {
    #[serde(rename = "abstract")]
    pub abstract_: Abstract,
    pub answer: Answer,
    pub definition: Definition,
    /// Structured facts in upstream order
    pub infobox: Vec<InfoboxEntry>,
    /// Internal links in upstream order
    pub related_topics: Vec<Topic>,
    /// External links in upstream order
    pub results: Vec<Topic>,
    /// Upstream `Type` tag, single character or empty
    pub response_type: String,
}

impl NormalizedAnswer {
    /// Check whether the query produced nothing to show
    ///
    /// True iff the heading, answer type and definition are empty and
    /// every sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abstract_.heading.is_empty()
            && self.answer.answer_type.is_empty()
            && self.definition.definition.is_empty()
            && self.infobox.is_empty()
            && self.related_topics.is_empty()
            && self.results.is_empty()
    }

    /// Classify the response type tag
    #[must_use]
    pub fn kind(&self) -> ResponseKind {
        ResponseKind::from_tag(&self.response_type)
    }
}
