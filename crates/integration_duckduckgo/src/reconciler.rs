//! Answer reconciliation
//!
//! The same logical query is sent twice: once with the query as the `q`
//! parameter and once with the query as the URL path. The two responses
//! overlap but disagree; the parameter variant tends to carry abstracts and
//! answers, the path variant infoboxes and definitions. They are combined
//! field by field:
//!
//! - scalars: the as-parameter value when non-empty, else the as-path value
//! - sequences: the whole as-parameter sequence when non-empty, else the
//!   whole as-path sequence; never merged element by element
//!
//! The precedence direction is a behavioral contract. Do not swap it.

use serde_json::Value;

use crate::{
    api::{PartialAnswer, RawIcon, RawInfoboxEntry, RawTopic},
    model::{Abstract, Answer, Definition, Icon, InfoboxEntry, NormalizedAnswer, Topic},
};

/// Merge two raw responses for the same query
///
/// Either tree may be absent (failed, cancelled, or skipped request). Two
/// absent trees produce an empty answer.
#[must_use]
pub fn reconcile_trees(as_parameter: Option<&Value>, as_path: Option<&Value>) -> NormalizedAnswer {
    let as_parameter = as_parameter.map(PartialAnswer::from_tree).unwrap_or_default();
    let as_path = as_path.map(PartialAnswer::from_tree).unwrap_or_default();
    reconcile(&as_parameter, &as_path)
}

/// Merge two parsed responses for the same query
#[must_use]
pub fn reconcile(as_parameter: &PartialAnswer, as_path: &PartialAnswer) -> NormalizedAnswer {
    let (q, p) = (as_parameter, as_path);

    NormalizedAnswer {
        abstract_: Abstract {
            summary: coalesce(q.summary.as_deref(), p.summary.as_deref()),
            text_summary: coalesce(q.text_summary.as_deref(), p.text_summary.as_deref()),
            source: coalesce(q.abstract_source.as_deref(), p.abstract_source.as_deref()),
            url: coalesce(q.abstract_url.as_deref(), p.abstract_url.as_deref()),
            image_url: coalesce(q.image.as_deref(), p.image.as_deref()),
            heading: coalesce(q.heading.as_deref(), p.heading.as_deref()),
        },
        answer: Answer {
            instant_answer: coalesce(q.answer.as_deref(), p.answer.as_deref()),
            answer_type: coalesce(q.answer_type.as_deref(), p.answer_type.as_deref()),
        },
        definition: Definition {
            definition: coalesce(q.definition.as_deref(), p.definition.as_deref()),
            source: coalesce(q.definition_source.as_deref(), p.definition_source.as_deref()),
            url: coalesce(q.definition_url.as_deref(), p.definition_url.as_deref()),
        },
        infobox: first_non_empty(q.infobox.as_deref(), p.infobox.as_deref())
            .iter()
            .map(infobox_entry)
            .collect(),
        related_topics: first_non_empty(q.related_topics.as_deref(), p.related_topics.as_deref())
            .iter()
            .map(topic)
            .collect(),
        results: first_non_empty(q.results.as_deref(), p.results.as_deref())
            .iter()
            .map(topic)
            .collect(),
        response_type: coalesce(q.response_type.as_deref(), p.response_type.as_deref()),
    }
}

fn coalesce(preferred: Option<&str>, fallback: Option<&str>) -> String {
    match preferred {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => text(fallback),
    }
}

fn first_non_empty<'a, T>(preferred: Option<&'a [T]>, fallback: Option<&'a [T]>) -> &'a [T] {
    match preferred {
        Some(items) if !items.is_empty() => items,
        _ => fallback.unwrap_or_default(),
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn infobox_entry(raw: &RawInfoboxEntry) -> InfoboxEntry {
    InfoboxEntry {
        data_type: text(raw.data_type.as_deref()),
        value: text(raw.value.as_deref()),
        label: text(raw.label.as_deref()),
        wiki_order: raw.wiki_order,
    }
}

fn icon(raw: Option<&RawIcon>) -> Icon {
    raw.map_or_else(Icon::default, |raw| Icon {
        url: text(raw.url.as_deref()),
        width: raw.width,
        height: raw.height,
    })
}

fn topic(raw: &RawTopic) -> Topic {
    Topic {
        result: text(raw.result.as_deref()),
        url: text(raw.first_url.as_deref()),
        icon: icon(raw.icon.as_ref()),
        text: text(raw.text.as_deref()),
    }
}
