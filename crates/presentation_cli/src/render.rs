//! Terminal rendering of a [`NormalizedAnswer`]
//!
//! The answer is laid out as categories of cards. Each card expands into
//! a preview: a list of widgets written one per line.

use std::io::{self, Write};

use integration_duckduckgo::{NormalizedAnswer, ResponseKind, Topic};

use crate::markup;

/// A titled group of cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub title: String,
    pub cards: Vec<Card>,
}

/// One displayable item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub uri: String,
    pub title: String,
    pub art: String,
    pub summary: String,
    pub kind: ResponseKind,
}

/// Preview building block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Image(String),
    Header(String),
    Summary(String),
    Action { label: &'static str, uri: String },
}

/// Group an answer into categories, skipping sections with nothing to show
pub fn categories(answer: &NormalizedAnswer) -> Vec<Category> {
    let kind = answer.kind();
    let mut categories = Vec::new();

    let abstract_ = &answer.abstract_;
    if !abstract_.heading.is_empty() {
        let uri = if abstract_.url.is_empty() {
            abstract_.heading.clone()
        } else {
            abstract_.url.clone()
        };
        categories.push(Category {
            id: "abstract",
            title: abstract_.heading.clone(),
            cards: vec![Card {
                uri,
                title: abstract_.heading.clone(),
                art: abstract_.image_url.clone(),
                summary: abstract_.text_summary.clone(),
                kind,
            }],
        });
    }

    if answer.answer.is_present() {
        categories.push(Category {
            id: "answer",
            title: "Answer".to_string(),
            cards: vec![Card {
                uri: answer.answer.answer_type.clone(),
                title: answer.answer.instant_answer.clone(),
                art: String::new(),
                summary: answer.answer.answer_type.clone(),
                kind,
            }],
        });
    }

    let definition = &answer.definition;
    if !definition.definition.is_empty() {
        categories.push(Category {
            id: "definition",
            title: "Definition".to_string(),
            cards: vec![Card {
                uri: definition.url.clone(),
                title: definition.source.clone(),
                art: String::new(),
                summary: definition.definition.clone(),
                kind,
            }],
        });
    }

    if !answer.infobox.is_empty() {
        categories.push(Category {
            id: "infobox",
            title: "Other informations".to_string(),
            cards: answer
                .infobox
                .iter()
                .map(|entry| Card {
                    uri: entry.wiki_order.to_string(),
                    title: entry.label.clone(),
                    art: String::new(),
                    summary: entry.value.clone(),
                    kind,
                })
                .collect(),
        });
    }

    let related_title = if kind == ResponseKind::Disambiguation {
        "Meanings"
    } else {
        "Related topics"
    };
    push_topics(&mut categories, "related", related_title, &answer.related_topics, kind);
    push_topics(&mut categories, "results", "Results", &answer.results, kind);

    categories
}

fn push_topics(
    categories: &mut Vec<Category>,
    id: &'static str,
    title: &str,
    topics: &[Topic],
    kind: ResponseKind,
) {
    let cards: Vec<Card> = topics
        .iter()
        .filter(|topic| !topic.result.is_empty() || !topic.url.is_empty())
        .map(|topic| topic_card(topic, kind))
        .collect();

    if !cards.is_empty() {
        categories.push(Category {
            id,
            title: title.to_string(),
            cards,
        });
    }
}

fn topic_card(topic: &Topic, kind: ResponseKind) -> Card {
    let text = markup::split_result(&topic.result);
    let title = if text.title.is_empty() {
        topic.text.clone()
    } else {
        text.title
    };

    Card {
        uri: topic.url.clone(),
        title,
        art: topic.icon.url.clone(),
        summary: text.description,
        kind,
    }
}

/// Widgets shown for a card
///
/// Answer-only responses show just the header and summary.
pub fn preview(card: &Card) -> Vec<Widget> {
    let mut widgets = Vec::with_capacity(4);

    if card.kind != ResponseKind::Exclusive && !card.art.is_empty() {
        widgets.push(Widget::Image(card.art.clone()));
    }
    widgets.push(Widget::Header(card.title.clone()));
    if !card.summary.is_empty() {
        widgets.push(Widget::Summary(card.summary.clone()));
    }
    if card.kind != ResponseKind::Exclusive && looks_like_link(&card.uri) {
        widgets.push(Widget::Action {
            label: "See more",
            uri: card.uri.clone(),
        });
    }

    widgets
}

fn looks_like_link(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

/// Write every category of `answer` as plain text
pub fn write_answer(out: &mut impl Write, answer: &NormalizedAnswer) -> io::Result<()> {
    for (index, category) in categories(answer).iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(out, "== {} ==", category.title)?;
        for card in &category.cards {
            for widget in preview(card) {
                match widget {
                    Widget::Image(url) => writeln!(out, "  [image] {url}")?,
                    Widget::Header(title) => writeln!(out, "* {title}")?,
                    Widget::Summary(text) => writeln!(out, "  {text}")?,
                    Widget::Action { label, uri } => writeln!(out, "  {label}: {uri}")?,
                }
            }
        }
    }
    Ok(())
}
