//! Topic markup parsing
//!
//! Related topics and results carry a `Result` fragment such as
//! `<a href="https://duckduckgo.com/Foo">Foo</a> - description`. The anchor
//! text is the card title and whatever follows the anchor is the description.

use scraper::{ElementRef, Html, Node, Selector};

/// Title and description extracted from a result fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicText {
    pub title: String,
    pub description: String,
}

/// Split a result fragment into title and description
///
/// Without an anchor the whole text becomes the title.
pub fn split_result(fragment: &str) -> TopicText {
    let document = Html::parse_fragment(fragment);

    let anchor = Selector::parse("a")
        .ok()
        .and_then(|selector| document.select(&selector).next());

    let Some(anchor) = anchor else {
        return TopicText {
            title: collapse(&document.root_element().text().collect::<String>()),
            description: String::new(),
        };
    };

    let title = collapse(&anchor.text().collect::<String>());
    let trailing: String = anchor
        .next_siblings()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(String::from(&**text)),
            Node::Element(_) => ElementRef::wrap(node).map(|e| e.text().collect::<String>()),
            _ => None,
        })
        .collect();

    let description = collapse(trailing.trim_start().trim_start_matches(['-', '–']));

    TopicText { title, description }
}

/// Trim and squeeze runs of whitespace
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
