//! Content extraction functionality for the loader module
//!
//! Two independent passes over the same markup: one isolates the readable article body,
//! the other collects every document-level `<meta>` tag.

use scraper::{ElementRef, Html, Node, Selector};
use std::collections::BTreeMap;
use tracing::warn;

use super::normalize::normalize_text;

/// Elements whose contents are never readable text
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "iframe", "button", "select", "head",
];

/// Elements that start a new line in the extracted text
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5",
    "h6", "pre", "blockquote", "tr", "table", "figure", "figcaption", "dl", "dt", "dd", "hr",
];

/// Result of the main-content pass
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    /// Document title, if one was found
    pub title: Option<String>,

    /// Normalized main text. Empty when nothing readable was found.
    pub text: String,
}

fn compile_selectors(selectors: &[String]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|selector_str| match Selector::parse(selector_str) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!("Failed to parse selector '{}': {}", selector_str, e);
                None
            }
        })
        .collect()
}

fn is_excluded(element: &ElementRef, excluded: &[Selector]) -> bool {
    SKIPPED_TAGS.contains(&element.value().name()) || excluded.iter().any(|s| s.matches(element))
}

/// True when the element or any of its ancestors is boilerplate
fn inside_excluded(element: &ElementRef, excluded: &[Selector]) -> bool {
    std::iter::once(*element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .any(|el| is_excluded(&el, excluded))
}

/// Length of the text that would be extracted from `element`
fn visible_len(element: ElementRef, excluded: &[Selector]) -> usize {
    let mut text = String::new();
    collect_text(element, excluded, &mut text);
    text.split_whitespace().map(str::len).sum()
}

/// Choose the element holding the article body.
///
/// Candidates matching one of `content_selectors` that sit inside boilerplate are ignored;
/// of the rest, the one with the most extractable text wins. Without a candidate the whole
/// `<body>` is used.
fn select_root<'a>(
    document: &'a Html,
    content_selectors: &[Selector],
    excluded: &[Selector],
) -> Option<ElementRef<'a>> {
    let best = content_selectors
        .iter()
        .flat_map(|selector| document.select(selector))
        .filter(|element| !inside_excluded(element, excluded))
        .map(|element| (visible_len(element, excluded), element))
        .filter(|(len, _)| *len > 0)
        .max_by_key(|(len, _)| *len)
        .map(|(_, element)| element);

    best.or_else(|| {
        Selector::parse("body")
            .ok()
            .and_then(|body| document.select(&body).next())
    })
}

fn push_text(raw: &str, out: &mut String) {
    if raw.trim().is_empty() {
        if !raw.is_empty() {
            out.push(' ');
        }
        return;
    }
    if raw.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&raw.split_whitespace().collect::<Vec<_>>().join(" "));
    if raw.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

fn collect_text(element: ElementRef, excluded: &[Selector], out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(text, out),
            Node::Element(el) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_excluded(&child_element, excluded) {
                    continue;
                }
                let name = el.name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }

                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect_text(child_element, excluded, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn tidy_lines(raw: &str) -> String {
    let lines: Vec<String> = raw
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    normalize_text(&lines.join("\n"))
}

fn first_text(root: ElementRef, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    root.select(&selector)
        .map(|element| element.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .find(|text| !text.is_empty())
}

/// Isolate the readable article text of a page
///
/// # Arguments
///
/// * `html` - The raw page markup
/// * `content_selectors` - CSS selectors for candidate main-content containers
/// * `exclude_selectors` - CSS selectors for boilerplate to drop
///
/// # Returns
///
/// The page title and the normalized main text
pub fn extract_main_content(
    html: &str,
    content_selectors: &[String],
    exclude_selectors: &[String],
) -> ExtractedContent {
    let document = Html::parse_document(html);
    let content_selectors = compile_selectors(content_selectors);
    let excluded = compile_selectors(exclude_selectors);

    let document_title = first_text(document.root_element(), "title");

    let Some(root) = select_root(&document, &content_selectors, &excluded) else {
        return ExtractedContent {
            title: document_title,
            text: String::new(),
        };
    };

    let mut raw = String::new();
    collect_text(root, &excluded, &mut raw);

    ExtractedContent {
        title: document_title.or_else(|| first_text(root, "h1")),
        text: tidy_lines(&raw),
    }
}

/// Collect every document-level `<meta>` tag
///
/// The key is the `name` attribute, or `property` when there is no `name`. Tags without a
/// key or without `content` are ignored; a repeated key keeps the last value.
pub fn extract_meta_tags(html: &str) -> BTreeMap<String, String> {
    let document = Html::parse_document(html);
    let mut meta = BTreeMap::new();

    let Ok(selector) = Selector::parse("meta") else {
        return meta;
    };

    for element in document.select(&selector) {
        let attrs = element.value();
        let key = attrs.attr("name").or_else(|| attrs.attr("property"));
        if let (Some(key), Some(content)) = (key, attrs.attr("content")) {
            if !key.is_empty() && !content.is_empty() {
                meta.insert(key.to_string(), content.to_string());
            }
        }
    }

    meta
}
