//! Catalog page parser for extracting work references
//!
//! A catalog listing page contains anchors whose targets look like
//! `/works/<digits>`; the anchor text of the exact work link is the work's
//! title. This module is the only place that knows about that page shape.

use scraper::{Html, Selector};
use std::collections::{HashMap, HashSet};

/// One work discovered on a catalog page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRef {
    /// Opaque numeric-looking identifier, used as a URL path segment
    pub id: String,

    /// Raw display title, un-sanitized; used only for the output filename
    pub title: String,
}

/// Extracts the distinct set of works referenced by a catalog page
///
/// Ids are collected from every anchor whose target starts with
/// `/works/<digits>` (a chapter link like `/works/123/chapters/4` still
/// contributes id `123`). Duplicates collapse; each id appears once, in
/// order of first appearance. The title comes from the first anchor whose
/// target is exactly `/works/<id>`; an id with no such anchor (malformed
/// page) is skipped rather than surfaced.
///
/// Pure function: no I/O, no state, same output for the same input.
pub fn extract_works(html: &str) -> Vec<WorkRef> {
    let document = Html::parse_document(html);

    let anchor_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    let mut titles: HashMap<String, String> = HashMap::new();

    for element in document.select(&anchor_selector) {
        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        let id = match work_id_from_href(href) {
            Some(id) => id,
            None => continue,
        };

        if seen.insert(id.clone()) {
            order.push(id.clone());
        }

        // Only the exact work link carries the title
        if href == format!("/works/{}", id) && !titles.contains_key(&id) {
            let text: String = element.text().collect();
            if !text.is_empty() {
                titles.insert(id, text);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| {
            titles
                .remove(&id)
                .map(|title| WorkRef { id, title })
        })
        .collect()
}

/// Parses the leading digit run of a `/works/...` href into an id
fn work_id_from_href(href: &str) -> Option<String> {
    let rest = href.strip_prefix("/works/")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
