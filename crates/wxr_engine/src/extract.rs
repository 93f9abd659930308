use roxmltree::{Document, Node};

use crate::namespace::{WxrNamespace, CONTENT_NS};
use crate::types::ContentItem;

/// A single `<item>` whose required fields could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedItem {
    /// Zero-based position of the item in document order.
    pub index: usize,
    pub reason: String,
}

/// Walk a parsed export and yield one record per `<item>`, in document
/// order. The sequence is lazy; re-calling on the same document restarts
/// it from the beginning.
pub fn extract_items<'a, 'input: 'a>(
    doc: &'a Document<'input>,
    ns: WxrNamespace,
) -> impl Iterator<Item = Result<ContentItem, MalformedItem>> + 'a {
    doc.descendants()
        .filter(|n| n.has_tag_name("item"))
        .enumerate()
        .map(move |(index, item)| read_item(item, ns, index))
}

fn read_item(
    item: Node<'_, '_>,
    ns: WxrNamespace,
    index: usize,
) -> Result<ContentItem, MalformedItem> {
    let post_type = wp_text(item, ns, "post_type").ok_or_else(|| MalformedItem {
        index,
        reason: "missing wp:post_type".to_string(),
    })?;
    let status = wp_text(item, ns, "status").ok_or_else(|| MalformedItem {
        index,
        reason: "missing wp:status".to_string(),
    })?;

    // A missing <title> element gets the stock placeholder; a present but
    // blank one stays blank so the filename deriver can fall through to
    // its positional stem.
    let title = item
        .children()
        .find(|n| n.has_tag_name("title"))
        .map(|n| n.text().unwrap_or_default().trim().to_string())
        .unwrap_or_else(|| "Untitled".to_string());
    let slug = wp_text(item, ns, "post_name").unwrap_or_default();
    // Prefer the item's own post date; fall back to the generic RSS date.
    let date = wp_text(item, ns, "post_date").or_else(|| pub_date(item));

    // Literal encoded content; CDATA is resolved by the XML parser and the
    // HTML inside is left untouched for the transformer.
    let body = item
        .children()
        .find(|n| n.has_tag_name((CONTENT_NS, "encoded")))
        .and_then(|n| n.text())
        .unwrap_or_default()
        .to_string();

    let mut categories = Vec::new();
    let mut tags = Vec::new();
    for cat in item.children().filter(|n| n.has_tag_name("category")) {
        let Some(text) = cat.text().map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        match cat.attribute("domain") {
            Some("category") => categories.push(text.to_string()),
            Some("post_tag") => tags.push(text.to_string()),
            _ => {}
        }
    }

    Ok(ContentItem {
        title,
        slug,
        date,
        post_type,
        status,
        body,
        categories,
        tags,
    })
}

/// Text of a `wp:`-namespaced child, trimmed; empty counts as absent.
fn wp_text(item: Node<'_, '_>, ns: WxrNamespace, local: &str) -> Option<String> {
    item.children()
        .find(|n| n.has_tag_name((ns.wp, local)))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn child_text(item: Node<'_, '_>, name: &str) -> Option<String> {
    item.children()
        .find(|n| n.has_tag_name(name))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// RSS `pubDate` (RFC 2822), re-formatted to match `wp:post_date`. An
/// unparseable value is passed through as-is so nothing is silently lost.
fn pub_date(item: Node<'_, '_>) -> Option<String> {
    let raw = child_text(item, "pubDate")?;
    match chrono::DateTime::parse_from_rfc2822(&raw) {
        Ok(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        Err(_) => Some(raw),
    }
}
