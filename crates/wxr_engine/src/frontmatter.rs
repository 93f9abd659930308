use crate::types::{ContentItem, FrontMatterStyle};

/// Build the header to prepend to one item's converted body. The returned
/// text carries no trailing blank line; the pipeline inserts the
/// separator between header and body.
pub fn build_front_matter(item: &ContentItem, style: FrontMatterStyle) -> String {
    match style {
        FrontMatterStyle::Yaml => yaml_header(item),
        FrontMatterStyle::InlineHeading => inline_header(item),
    }
}

fn yaml_header(item: &ContentItem) -> String {
    let mut lines = vec!["---".to_string()];
    lines.push(format!("title: {}", yaml_quote(&item.title)));
    if let Some(date) = &item.date {
        lines.push(format!("date: {date}"));
    }
    if !item.categories.is_empty() {
        lines.push(format!("categories: [{}]", yaml_flow(&item.categories)));
    }
    if !item.tags.is_empty() {
        lines.push(format!("tags: [{}]", yaml_flow(&item.tags)));
    }
    lines.push("---".to_string());
    lines.join("\n")
}

fn inline_header(item: &ContentItem) -> String {
    match &item.date {
        Some(date) => format!("# {}\n\n*Published: {date}*", item.title),
        None => format!("# {}", item.title),
    }
}

/// Double-quoted YAML scalar; keeps arbitrary titles valid YAML without
/// altering their text.
fn yaml_quote(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}

fn yaml_flow(values: &[String]) -> String {
    values
        .iter()
        .map(|v| yaml_quote(v))
        .collect::<Vec<_>>()
        .join(", ")
}
