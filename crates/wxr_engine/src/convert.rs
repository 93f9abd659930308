use once_cell::sync::Lazy;
use regex::Regex;

use crate::markdown::render_markdown;

/// HTML-body-to-Markdown seam. Implementations must never fail; a
/// non-empty body always produces some text output.
pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

static IFRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe[^>]*>.*?</iframe>|<iframe[^>]*/>").unwrap());
static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());

/// Converts HTML to Markdown while passing embed markup through untouched.
///
/// Embeds (`<iframe>` elements and the `<script>` tags that typically ride
/// along with them) are masked with placeholder tokens before the DOM walk
/// and restored byte-for-byte afterwards, so video players and interactive
/// charts survive the conversion verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbedPreservingConverter;

impl Converter for EmbedPreservingConverter {
    fn to_markdown(&self, html: &str) -> String {
        if html.trim().is_empty() {
            return String::new();
        }
        let (masked, embeds) = mask_embeds(html);
        let rendered = render_markdown(&masked);
        let restored = restore_embeds(rendered, &embeds);
        normalize_whitespace(&restored)
    }
}

fn placeholder(index: usize) -> String {
    format!("___WXR_EMBED_{index}___")
}

/// Replace each verbatim region with a unique placeholder token and
/// remember the original markup. Iframes first, then scripts, matching
/// the order embeds appear in exported posts.
fn mask_embeds(html: &str) -> (String, Vec<String>) {
    let mut embeds: Vec<String> = Vec::new();

    let masked = IFRAME_RE
        .replace_all(html, |caps: &regex::Captures<'_>| {
            embeds.push(caps[0].to_string());
            placeholder(embeds.len() - 1)
        })
        .into_owned();

    let masked = SCRIPT_RE
        .replace_all(&masked, |caps: &regex::Captures<'_>| {
            embeds.push(caps[0].to_string());
            placeholder(embeds.len() - 1)
        })
        .into_owned();

    (masked, embeds)
}

fn restore_embeds(mut text: String, embeds: &[String]) -> String {
    for (index, markup) in embeds.iter().enumerate() {
        text = text.replace(&placeholder(index), &format!("\n\n{markup}\n\n"));
    }
    text
}

/// Trim trailing whitespace per line, collapse runs of blank lines down to
/// one, and strip leading/trailing blank space from the whole body.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{
        mask_embeds, normalize_whitespace, restore_embeds, Converter, EmbedPreservingConverter,
    };

    #[test]
    fn masking_round_trips_iframe_markup() {
        let html = r#"before <iframe src="https://example.com/embed" width="640"></iframe> after"#;
        let (masked, embeds) = mask_embeds(html);
        assert!(!masked.contains("<iframe"));
        assert_eq!(embeds.len(), 1);
        let restored = restore_embeds(masked, &embeds);
        assert!(restored.contains(r#"<iframe src="https://example.com/embed" width="640"></iframe>"#));
    }

    #[test]
    fn scripts_are_masked_too() {
        let html = r#"<script async src="https://cdn.example.com/e.js"></script>"#;
        let (masked, embeds) = mask_embeds(html);
        assert!(!masked.contains("<script"));
        assert_eq!(embeds, vec![html.to_string()]);
    }

    #[test]
    fn normalize_collapses_blank_runs_and_trailing_space() {
        let text = "a  \n\n\n\n\nb\t\n";
        assert_eq!(normalize_whitespace(text), "a\n\nb");
    }

    #[test]
    fn empty_body_yields_empty_string() {
        assert_eq!(EmbedPreservingConverter.to_markdown("   \n "), "");
        assert_eq!(EmbedPreservingConverter.to_markdown(""), "");
    }
}
