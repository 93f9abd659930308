use chrono::{NaiveDate, NaiveDateTime};

/// Derive the output filename for one item: `YYYYMMDD-slug.md` when the
/// date prefix is enabled and a parseable date exists, else `slug.md`.
///
/// Stem precedence: sanitized slug, then sanitized title, then
/// `post-<position>` where `position` is the item's 1-based index in the
/// converted set. A missing date with the prefix enabled simply omits the
/// prefix.
pub fn derive_filename(
    slug: &str,
    title: &str,
    date: Option<&str>,
    date_prefix: bool,
    position: usize,
) -> String {
    let mut stem = sanitize_slug(slug);
    if stem.is_empty() {
        stem = sanitize_slug(title);
    }
    if stem.is_empty() {
        stem = format!("post-{position}");
    }
    if is_reserved_windows_name(&stem) {
        stem.push_str("-post");
    }

    let prefix = if date_prefix {
        date.and_then(date_stamp)
            .map(|stamp| format!("{stamp}-"))
            .unwrap_or_default()
    } else {
        String::new()
    };

    format!("{prefix}{stem}.md")
}

/// Lowercase ASCII alphanumerics with non-alphanumeric runs collapsed to a
/// single hyphen and the ends trimmed. Output always matches `[a-z0-9-]*`.
pub fn sanitize_slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// Export dates come as `YYYY-MM-DD HH:MM:SS`; some tools emit the date
/// part alone, so try that second.
fn date_stamp(raw: &str) -> Option<String> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.format("%Y%m%d").to_string());
    }
    let day = raw.split_whitespace().next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y%m%d").to_string())
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
        "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
    ];
    RESERVED.contains(&name)
}
