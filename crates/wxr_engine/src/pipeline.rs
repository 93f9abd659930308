use std::collections::BTreeMap;

use roxmltree::Document;

use crate::convert::{Converter, EmbedPreservingConverter};
use crate::decode::decode_export;
use crate::extract::extract_items;
use crate::filename::derive_filename;
use crate::frontmatter::build_front_matter;
use crate::namespace::resolve_namespace;
use crate::types::{Conversion, ConversionConfig, ConversionWarning, ConvertError};

/// Convert a WXR export document into per-item Markdown files.
///
/// Items are filtered on the configured type and status sets; every
/// surviving item produces exactly one entry in the result map. Non-fatal
/// conditions (malformed items, filename collisions) are reported as
/// warnings alongside the mapping. A document with zero matching items
/// yields an empty map, not an error.
pub fn convert_document(xml: &str, config: &ConversionConfig) -> Result<Conversion, ConvertError> {
    convert_with(xml, config, &EmbedPreservingConverter)
}

/// Decode raw export bytes (BOM, declared charset, detector fallback),
/// then convert.
pub fn convert_bytes(bytes: &[u8], config: &ConversionConfig) -> Result<Conversion, ConvertError> {
    let decoded = decode_export(bytes)?;
    convert_document(&decoded.xml, config)
}

/// [`convert_document`] with a caller-supplied body converter.
pub fn convert_with(
    xml: &str,
    config: &ConversionConfig,
    converter: &dyn Converter,
) -> Result<Conversion, ConvertError> {
    let doc = Document::parse(xml)?;
    let ns = resolve_namespace(&doc)?;

    let mut files: BTreeMap<String, String> = BTreeMap::new();
    let mut warnings = Vec::new();
    // Positional counter for items with no usable slug or title. Explicit
    // run state, so concurrent conversions stay independent.
    let mut position = 0usize;

    for extracted in extract_items(&doc, ns) {
        let item = match extracted {
            Ok(item) => item,
            Err(fault) => {
                log::warn!("skipping malformed item #{}: {}", fault.index, fault.reason);
                warnings.push(ConversionWarning::MalformedItem {
                    index: fault.index,
                    reason: fault.reason,
                });
                continue;
            }
        };
        if !config.post_types.contains(&item.post_type) {
            continue;
        }
        if !config.post_statuses.contains(&item.status) {
            continue;
        }
        position += 1;

        let body = converter.to_markdown(&item.body);
        let header = build_front_matter(&item, config.front_matter);
        let content = if body.is_empty() {
            format!("{header}\n")
        } else {
            format!("{header}\n\n{body}\n")
        };

        let requested = derive_filename(
            &item.slug,
            &item.title,
            item.date.as_deref(),
            config.date_prefix,
            position,
        );
        let filename = if files.contains_key(&requested) {
            let resolved = disambiguate(&files, &requested);
            log::warn!("filename {requested} already taken, using {resolved}");
            warnings.push(ConversionWarning::FilenameCollision {
                requested,
                resolved: resolved.clone(),
            });
            resolved
        } else {
            requested
        };
        files.insert(filename, content);
    }

    log::debug!(
        "converted {} item(s) with {} warning(s)",
        files.len(),
        warnings.len()
    );
    Ok(Conversion { files, warnings })
}

/// Append `-2`, `-3`, ... before the extension until the name is free.
fn disambiguate(files: &BTreeMap<String, String>, requested: &str) -> String {
    let stem = requested.strip_suffix(".md").unwrap_or(requested);
    let mut n = 2usize;
    loop {
        let candidate = format!("{stem}-{n}.md");
        if !files.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
