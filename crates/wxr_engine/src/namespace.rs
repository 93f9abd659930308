use roxmltree::Document;

use crate::types::ConvertError;

/// RSS `content` module namespace carrying the encoded post body.
pub const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";

// WXR namespace URIs by export version, newest first. The three versions
// share one element vocabulary, so resolving the URI is all that differs.
const KNOWN_WXR_NAMESPACES: [&str; 3] = [
    "http://wordpress.org/export/1.2/",
    "http://wordpress.org/export/1.1/",
    "http://wordpress.org/export/1.0/",
];

/// Resolved WXR vocabulary for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WxrNamespace {
    /// The `wp:` namespace URI in effect.
    pub wp: &'static str,
}

/// Determine which WXR namespace a document uses.
///
/// Declarations on the root element cover well-formed exports; some tools
/// re-declare namespaces further down, so element names anywhere in the
/// tree are scanned as a fallback. A document with no recognizable
/// WordPress namespace is fatal for the whole run.
pub fn resolve_namespace(doc: &Document) -> Result<WxrNamespace, ConvertError> {
    for ns in doc.root_element().namespaces() {
        if let Some(wp) = match_known(ns.uri()) {
            return Ok(WxrNamespace { wp });
        }
    }

    for node in doc.descendants().filter(|n| n.is_element()) {
        if let Some(wp) = node.tag_name().namespace().and_then(match_known) {
            return Ok(WxrNamespace { wp });
        }
    }

    Err(ConvertError::UnsupportedExportFormat)
}

fn match_known(uri: &str) -> Option<&'static str> {
    KNOWN_WXR_NAMESPACES.iter().copied().find(|known| *known == uri)
}
