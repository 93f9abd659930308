//! WXR conversion engine: parse a WordPress export, filter its items, and
//! turn each one into a Markdown file.
mod convert;
mod decode;
mod extract;
mod filename;
mod frontmatter;
mod markdown;
mod namespace;
mod persist;
mod pipeline;
mod types;

pub use convert::{Converter, EmbedPreservingConverter};
pub use decode::{decode_export, DecodeError, DecodedExport};
pub use extract::{extract_items, MalformedItem};
pub use filename::{derive_filename, sanitize_slug};
pub use frontmatter::build_front_matter;
pub use namespace::{resolve_namespace, WxrNamespace, CONTENT_NS};
pub use persist::{ensure_output_dir, write_output_files, PersistError};
pub use pipeline::{convert_bytes, convert_document, convert_with};
pub use types::{
    ContentItem, Conversion, ConversionConfig, ConversionWarning, ConvertError, FrontMatterStyle,
};
