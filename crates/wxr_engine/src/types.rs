use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Which front-matter header to prepend to each generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontMatterStyle {
    /// A `# Title` heading line followed by an optional publication line.
    #[default]
    InlineHeading,
    /// A `---`-delimited YAML block.
    Yaml,
}

/// Options for one conversion run. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Post types to include (membership test against `wp:post_type`).
    pub post_types: BTreeSet<String>,
    /// Post statuses to include (membership test against `wp:status`).
    pub post_statuses: BTreeSet<String>,
    /// Prepend `YYYYMMDD-` to filenames when the item has a parseable date.
    pub date_prefix: bool,
    /// Header format prepended to each converted body.
    pub front_matter: FrontMatterStyle,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            post_types: BTreeSet::from(["post".to_string()]),
            post_statuses: BTreeSet::from(["publish".to_string()]),
            date_prefix: true,
            front_matter: FrontMatterStyle::default(),
        }
    }
}

/// One exportable unit read from the document. Immutable after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub title: String,
    /// `wp:post_name`; may be empty, the filename deriver owns the fallback.
    pub slug: String,
    /// Publication date as `YYYY-MM-DD HH:MM:SS` where the export provides
    /// one. Drafts commonly have none.
    pub date: Option<String>,
    pub post_type: String,
    pub status: String,
    /// Literal `content:encoded` value; not HTML-parsed at extraction time.
    pub body: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Non-fatal conditions accumulated during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionWarning {
    /// An `<item>` whose required fields could not be read; the item was
    /// skipped. `index` is its zero-based position in document order.
    MalformedItem { index: usize, reason: String },
    /// Two items computed the same filename; the later one was renamed.
    FilenameCollision { requested: String, resolved: String },
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionWarning::MalformedItem { index, reason } => {
                write!(f, "item #{index} skipped: {reason}")
            }
            ConversionWarning::FilenameCollision {
                requested,
                resolved,
            } => {
                write!(f, "filename {requested} already taken, using {resolved}")
            }
        }
    }
}

/// Result of a conversion run: filename -> content, plus any warnings.
///
/// An empty `files` map with no warnings is a valid outcome for a document
/// with zero matching items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub files: BTreeMap<String, String>,
    pub warnings: Vec<ConversionWarning>,
}

/// Fatal conditions. These stop the run before any mapping is returned.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("document is not a recognizable WordPress export")]
    UnsupportedExportFormat,
    #[error("malformed xml: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error(transparent)]
    Decode(#[from] crate::decode::DecodeError),
}
