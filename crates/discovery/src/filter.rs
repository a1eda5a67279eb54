//! Extension filter for media discovery.

use std::path::Path;

/// Case-insensitive file extension filter.
///
/// The default set covers the video containers we upload (`mp4`, `mov`).
/// Other media types can be supported by constructing a filter with a
/// different set; traversal logic never changes.
#[derive(Debug, Clone)]
pub struct MediaFilter {
    extensions: Vec<String>,
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self::new(["mp4", "mov"])
    }
}

impl MediaFilter {
    /// Creates a filter from a set of extensions, given without the
    /// leading dot. Matching is case-insensitive.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// True when the path's extension is in the configured set.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}
