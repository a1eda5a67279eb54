//! Upload error taxonomy.

use std::path::PathBuf;

/// Errors produced by the upload pipeline.
///
/// Every variant is fatal to the run except where the caller says
/// otherwise; none are retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no media files found under {}", .0.display())]
    DiscoveryEmpty(PathBuf),

    #[error("no valid, readable source files to upload")]
    NoValidSources,

    #[error("missing required configuration: {}", .0.join(", "))]
    Configuration(Vec<String>),

    #[error("could not connect to transfer daemon: {0}")]
    Connection(String),

    #[error("transfer submission rejected: {0}")]
    Submission(String),

    #[error("transfer monitoring failed: {0}")]
    Monitoring(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Substring the daemon emits when the destination prefix is not treated
/// as a folder.
const BAD_DESTINATION_MARKER: &str = "Destination path is not a directory";

/// Returns an actionable hint when a daemon error message indicates a
/// malformed destination prefix.
pub fn destination_hint(message: &str) -> Option<&'static str> {
    if message.contains(BAD_DESTINATION_MARKER) {
        Some(
            "set COS_DESTINATION to a directory prefix (e.g. '/', '/Upload/' or '/my-prefix/'); \
             the destination must end with a trailing slash to be treated as a folder",
        )
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_lists_every_missing_field() {
        let err = UploadError::Configuration(vec![
            "IBMCLOUD_API_KEY".into(),
            "IBMCLOUD_BUCKET".into(),
        ]);
        let text = err.to_string();
        assert!(text.contains("IBMCLOUD_API_KEY"));
        assert!(text.contains("IBMCLOUD_BUCKET"));
    }

    #[test]
    fn hint_on_bad_destination_message() {
        let msg = "code 5: Destination path is not a directory: /uploads";
        assert!(destination_hint(msg).is_some());
    }

    #[test]
    fn no_hint_on_unrelated_message() {
        assert!(destination_hint("authentication failed").is_none());
    }
}
