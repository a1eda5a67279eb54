//! Second-pass validation of discovered candidates.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::warn;

/// A validated source file, ready for spec building.
///
/// Immutable after creation; scoped to one upload run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAsset {
    /// Absolute path on the local filesystem.
    pub absolute_path: PathBuf,
    /// Size in bytes, best-effort. Absence does not block upload.
    pub size_bytes: Option<u64>,
    /// Remote name override. When unset the remote side preserves the
    /// original filename.
    pub destination: Option<String>,
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotFound,
    NotAFile,
    NotReadable,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "source not found"),
            Self::NotAFile => write!(f, "not a file"),
            Self::NotReadable => write!(f, "not readable"),
        }
    }
}

/// A rejected candidate with the reason, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub path: PathBuf,
    pub reason: RejectReason,
}

/// Resolves candidates to absolute form and drops any that do not exist,
/// are not regular files, or cannot be opened for reading.
///
/// Rejections are logged and returned alongside the surviving set; the
/// caller decides whether an empty surviving set is fatal.
pub fn validate(paths: &[PathBuf]) -> (Vec<SourceAsset>, Vec<Rejection>) {
    let mut assets = Vec::with_capacity(paths.len());
    let mut rejections = Vec::new();

    for path in paths {
        match check(path) {
            Ok(asset) => assets.push(asset),
            Err(reason) => {
                warn!(path = %path.display(), %reason, "rejecting source");
                rejections.push(Rejection {
                    path: path.clone(),
                    reason,
                });
            }
        }
    }

    (assets, rejections)
}

fn check(path: &Path) -> Result<SourceAsset, RejectReason> {
    let resolved = std::fs::canonicalize(path).map_err(|_| RejectReason::NotFound)?;

    let metadata = std::fs::metadata(&resolved).map_err(|_| RejectReason::NotFound)?;
    if !metadata.is_file() {
        return Err(RejectReason::NotAFile);
    }

    // Opening is the portable readability check.
    if File::open(&resolved).is_err() {
        return Err(RejectReason::NotReadable);
    }

    Ok(SourceAsset {
        absolute_path: resolved,
        size_bytes: Some(metadata.len()),
        destination: None,
    })
}
