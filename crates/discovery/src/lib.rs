//! Local media file discovery for upload.
//!
//! Two passes, matching how the upload pipeline consumes them:
//!
//! 1. **Discover** — walk a directory (or accept a single file) and
//!    collect every regular file whose extension matches a configurable
//!    set. Completeness and no-duplicates are the contract; traversal
//!    order is not.
//! 2. **Validate** — resolve each candidate to an absolute path and keep
//!    only existing, regular, readable files, collecting a per-path
//!    rejection reason for the rest. A rejection never aborts the batch.

mod filter;
mod scan;
mod validate;

pub use filter::MediaFilter;
pub use scan::discover;
pub use validate::{RejectReason, Rejection, SourceAsset, validate};
