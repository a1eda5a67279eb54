//! Pure construction of the daemon transfer-spec document.
//!
//! No I/O and no RPC here. Malformed config is tolerated — an empty
//! endpoint passes through unchanged and is caught by the submission-time
//! validation, so a dry run can preview the document without credentials.

use coslift_discovery::SourceAsset;
use coslift_protocol::spec::{
    AssetPath, Assets, FileSystem, IcosCredentials, SessionInitiation, TransferSpec,
};

use crate::config::UploadConfig;

/// Title stamped on every transfer we start.
const TRANSFER_TITLE: &str = "video file upload";

/// Builds the transfer-spec document for a set of validated assets.
///
/// Normalization rules are behavioral contracts observed by the daemon:
/// the endpoint gains an `https://` scheme when it has none, and the
/// destination is slash-wrapped so the remote side treats it as a
/// folder-style key prefix. Both rules are idempotent.
pub fn build_transfer_spec(config: &UploadConfig, assets: &[SourceAsset]) -> TransferSpec {
    let paths = assets
        .iter()
        .map(|asset| AssetPath {
            source: asset.absolute_path.to_string_lossy().into_owned(),
            destination: asset.destination.clone(),
        })
        .collect();

    TransferSpec {
        session_initiation: SessionInitiation {
            icos: IcosCredentials {
                api_key: config.api_key.clone(),
                bucket: config.bucket.clone(),
                ibm_service_instance_id: config.service_instance_id.clone(),
                ibm_service_endpoint: normalize_endpoint(&config.service_endpoint),
            },
        },
        file_system: FileSystem {
            create_dir: config.create_dir,
        },
        direction: "send".into(),
        remote_host: config.remote_host.clone(),
        title: TRANSFER_TITLE.into(),
        assets: Assets {
            destination_root: normalize_destination(&config.destination),
            paths,
        },
    }
}

/// Ensures the endpoint carries a URL scheme, defaulting to `https://`.
///
/// An empty endpoint passes through unchanged; submission-time validation
/// rejects it before the daemon ever sees it.
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.is_empty()
        || endpoint.starts_with("http://")
        || endpoint.starts_with("https://")
    {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    }
}

/// Normalizes a destination to a slash-wrapped folder prefix.
///
/// Empty or `/`-only input becomes `/`.
pub fn normalize_destination(destination: &str) -> String {
    let trimmed = destination.trim();
    let mut result = String::new();
    if !trimmed.starts_with('/') {
        result.push('/');
    }
    result.push_str(trimmed);
    if !result.ends_with('/') {
        result.push('/');
    }
    result
}
