//! The transfer-spec document sent to the daemon.
//!
//! Field names and nesting are a compatibility contract: the daemon
//! parses this shape byte-for-byte as specified by the COS/Aspera SDK.
//! Construction and normalization live in `coslift-uploader`; this module
//! only defines the serializable shape.

use serde::{Deserialize, Serialize};

/// Top-level transfer-spec document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSpec {
    pub session_initiation: SessionInitiation,
    pub file_system: FileSystem,
    pub direction: String,
    pub remote_host: String,
    pub title: String,
    pub assets: Assets,
}

/// Credential block. Only the COS flavour is supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInitiation {
    pub icos: IcosCredentials,
}

/// IBM COS credentials and endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcosCredentials {
    pub api_key: String,
    pub bucket: String,
    pub ibm_service_instance_id: String,
    pub ibm_service_endpoint: String,
}

/// Filesystem behavior flags on the remote side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSystem {
    pub create_dir: bool,
}

/// The files to move and where they land.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assets {
    pub destination_root: String,
    pub paths: Vec<AssetPath>,
}

/// One source file. When `destination` is omitted the daemon preserves
/// the original filename under `destination_root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPath {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> TransferSpec {
        TransferSpec {
            session_initiation: SessionInitiation {
                icos: IcosCredentials {
                    api_key: "key".into(),
                    bucket: "videos".into(),
                    ibm_service_instance_id: "iid".into(),
                    ibm_service_endpoint: "https://s3.example.com".into(),
                },
            },
            file_system: FileSystem { create_dir: true },
            direction: "send".into(),
            remote_host: "ats-sl-fra.aspera.io".into(),
            title: "video file upload".into(),
            assets: Assets {
                destination_root: "/aspera-uploads/".into(),
                paths: vec![AssetPath {
                    source: "/videos/a.mp4".into(),
                    destination: None,
                }],
            },
        }
    }

    #[test]
    fn document_shape_matches_daemon_contract() {
        let value = serde_json::to_value(sample_spec()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "session_initiation": {
                    "icos": {
                        "api_key": "key",
                        "bucket": "videos",
                        "ibm_service_instance_id": "iid",
                        "ibm_service_endpoint": "https://s3.example.com",
                    }
                },
                "file_system": { "create_dir": true },
                "direction": "send",
                "remote_host": "ats-sl-fra.aspera.io",
                "title": "video file upload",
                "assets": {
                    "destination_root": "/aspera-uploads/",
                    "paths": [ { "source": "/videos/a.mp4" } ],
                },
            })
        );
    }

    #[test]
    fn path_destination_included_when_set() {
        let path = AssetPath {
            source: "/videos/a.mp4".into(),
            destination: Some("renamed.mp4".into()),
        };
        let value = serde_json::to_value(&path).unwrap();
        assert_eq!(value["destination"], "renamed.mp4");
    }

    #[test]
    fn json_roundtrip() {
        let spec = sample_spec();
        let json = serde_json::to_string(&spec).unwrap();
        let parsed: TransferSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, parsed);
    }
}
