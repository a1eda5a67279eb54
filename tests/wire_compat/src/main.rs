fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and
    /// compares the JSON values. A mismatch means the Rust types no
    /// longer produce the byte shape the daemon expects.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  ours:    {reserialized}"
        );
    }

    #[test]
    fn fixture_transfer_spec() {
        roundtrip_test::<coslift_protocol::TransferSpec>("transfer_spec.json");
    }

    #[test]
    fn fixture_transfer_spec_with_destination_override() {
        roundtrip_test::<coslift_protocol::TransferSpec>("transfer_spec_override.json");
    }

    #[test]
    fn fixture_start_transfer_request() {
        roundtrip_test::<coslift_protocol::StartTransferRequest>("start_transfer_request.json");
    }

    #[test]
    fn fixture_registration_request() {
        roundtrip_test::<coslift_protocol::RegistrationRequest>("registration_request.json");
    }

    #[test]
    fn fixture_transfer_event() {
        roundtrip_test::<coslift_protocol::TransferEvent>("transfer_event.json");
    }

    /// The envelope's payload is a `RawValue`, which only deserializes
    /// from text, so this fixture goes through strings rather than
    /// `serde_json::Value`.
    #[test]
    fn fixture_message_envelope() {
        let path = fixtures_dir().join("message_envelope.json");
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        let parsed: coslift_protocol::Message = serde_json::from_str(&data).unwrap();
        let reserialized = serde_json::to_string(&parsed).unwrap();

        let fixture: serde_json::Value = serde_json::from_str(&data).unwrap();
        let ours: serde_json::Value = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(fixture, ours);
    }

    /// The embedded `transferSpec` string in a start request must itself
    /// parse as a transfer-spec document.
    #[test]
    fn start_request_embeds_a_valid_document() {
        let fixture = load_fixture("start_transfer_request.json");
        let request: coslift_protocol::StartTransferRequest =
            serde_json::from_value(fixture).unwrap();
        let spec: coslift_protocol::TransferSpec =
            serde_json::from_str(&request.transfer_spec).unwrap();
        assert_eq!(spec.direction, "send");
        assert!(spec.assets.destination_root.ends_with('/'));
    }
}
