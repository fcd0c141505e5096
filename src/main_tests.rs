// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `main.rs` - desired-state file loading

#[cfg(test)]
mod tests {
    use super::super::read_state;
    use serde_json::json;
    use std::io::Write;

    fn state_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_state_json() {
        let file = state_file(".json", r#"{"domain": "in.example.com", "name": null}"#);
        let state = read_state(file.path()).unwrap();
        assert_eq!(
            serde_json::Value::Object(state),
            json!({"domain": "in.example.com", "name": null})
        );
    }

    #[test]
    fn test_read_state_yaml() {
        let file = state_file(
            ".yaml",
            "name: deliveries\ntarget: https://hooks.example.com\nevents:\n  - delivery\n  - bounce\n",
        );
        let state = read_state(file.path()).unwrap();
        assert_eq!(state.get("name"), Some(&json!("deliveries")));
        assert_eq!(state.get("events"), Some(&json!(["delivery", "bounce"])));
    }

    /// Anything other than `.json` is parsed as YAML, which also accepts JSON
    #[test]
    fn test_read_state_unknown_extension_falls_back_to_yaml() {
        let file = state_file(".state", r#"{"domain": "in.example.com"}"#);
        let state = read_state(file.path()).unwrap();
        assert_eq!(state.get("domain"), Some(&json!("in.example.com")));
    }

    #[test]
    fn test_read_state_null_is_empty_mapping() {
        let file = state_file(".json", "null");
        assert!(read_state(file.path()).unwrap().is_empty());

        let yaml_null = state_file(".yaml", "~\n");
        assert!(read_state(yaml_null.path()).unwrap().is_empty());
    }

    #[test]
    fn test_read_state_rejects_non_mapping() {
        let file = state_file(".json", r#"["domain"]"#);
        let err = read_state(file.path()).unwrap_err();
        assert!(err.to_string().contains("must contain a mapping"));
    }

    #[test]
    fn test_read_state_reports_parse_errors_with_path() {
        let file = state_file(".json", "{not json");
        let err = read_state(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON state file"));
    }

    #[test]
    fn test_read_state_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_state(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read state file"));
    }
}
