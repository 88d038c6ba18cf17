use serde::{Deserialize, Serialize};

pub const TESTCASE_SCHEMA_V1: &str = "tail-case.v1";

/// Canned input for one play-through and the transcript it must produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub schema_version: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Rolls handed to `chance` before the seeded generator takes over.
    #[serde(default)]
    pub randoms: Vec<f64>,
    #[serde(default)]
    pub expected_output: String,
    #[serde(default)]
    pub expected_error_code: Option<String>,
}

#[cfg(test)]
mod case_tests {
    use super::*;

    #[test]
    fn testcase_deserialize_applies_defaults() {
        let parsed: TestCase = serde_json::from_str(
            r#"{
  "schemaVersion": "tail-case.v1",
  "expectedOutput": "Hello\n"
}"#,
        )
        .expect("testcase should deserialize");

        assert_eq!(parsed.schema_version, TESTCASE_SCHEMA_V1);
        assert!(parsed.inputs.is_empty());
        assert!(parsed.randoms.is_empty());
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.expected_output, "Hello\n");
        assert_eq!(parsed.expected_error_code, None);
    }

    #[test]
    fn testcase_deserialize_reads_all_fields() {
        let parsed: TestCase = serde_json::from_str(
            r#"{
  "schemaVersion": "tail-case.v1",
  "inputs": ["north", "take lamp"],
  "seed": 9,
  "randoms": [0.1, 0.9],
  "expectedOutput": "",
  "expectedErrorCode": "ENGINE_CHAPTER_NOT_FOUND"
}"#,
        )
        .expect("testcase should deserialize");

        assert_eq!(parsed.inputs, vec!["north", "take lamp"]);
        assert_eq!(parsed.seed, Some(9));
        assert_eq!(parsed.randoms, vec![0.1, 0.9]);
        assert_eq!(
            parsed.expected_error_code.as_deref(),
            Some("ENGINE_CHAPTER_NOT_FOUND")
        );
    }
}
