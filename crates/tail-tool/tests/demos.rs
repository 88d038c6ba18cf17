use std::path::PathBuf;

use tail_tool::{assert_case, discover_cases};

fn demos_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
}

#[test]
fn every_demo_case_passes() {
    let pairs = discover_cases(&demos_root()).expect("demos should be discovered");
    assert!(pairs.len() >= 5, "expected all demo scripts, got {}", pairs.len());

    for pair in pairs {
        if let Err(error) = assert_case(&pair.script_path, &pair.case_path) {
            panic!("demo {} failed: {}", pair.script_path.display(), error);
        }
    }
}
