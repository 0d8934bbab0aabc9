use std::fs;

use storybook_logging::{FileConfig, RotationStrategy, StorybookSubscriberBuilder};

// Only one test in this binary may install the global subscriber.
#[test]
fn test_jsonl_file_output() {
    let dir = tempfile::tempdir().unwrap();
    let file_config = FileConfig::new(dir.path()).with_rotation(RotationStrategy::Never);
    let path = file_config.single_file_path();

    let guard = StorybookSubscriberBuilder::new()
        .with_console(false)
        .with_level("info")
        .with_file_output(file_config)
        .try_init()
        .unwrap();
    assert!(guard.is_some());

    tracing::error!(phase = "chapter 0", "Phase changed");

    // A second install fails instead of panicking.
    assert!(StorybookSubscriberBuilder::new().try_init().is_err());

    drop(guard);

    let contents = fs::read_to_string(&path).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("Phase changed"))
        .expect("event written to file");
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(value["message"], "Phase changed");
    assert_eq!(value["phase"], "chapter 0");
    assert_eq!(value["level"], "ERROR");
}
