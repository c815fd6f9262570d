use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn storykeep(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_storykeep"))
        .arg("--no-color")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run storykeep")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn fixture_suite_passes() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
    let output = storykeep(&["test", fixtures.to_str().unwrap()]);
    let report = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{}", report);
    assert!(report.contains("test result: ok. 10 passed, 0 failed"), "{}", report);
}

#[test]
fn action_prints_href_and_events() {
    let output = storykeep(&["action", "(goto (storyFragment about))", "--events", "pane-1"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "/about\n{\"events\":[{\"id\":\"pane-1\",\"type\":\"StoryFragment\",\"verb\":\"CLICKED\",\"targetSlug\":\"about\"}]}\n"
    );
}

#[test]
fn action_misfire_prints_empty_href() {
    let output = storykeep(&["action", "(goto (nowhere))"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\n");
}

#[test]
fn config_changes_home_slug() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("storykeep.toml");
    std::fs::write(&config, "[site]\nhome_slug = \"start\"\n").unwrap();

    let output = storykeep(&[
        "--config",
        config.to_str().unwrap(),
        "action",
        "(goto (home))",
        "--events",
        "p",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("\"targetSlug\":\"start\""));
}

#[test]
fn bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("storykeep.toml");
    std::fs::write(&config, "[history]\nmax_length = 0\n").unwrap();

    let output = storykeep(&["--config", config.to_str().unwrap(), "action", "(goto (home))"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("history.max_length must be at least 2"));
}

#[test]
fn edit_script_replays_steps() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("edits.toml");
    std::fs::write(
        &script,
        r#"
[[field]]
id = "pane-1"
field = "slug"
value = "about"

[[step]]
id = "pane-1"
field = "slug"
at = 1000
value = "About"

[[step]]
id = "pane-1"
field = "slug"
at = 2000
value = "about-us"

[[step]]
id = "pane-1"
field = "slug"
undo = true
"#,
    )
    .unwrap();

    let output = storykeep(&["edit", script.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["steps"][0]["outcome"]["outcome"], "rejected");
    assert_eq!(report["steps"][1]["outcome"]["valid"], true);
    assert_eq!(report["steps"][2]["restored"], "about");
    assert_eq!(report["fields"][0]["current"], "about");
    assert_eq!(report["fields"][0]["unsaved"], false);
}
