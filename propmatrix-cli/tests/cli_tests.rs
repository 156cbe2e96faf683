//! End-to-end tests that run the `propmatrix` binary against a temporary
//! SDK and documentation tree.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const COMMON_DTS: &str = "declare class CommonMethod<T> {
  width(value: Length): T;
  opacity(value: number): T;
  onClick(event: (event: ClickEvent) => void): T;
}
";

const BUTTON_DTS: &str = "declare class ButtonAttribute extends CommonMethod<ButtonAttribute> {
  type(value: ButtonType): ButtonAttribute;
}
";

const TEXT_INPUT_DTS: &str = "declare class TextInputAttribute {
  opacity(value: number): TextInputAttribute;
}
";

const TEXT_INPUT_DOC: &str = "# TextInput

TextInput 不支持 width 属性。
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("should create temp dir");

        let ets = dir.path().join("sdk/component/ets");
        std::fs::create_dir_all(&ets).expect("should create sdk tree");
        std::fs::write(ets.join("common.d.ts"), COMMON_DTS).expect("should write common");
        std::fs::write(ets.join("button.d.ts"), BUTTON_DTS).expect("should write button");
        std::fs::write(ets.join("text_input.d.ts"), TEXT_INPUT_DTS)
            .expect("should write text input");

        let ui = dir.path().join("docs/zh-cn/application-dev/ui");
        std::fs::create_dir_all(&ui).expect("should create docs tree");
        std::fs::write(ui.join("arkts-basic-components-textinput.md"), TEXT_INPUT_DOC)
            .expect("should write doc");

        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn output(&self) -> PathBuf {
        self.path().join("data/matrix.json")
    }

    fn config(&self) -> PathBuf {
        self.path().join("propmatrix.toml")
    }

    /// Run the binary with paths supplied through `PROPMATRIX_*` variables.
    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_propmatrix"))
            .arg("--config")
            .arg(self.config())
            .args(args)
            .env("PROPMATRIX_SDK_PATH", self.path().join("sdk"))
            .env("PROPMATRIX_DOCS_PATH", self.path().join("docs"))
            .env("PROPMATRIX_OUTPUT_PATH", self.output())
            .env("PROPMATRIX_LOG_LEVEL", "warn")
            .env_remove("PROPMATRIX_LOG_FORMAT")
            .env_remove("PROPMATRIX_SCANNER_MINE_DOCS")
            .env_remove("PROPMATRIX_SCANNER_MAX_FILE_SIZE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .expect("should spawn propmatrix")
    }

    fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--output", "json"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
    }

    fn stored(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.output()).expect("result file should exist");
        serde_json::from_str(&content).expect("result file should be JSON")
    }
}

#[test]
fn test_scan_writes_result_file() {
    // Given: A fresh workspace without a result file
    let ws = Workspace::new();

    // When: Running a scan
    let report = ws.run_json(&["scan"]);

    // Then: The summary and the stored document agree
    assert_eq!(report["persisted"].as_bool(), Some(true));
    assert_eq!(report["prior_state"].as_str(), Some("absent"));
    assert_eq!(report["components"].as_u64(), Some(2));
    assert_eq!(report["properties"].as_u64(), Some(3));

    let stored = ws.stored();
    assert_eq!(
        stored["components"]["Button"]["properties"]["width"]["isSupported"].as_str(),
        Some("supported")
    );
    assert_eq!(
        stored["components"]["TextInput"]["properties"]["opacity"]["isSupported"].as_str(),
        Some("supported")
    );
    assert_eq!(
        stored["components"]["TextInput"]["properties"]["width"]["isSupported"].as_str(),
        Some("unknown")
    );
}

#[test]
fn test_scan_dry_run_does_not_write() {
    // Given: A fresh workspace
    let ws = Workspace::new();

    // When: Running a dry-run scan
    let report = ws.run_json(&["scan", "--dry-run"]);

    // Then: Nothing is persisted
    assert_eq!(report["persisted"].as_bool(), Some(false));
    assert!(!ws.output().exists(), "dry run must not create the result file");
}

#[test]
fn test_manual_override_survives_rescan() {
    // Given: A scanned workspace
    let ws = Workspace::new();
    ws.run_json(&["scan"]);

    // When: Recording a manual status and scanning again
    let set = ws.run_json(&[
        "matrix", "set", "TextInput", "width", "--status", "unsupported", "--owner", "alice",
    ]);
    ws.run_json(&["scan"]);

    // Then: The manual record is kept untouched
    assert_eq!(set["record"]["source"].as_str(), Some("manual"));

    let shown = ws.run_json(&["matrix", "show", "--component", "TextInput"]);
    let width = shown["properties"]
        .as_array()
        .expect("properties should be an array")
        .iter()
        .find(|row| row["property"] == "width")
        .expect("width row should exist");
    assert_eq!(width["isSupported"].as_str(), Some("unsupported"));
    assert_eq!(width["owner"].as_str(), Some("alice"));
    assert_eq!(width["source"].as_str(), Some("manual"));
}

#[test]
fn test_owner_update_counts_records() {
    // Given: A scanned workspace
    let ws = Workspace::new();
    ws.run_json(&["scan"]);

    // When: Assigning an owner to a component
    let report = ws.run_json(&["matrix", "owner", "Button", "bob"]);

    // Then: Every property of the component is updated
    assert_eq!(report["updated"].as_u64(), Some(3));
    assert_eq!(
        ws.stored()["components"]["Button"]["properties"]["onClick"]["owner"].as_str(),
        Some("bob")
    );
}

#[test]
fn test_matrix_set_rejects_bad_status() {
    // Given: A scanned workspace
    let ws = Workspace::new();
    ws.run_json(&["scan"]);

    // When: Passing an unknown status
    let output = ws.run(&["matrix", "set", "Button", "width", "--status", "maybe"]);

    // Then: The command fails with a general error
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid status"));
}

#[test]
fn test_matrix_show_unknown_component() {
    // Given: A scanned workspace
    let ws = Workspace::new();
    ws.run_json(&["scan"]);

    // When: Showing a component that does not exist
    let output = ws.run(&["matrix", "show", "--component", "Ghost"]);

    // Then: The store error exit code is returned
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_matrix_import_rejects_invalid_document() {
    // Given: A scanned workspace and a document without components
    let ws = Workspace::new();
    ws.run_json(&["scan"]);
    let before = ws.stored();
    let document = ws.path().join("import.json");
    std::fs::write(&document, r#"{"commonProperties": []}"#).expect("should write document");

    // When: Importing it
    let output = ws.run(&["matrix", "import", document.to_str().expect("utf-8 path")]);

    // Then: The import is rejected and the file is untouched
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(ws.stored(), before);
}

#[test]
fn test_held_lock_blocks_scan() {
    // Given: A lock file left by another writer
    let ws = Workspace::new();
    std::fs::create_dir_all(ws.path().join("data")).expect("should create data dir");
    std::fs::write(ws.path().join("data/matrix.json.lock"), "12345\n")
        .expect("should write lock file");

    // When: Running a scan
    let output = ws.run(&["scan"]);

    // Then: The scan fails with the store exit code and writes nothing
    assert_eq!(output.status.code(), Some(3));
    assert!(!ws.output().exists());
}

#[test]
fn test_evidence_lists_doc_claims() {
    // Given: A workspace whose docs say TextInput does not support width
    let ws = Workspace::new();

    // When: Listing evidence for the component (case-insensitive)
    let report = ws.run_json(&["evidence", "--component", "textinput"]);

    // Then: The claim is reported but the result file is not created
    assert_eq!(report["files_scanned"].as_u64(), Some(1));
    assert_eq!(report["components"][0]["component"].as_str(), Some("TextInput"));
    assert_eq!(report["components"][0]["properties"][0].as_str(), Some("width"));
    assert!(!ws.output().exists());
}

#[test]
fn test_config_validate_without_file() {
    // Given: No config file on disk
    let ws = Workspace::new();

    // When: Validating
    let report = ws.run_json(&["config", "validate"]);

    // Then: Defaults plus env overrides are valid
    assert_eq!(report["valid"].as_bool(), Some(true));
    assert_eq!(report["file_found"].as_bool(), Some(false));
}

#[test]
fn test_config_validate_invalid_file() {
    // Given: A config file with an invalid log format
    let ws = Workspace::new();
    std::fs::write(ws.config(), "[general]\nlog_format = \"xml\"\n").expect("should write config");

    // When: Validating
    let output = ws.run(&["--output", "json", "config", "validate"]);

    // Then: The config exit code is returned and the report lists the error
    assert_eq!(output.status.code(), Some(2));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("report should still be printed");
    assert_eq!(report["valid"].as_bool(), Some(false));
    assert!(
        report["errors"][0]
            .as_str()
            .is_some_and(|e| e.contains("general.log_format"))
    );
}

#[test]
fn test_config_show_paths_section() {
    // Given: No config file on disk
    let ws = Workspace::new();

    // When: Showing the paths section as text
    let output = ws.run(&["config", "show", "--section", "paths"]);

    // Then: The env override is visible
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[paths]"));
    assert!(stdout.contains("matrix.json"));
}
