//! End-to-end patch runs against real files with a fake process runner

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use snboot::config::InstallSection;
use snboot::editor::{BuiltinEditor, JqEditor};
use snboot::exec::{CommandOutput, CommandRunner};
use snboot::manifest::{self, MutationRule};
use snboot::output;
use snboot::patch::InstallOutcome;
use snboot::{BootstrapError, PatchOptions, Patcher};
use tempfile::TempDir;

const LITERAL_INPUT: &str =
    r#"{"devDependencies": {"@servicenow/glide": "26.0.1", "typescript": "5.5.4"}}"#;

struct FakeRunner {
    installed: Vec<&'static str>,
    install_status: Option<i32>,
    streamed: RefCell<Vec<(String, Vec<String>, PathBuf)>>,
}

impl FakeRunner {
    fn new(installed: &[&'static str]) -> Self {
        Self {
            installed: installed.to_vec(),
            install_status: Some(0),
            streamed: RefCell::new(Vec::new()),
        }
    }

    fn failing_install(code: i32) -> Self {
        Self {
            install_status: Some(code),
            ..Self::new(&["npm"])
        }
    }
}

impl CommandRunner for FakeRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.installed
            .iter()
            .any(|p| *p == program)
            .then(|| PathBuf::from(program))
    }

    fn run(&self, program: &str, _: &[&str], _: &Path) -> io::Result<CommandOutput> {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("unexpected run of {program}"),
        ))
    }

    fn stream(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<Option<i32>> {
        self.streamed.borrow_mut().push((
            program.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
            cwd.to_path_buf(),
        ));
        Ok(self.install_status)
    }
}

fn project_with(contents: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("package.json");
    fs::write(&path, contents).unwrap();
    (tmp, path)
}

fn patch(path: &Path, runner: &FakeRunner) -> Result<snboot::patch::PatchReport, BootstrapError> {
    let (mut reporter, _, _) = output::capture(false);
    Patcher::new(&BuiltinEditor, runner).run(&PatchOptions::new(path), &mut reporter)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_literal_scenario() {
    let (_tmp, path) = project_with(LITERAL_INPUT);
    let runner = FakeRunner::new(&[]);

    let report = patch(&path, &runner).unwrap();

    let patched = read_json(&path);
    assert_eq!(
        patched,
        json!({"devDependencies": {
            "@servicenow/glide": "git://github.com/sonisoft-cnanda/servicenow-glide",
            "typescript": "5.5.4",
            "sn-sdk-mock": "file:../sn-sdk-mock"
        }})
    );
    let order: Vec<&String> = patched["devDependencies"].as_object().unwrap().keys().collect();
    assert_eq!(order, ["@servicenow/glide", "typescript", "sn-sdk-mock"]);

    assert_eq!(fs::read_to_string(&report.backup).unwrap(), LITERAL_INPUT);
    assert_eq!(report.backup, manifest::backup_path(&path));
}

#[test]
fn test_second_run_is_byte_identical() {
    let (_tmp, path) = project_with(LITERAL_INPUT);
    let runner = FakeRunner::new(&[]);

    patch(&path, &runner).unwrap();
    let first = fs::read(&path).unwrap();
    patch(&path, &runner).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_backup_holds_pre_run_content() {
    let (_tmp, path) = project_with(LITERAL_INPUT);
    let runner = FakeRunner::new(&[]);

    patch(&path, &runner).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();
    let report = patch(&path, &runner).unwrap();

    // The backup is this run's pre-image, not the original from the first run.
    assert_eq!(fs::read_to_string(report.backup).unwrap(), after_first);
}

#[test]
fn test_unrelated_fields_survive() {
    let original = json!({
        "name": "x_acme_app",
        "version": "1.4.2",
        "private": true,
        "scripts": {"build": "tsc", "test": "jest --coverage"},
        "dependencies": {"lodash": "^4.17.21"},
        "devDependencies": {"typescript": "5.5.4"},
        "files": ["dist", "README.md"],
        "engines": {"node": ">=18"},
        "jest": {"preset": "ts-jest", "testTimeout": 10000}
    });
    let (_tmp, path) = project_with(&serde_json::to_string(&original).unwrap());
    let runner = FakeRunner::new(&[]);

    patch(&path, &runner).unwrap();

    let patched = read_json(&path);
    let before = original.as_object().unwrap();
    let after = patched.as_object().unwrap();
    assert_eq!(
        before.keys().collect::<Vec<_>>(),
        after.keys().collect::<Vec<_>>()
    );
    for (key, value) in before {
        if key != "devDependencies" {
            assert_eq!(&after[key], value, "field {key} changed");
        }
    }
    assert_eq!(patched["devDependencies"]["typescript"], "5.5.4");
}

#[test]
fn test_missing_dev_dependencies_section_is_added() {
    let (_tmp, path) = project_with(r#"{"name": "app"}"#);
    let runner = FakeRunner::new(&[]);

    patch(&path, &runner).unwrap();

    let patched = read_json(&path);
    assert_eq!(patched["name"], "app");
    assert_eq!(
        patched["devDependencies"]["@servicenow/glide"],
        manifest::GLIDE_LOCATOR
    );
}

#[test]
fn test_missing_manifest_creates_nothing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("package.json");
    let runner = FakeRunner::new(&[]);

    let err = patch(&path, &runner).unwrap_err();

    assert!(matches!(err, BootstrapError::ManifestNotFound { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(!path.exists());
    assert!(!manifest::backup_path(&path).exists());
}

#[test]
fn test_missing_editor_touches_nothing() {
    let (_tmp, path) = project_with(LITERAL_INPUT);
    let runner = FakeRunner::new(&["npm"]);
    let jq = JqEditor::new(&runner);
    let (mut reporter, _, _) = output::capture(false);

    let err = Patcher::new(&jq, &runner)
        .run(&PatchOptions::new(&path), &mut reporter)
        .unwrap_err();

    assert!(matches!(err, BootstrapError::MissingTool { ref tool } if tool == "jq"));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), LITERAL_INPUT);
    assert!(!manifest::backup_path(&path).exists());
}

#[test]
fn test_invalid_manifest_keeps_backup_and_original() {
    let (_tmp, path) = project_with(r#"{"devDependencies": "none"}"#);
    let runner = FakeRunner::new(&[]);

    let err = patch(&path, &runner).unwrap_err();

    assert!(matches!(err, BootstrapError::InvalidManifest { .. }));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"{"devDependencies": "none"}"#
    );
    assert_eq!(
        fs::read_to_string(manifest::backup_path(&path)).unwrap(),
        r#"{"devDependencies": "none"}"#
    );
}

#[test]
fn test_install_runs_in_manifest_directory() {
    let (tmp, path) = project_with(LITERAL_INPUT);
    let runner = FakeRunner::new(&["npm"]);
    let (mut reporter, _, _) = output::capture(false);

    let options = PatchOptions::new(&path).with_install(InstallSection::default(), true);
    let report = Patcher::new(&BuiltinEditor, &runner)
        .run(&options, &mut reporter)
        .unwrap();

    assert_eq!(report.install, InstallOutcome::Succeeded);
    assert_eq!(report.exit_code(), 0);
    let streamed = runner.streamed.borrow();
    assert_eq!(streamed.len(), 1);
    assert_eq!(streamed[0].0, "npm");
    assert_eq!(streamed[0].1, ["install"]);
    assert_eq!(streamed[0].2, tmp.path());
}

#[test]
fn test_failed_install_does_not_revert() {
    let (_tmp, path) = project_with(LITERAL_INPUT);
    let runner = FakeRunner::failing_install(254);
    let (mut reporter, _, err) = output::capture(false);

    let options = PatchOptions::new(&path).with_install(InstallSection::default(), true);
    let report = Patcher::new(&BuiltinEditor, &runner)
        .run(&options, &mut reporter)
        .unwrap();

    assert_eq!(report.install, InstallOutcome::Failed { code: 254 });
    assert_eq!(report.exit_code(), 254);
    assert_eq!(
        read_json(&path)["devDependencies"]["sn-sdk-mock"],
        manifest::SDK_MOCK_LOCATOR
    );
    assert!(err.contents().contains("npm install"));
}

#[test]
fn test_extra_rules_apply_after_defaults() {
    let (_tmp, path) = project_with(LITERAL_INPUT);
    let runner = FakeRunner::new(&[]);
    let (mut reporter, _, _) = output::capture(false);

    let options = PatchOptions::new(&path).with_extra_rules(&[
        MutationRule::dev_dependency("jest", "29.7.0"),
        MutationRule::new("overrides", "glob", "10.4.5"),
    ]);
    let report = Patcher::new(&BuiltinEditor, &runner)
        .run(&options, &mut reporter)
        .unwrap();

    let order: Vec<&String> = report.dev_dependencies.keys().collect();
    assert_eq!(order, ["@servicenow/glide", "typescript", "sn-sdk-mock", "jest"]);
    assert_eq!(read_json(&path)["overrides"]["glob"], "10.4.5");
}

#[test]
fn test_extra_rule_cannot_replace_fixed_entry() {
    let (_tmp, path) = project_with(LITERAL_INPUT);
    let runner = FakeRunner::new(&[]);
    let (mut reporter, _, _) = output::capture(false);

    let options = PatchOptions::new(&path).with_extra_rules(&[
        MutationRule::dev_dependency(manifest::GLIDE_PACKAGE, "26.0.1"),
        MutationRule::dev_dependency(manifest::SDK_MOCK_PACKAGE, "1.0.0"),
    ]);
    assert_eq!(options.rules().len(), 2);
    Patcher::new(&BuiltinEditor, &runner)
        .run(&options, &mut reporter)
        .unwrap();

    let deps = &read_json(&path)["devDependencies"];
    assert_eq!(deps[manifest::GLIDE_PACKAGE], manifest::GLIDE_LOCATOR);
    assert_eq!(deps[manifest::SDK_MOCK_PACKAGE], manifest::SDK_MOCK_LOCATOR);
}

#[test]
fn test_untargeted_numbers_survive_exactly() {
    let input = r#"{
  "config": {
    "buildId": 123456789012345678901234,
    "ratio": 0.30000000000000000001
  },
  "devDependencies": {}
}"#;
    let (_tmp, path) = project_with(input);
    let runner = FakeRunner::new(&[]);

    patch(&path, &runner).unwrap();

    let patched = fs::read_to_string(&path).unwrap();
    assert!(patched.contains("\"buildId\": 123456789012345678901234"), "{patched}");
    assert!(patched.contains("\"ratio\": 0.30000000000000000001"), "{patched}");
}

#[test]
fn test_failed_backup_aborts_before_mutation() {
    let (_tmp, path) = project_with(LITERAL_INPUT);
    fs::create_dir(manifest::backup_path(&path)).unwrap();
    let runner = FakeRunner::new(&[]);

    let err = patch(&path, &runner).unwrap_err();

    assert!(matches!(err, BootstrapError::Io { action: "back up", .. }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), LITERAL_INPUT);
}
