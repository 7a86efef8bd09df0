use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::JsonEditor;
use crate::error::{BootstrapError, BootstrapResult};
use crate::exec::{parent_dir, CommandOutput, CommandRunner};
use crate::manifest::{self, MutationRule};

const JQ: &str = "jq";

const SET_FILTER: &str = ".[$section][$key] = $value";
const READ_FILTER: &str = ".[$section] // {}";

/// Editor that runs `jq` and writes its output back over the manifest.
pub struct JqEditor<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> JqEditor<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn jq(&self, manifest: &Path, args: &[&str]) -> BootstrapResult<CommandOutput> {
        let file = manifest
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| BootstrapError::invalid_manifest(manifest, "path has no file name"))?;
        let mut full: Vec<&str> = args.to_vec();
        full.push(file);

        let output = self
            .runner
            .run(JQ, &full, parent_dir(manifest))
            .map_err(BootstrapError::io("run jq on", manifest))?;
        if !output.success() {
            return Err(BootstrapError::invalid_manifest(
                manifest,
                format!("jq failed: {}", output.stderr.trim()),
            ));
        }
        Ok(output)
    }
}

impl JsonEditor for JqEditor<'_> {
    fn name(&self) -> &'static str {
        JQ
    }

    fn tool(&self) -> Option<&'static str> {
        Some(JQ)
    }

    fn is_available(&self) -> bool {
        self.runner.is_available(JQ)
    }

    fn apply(&self, manifest: &Path, rule: &MutationRule) -> BootstrapResult<()> {
        if !manifest.exists() {
            return Err(BootstrapError::ManifestNotFound {
                path: manifest.to_path_buf(),
            });
        }
        let output = self.jq(
            manifest,
            &[
                "--arg",
                "section",
                rule.section.as_str(),
                "--arg",
                "key",
                rule.key.as_str(),
                "--arg",
                "value",
                rule.value.as_str(),
                SET_FILTER,
            ],
        )?;
        // jq never edits in place; its stdout is the new document.
        fs::write(manifest, output.stdout).map_err(BootstrapError::io("write", manifest))
    }

    fn section(&self, manifest: &Path, section: &str) -> BootstrapResult<Map<String, Value>> {
        let output = self.jq(manifest, &["--arg", "section", section, READ_FILTER])?;
        manifest::parse_section(manifest, &output.stdout)
    }
}
