//! Dependency patcher
//!
//! Points a project's `package.json` at the forked glide typings and the
//! local SDK mock. A run is:
//!
//! 1. **Preflight**: the editor backend must be available and the manifest
//!    must exist. Nothing is written if either check fails.
//! 2. **Backup**: the manifest is copied to `package.json.backup`.
//! 3. **Mutate**: each rule is applied and persisted in turn.
//! 4. **Confirm**: the resulting `devDependencies` are printed.
//! 5. **Install** (optional): the install command runs in the manifest's
//!    directory. Its failure is reported, never rolled back.
//!
//! Running again on a patched manifest changes nothing.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::InstallSection;
use crate::editor::JsonEditor;
use crate::error::{BootstrapError, BootstrapResult};
use crate::exec::{parent_dir, CommandRunner};
use crate::manifest::{self, MutationRule, DEV_DEPENDENCIES};
use crate::output::Reporter;

#[derive(Debug, Clone)]
pub struct PatchOptions {
    pub manifest: PathBuf,
    rules: Vec<MutationRule>,
    pub install: InstallSection,
    /// Run the install command after patching; otherwise print a reminder.
    pub run_install: bool,
}

impl PatchOptions {
    /// Patch `manifest` with the fixed rules and no install step.
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            rules: manifest::default_rules(),
            install: InstallSection::default(),
            run_install: false,
        }
    }

    /// Add rules applied after the fixed ones. Rules aimed at a fixed field are ignored.
    pub fn with_extra_rules(mut self, extra: &[MutationRule]) -> Self {
        self.rules = manifest::rules_with(extra);
        self
    }

    pub fn rules(&self) -> &[MutationRule] {
        &self.rules
    }

    pub fn with_install(mut self, install: InstallSection, run: bool) -> Self {
        self.install = install;
        self.run_install = run;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Skipped,
    Succeeded,
    Failed { code: i32 },
}

#[derive(Debug, Clone)]
pub struct PatchReport {
    pub backup: PathBuf,
    pub dev_dependencies: Map<String, Value>,
    pub install: InstallOutcome,
}

impl PatchReport {
    /// Process exit code for the run: the install command's status if it failed.
    pub fn exit_code(&self) -> i32 {
        match self.install {
            InstallOutcome::Failed { code } => code,
            _ => 0,
        }
    }
}

pub struct Patcher<'a> {
    editor: &'a dyn JsonEditor,
    runner: &'a dyn CommandRunner,
}

impl<'a> Patcher<'a> {
    pub fn new(editor: &'a dyn JsonEditor, runner: &'a dyn CommandRunner) -> Self {
        Self { editor, runner }
    }

    /// Checks that must pass before any file is touched.
    pub fn preflight(&self, manifest: &Path) -> BootstrapResult<()> {
        if !self.editor.is_available() {
            return Err(BootstrapError::MissingTool {
                tool: self.editor.tool().unwrap_or(self.editor.name()).to_string(),
            });
        }
        if !manifest.is_file() {
            return Err(BootstrapError::ManifestNotFound {
                path: manifest.to_path_buf(),
            });
        }
        Ok(())
    }

    pub fn run(
        &self,
        options: &PatchOptions,
        reporter: &mut Reporter,
    ) -> BootstrapResult<PatchReport> {
        let manifest = options.manifest.as_path();
        self.preflight(manifest)?;

        let backup = manifest::backup(manifest)?;
        reporter.success(&format!(
            "Backed up {} to {}",
            manifest.display(),
            backup.display()
        ));

        for rule in &options.rules {
            reporter.debug(&format!("{} ({} editor)", rule, self.editor.name()));
            self.editor.apply(manifest, rule)?;
            reporter.success(&format!("Set {}[\"{}\"]", rule.section, rule.key));
        }

        let dev_dependencies = self.editor.section(manifest, DEV_DEPENDENCIES)?;
        display_dependencies(reporter, &dev_dependencies);

        let install = if options.run_install {
            self.install(&options.install, parent_dir(manifest), reporter)
        } else {
            reporter.info(&format!(
                "Run '{}' to install the updated dependencies",
                options.install.command_line()
            ));
            InstallOutcome::Skipped
        };

        Ok(PatchReport {
            backup,
            dev_dependencies,
            install,
        })
    }

    fn install(
        &self,
        install: &InstallSection,
        dir: &Path,
        reporter: &mut Reporter,
    ) -> InstallOutcome {
        let command = install.command_line();
        reporter.info(&format!("Running '{}' in {}", command, dir.display()));

        let code = match self.runner.stream(&install.program, &install.arg_refs(), dir) {
            Ok(Some(0)) => {
                reporter.success("Dependencies installed");
                return InstallOutcome::Succeeded;
            }
            Ok(Some(code)) => code,
            Ok(None) => {
                reporter.warning(&format!("'{command}' was terminated by a signal"));
                1
            }
            Err(e) => {
                reporter.warning(&format!("Could not run '{command}': {e}"));
                1
            }
        };

        let failure = BootstrapError::InstallFailure { command, code };
        reporter.warning(&format!("{failure}; package.json stays patched"));
        InstallOutcome::Failed { code }
    }
}

fn display_dependencies(reporter: &mut Reporter, deps: &Map<String, Value>) {
    reporter.heading(&format!("{DEV_DEPENDENCIES}:"));
    let rendered = serde_json::to_string_pretty(deps).unwrap_or_else(|_| "{}".to_string());
    reporter.raw(&rendered);
}
