//! Configuration for snboot
//!
//! Read from `snboot.toml` in the working directory, or from `--config`.
//! Every section is optional; a missing default file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::editor::EditorKind;
use crate::error::{BootstrapError, BootstrapResult};
use crate::manifest::{self, MutationRule, MANIFEST_FILE};
use crate::scaffold::TEMPLATE_NAMES;

pub const CONFIG_FILE: &str = "snboot.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub patch: PatchSection,
    #[serde(default)]
    pub install: InstallSection,
    #[serde(default)]
    pub scaffold: ScaffoldSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchSection {
    /// Manifest to patch, relative to the working directory
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
    /// JSON editing backend
    #[serde(default)]
    pub editor: EditorKind,
    /// Extra rules applied after the fixed ones
    #[serde(default)]
    pub rules: Vec<MutationRule>,
}

fn default_manifest() -> PathBuf {
    PathBuf::from(MANIFEST_FILE)
}

impl Default for PatchSection {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            editor: EditorKind::default(),
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallSection {
    #[serde(default = "default_install_program")]
    pub program: String,
    #[serde(default = "default_install_args")]
    pub args: Vec<String>,
}

fn default_install_program() -> String {
    "npm".to_string()
}
fn default_install_args() -> Vec<String> {
    vec!["install".to_string()]
}

impl Default for InstallSection {
    fn default() -> Self {
        Self {
            program: default_install_program(),
            args: default_install_args(),
        }
    }
}

impl InstallSection {
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }

    pub fn command_line(&self) -> String {
        crate::exec::display_command(&self.program, &self.arg_refs())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldSection {
    /// Template files written into a new project
    #[serde(default = "default_scaffold_files")]
    pub files: Vec<String>,
}

fn default_scaffold_files() -> Vec<String> {
    TEMPLATE_NAMES.iter().map(|name| name.to_string()).collect()
}

impl Default for ScaffoldSection {
    fn default() -> Self {
        Self {
            files: default_scaffold_files(),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// With an explicit path the file must exist. Without one, `snboot.toml`
    /// in `dir` is used if present, defaults otherwise.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> BootstrapResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = dir.join(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> BootstrapResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| BootstrapError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| BootstrapError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if let Some(rule) = config.patch.rules.iter().find(|r| manifest::overrides_default(r)) {
            return Err(BootstrapError::Config {
                path: path.to_path_buf(),
                reason: format!(
                    "rule for {}[\"{}\"] would replace a fixed entry",
                    rule.section, rule.key
                ),
            });
        }
        Ok(config)
    }
}
