//! Manifest module - the project's `package.json`
//!
//! Loads the manifest into an ordered JSON tree, applies [`MutationRule`]s
//! and writes it back. Unknown fields and key order survive untouched.
//!
//! # Example
//!
//! ```no_run
//! use snboot::manifest::{self, Manifest, MutationRule};
//! use std::path::Path;
//!
//! let path = Path::new("package.json");
//! manifest::backup(path)?;
//!
//! let mut manifest = Manifest::load(path)?;
//! manifest.apply(&MutationRule::dev_dependency("left-pad", "1.3.0"))?;
//! manifest.save()?;
//! # Ok::<(), snboot::BootstrapError>(())
//! ```

mod internal;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BootstrapError, BootstrapResult};

/// Default manifest file name, looked up in the working directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Suffix appended to the manifest path for the pre-mutation copy.
pub const BACKUP_SUFFIX: &str = ".backup";

pub const DEV_DEPENDENCIES: &str = "devDependencies";

pub const GLIDE_PACKAGE: &str = "@servicenow/glide";
pub const GLIDE_LOCATOR: &str = "git://github.com/sonisoft-cnanda/servicenow-glide";

pub const SDK_MOCK_PACKAGE: &str = "sn-sdk-mock";
pub const SDK_MOCK_LOCATOR: &str = "file:../sn-sdk-mock";

/// Rules applied on every patch run, in order: (section, key, value).
pub const DEFAULT_RULES: &[(&str, &str, &str)] = &[
    (DEV_DEPENDENCIES, GLIDE_PACKAGE, GLIDE_LOCATOR),
    (DEV_DEPENDENCIES, SDK_MOCK_PACKAGE, SDK_MOCK_LOCATOR),
];

/// Set `section[key]` to a literal string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRule {
    #[serde(default = "default_section")]
    pub section: String,
    pub key: String,
    pub value: String,
}

fn default_section() -> String {
    DEV_DEPENDENCIES.to_string()
}

impl MutationRule {
    pub fn new(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn dev_dependency(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(DEV_DEPENDENCIES, key, value)
    }
}

impl fmt::Display for MutationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[\"{}\"] = \"{}\"", self.section, self.key, self.value)
    }
}

/// True if `rule` targets a field owned by one of the fixed rules.
pub fn overrides_default(rule: &MutationRule) -> bool {
    DEFAULT_RULES
        .iter()
        .any(|(section, key, _)| rule.section == *section && rule.key == *key)
}

/// The fixed rules followed by the extra ones that leave fixed fields alone.
pub fn rules_with(extra: &[MutationRule]) -> Vec<MutationRule> {
    DEFAULT_RULES
        .iter()
        .map(|(section, key, value)| MutationRule::new(*section, *key, *value))
        .chain(extra.iter().filter(|rule| !overrides_default(rule)).cloned())
        .collect()
}

pub fn default_rules() -> Vec<MutationRule> {
    rules_with(&[])
}

/// A loaded manifest document.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    root: Value,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    ///
    /// Fails with `ManifestNotFound` if the file does not exist.
    pub fn load(path: &Path) -> BootstrapResult<Self> {
        if !path.exists() {
            return Err(BootstrapError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(BootstrapError::io("read", path))?;
        Self::parse(path, &text)
    }

    /// Parse manifest text that belongs to `path`.
    pub fn parse(path: &Path, text: &str) -> BootstrapResult<Self> {
        let root =
            internal::parse(text).map_err(|reason| BootstrapError::invalid_manifest(path, reason))?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    /// Apply one rule in memory. Returns true if the document changed.
    pub fn apply(&mut self, rule: &MutationRule) -> BootstrapResult<bool> {
        internal::set_field(&mut self.root, rule)
            .map_err(|reason| BootstrapError::invalid_manifest(&self.path, reason))
    }

    /// A top-level object section, `None` if absent.
    pub fn section(&self, name: &str) -> BootstrapResult<Option<&Map<String, Value>>> {
        internal::section(&self.root, name)
            .map_err(|reason| BootstrapError::invalid_manifest(&self.path, reason))
    }

    pub fn render(&self) -> BootstrapResult<String> {
        internal::render(&self.root)
            .map_err(|reason| BootstrapError::invalid_manifest(&self.path, reason))
    }

    /// Write the document back to its path.
    pub fn save(&self) -> BootstrapResult<()> {
        let text = self.render()?;
        fs::write(&self.path, text).map_err(BootstrapError::io("write", &self.path))
    }
}

/// `<manifest>.backup` next to the manifest.
pub fn backup_path(manifest: &Path) -> PathBuf {
    let mut name = manifest.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy the manifest byte-for-byte to its backup path, replacing any older backup.
pub fn backup(manifest: &Path) -> BootstrapResult<PathBuf> {
    let destination = backup_path(manifest);
    fs::copy(manifest, &destination).map_err(BootstrapError::io("back up", manifest))?;
    Ok(destination)
}

/// Parse text that is expected to be a JSON object section (e.g. jq output).
pub fn parse_section(path: &Path, text: &str) -> BootstrapResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(_) => Err(BootstrapError::invalid_manifest(
            path,
            "section is not an object",
        )),
        Err(e) => Err(BootstrapError::invalid_manifest(path, e.to_string())),
    }
}
