//! JSON editing backends
//!
//! The patcher never edits the manifest itself; it asks a [`JsonEditor`] to
//! set one field at a time and persist the result. Two backends exist:
//! the in-process [`BuiltinEditor`] and [`JqEditor`], which shells out to `jq`.

pub mod builtin;
pub mod jq;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::BootstrapResult;
use crate::exec::CommandRunner;
use crate::manifest::MutationRule;

pub use builtin::BuiltinEditor;
pub use jq::JqEditor;

/// Trait for JSON editing backends
pub trait JsonEditor {
    /// Get the name of this editor
    fn name(&self) -> &'static str;

    /// External program this editor depends on, if any
    fn tool(&self) -> Option<&'static str> {
        None
    }

    /// Check if this editor can run on this machine
    fn is_available(&self) -> bool;

    /// Apply one rule to the manifest file and persist the result
    fn apply(&self, manifest: &Path, rule: &MutationRule) -> BootstrapResult<()>;

    /// Read a top-level object section of the manifest; empty if absent
    fn section(&self, manifest: &Path, section: &str) -> BootstrapResult<Map<String, Value>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EditorKind {
    #[default]
    Builtin,
    Jq,
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorKind::Builtin => write!(f, "builtin"),
            EditorKind::Jq => write!(f, "jq"),
        }
    }
}

/// Get an editor backend by kind
pub fn get_editor<'a>(
    kind: EditorKind,
    runner: &'a dyn CommandRunner,
) -> Box<dyn JsonEditor + 'a> {
    match kind {
        EditorKind::Builtin => Box::new(BuiltinEditor),
        EditorKind::Jq => Box::new(JqEditor::new(runner)),
    }
}
