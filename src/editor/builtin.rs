use std::path::Path;

use serde_json::{Map, Value};

use super::JsonEditor;
use crate::error::BootstrapResult;
use crate::manifest::{Manifest, MutationRule};

/// In-process editor over an ordered JSON tree. Always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinEditor;

impl JsonEditor for BuiltinEditor {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn apply(&self, manifest: &Path, rule: &MutationRule) -> BootstrapResult<()> {
        let mut document = Manifest::load(manifest)?;
        document.apply(rule)?;
        document.save()
    }

    fn section(&self, manifest: &Path, section: &str) -> BootstrapResult<Map<String, Value>> {
        let document = Manifest::load(manifest)?;
        Ok(document.section(section)?.cloned().unwrap_or_default())
    }
}
