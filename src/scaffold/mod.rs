//! Project scaffolding
//!
//! Creates `<project>/`, `src/` and `test/`, then writes the selected
//! template files. Existing files are never overwritten, so re-running only
//! fills in what is missing.

pub mod templates;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, BootstrapResult};
use crate::output::Reporter;

pub use templates::TEMPLATE_NAMES;

/// Directories created inside every project.
pub const PROJECT_DIRS: &[&str] = &["src", "test"];

#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

pub struct Scaffold {
    root: PathBuf,
    files: Vec<String>,
}

impl Scaffold {
    /// Fails with `UnknownTemplate` before anything is written.
    pub fn new(root: impl AsRef<Path>, files: &[String]) -> BootstrapResult<Self> {
        if let Some(unknown) = files.iter().find(|f| !TEMPLATE_NAMES.contains(&f.as_str())) {
            return Err(BootstrapError::UnknownTemplate {
                name: unknown.clone(),
                available: TEMPLATE_NAMES.join(", "),
            });
        }
        Ok(Self {
            root: root.as_ref().to_path_buf(),
            files: files.to_vec(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn create_project(&self, reporter: &mut Reporter) -> BootstrapResult<ScaffoldReport> {
        let mut report = ScaffoldReport::default();

        let dirs = std::iter::once(self.root.clone())
            .chain(PROJECT_DIRS.iter().map(|dir| self.root.join(dir)));
        for dir in dirs {
            if dir.is_dir() {
                report.skipped.push(dir);
                continue;
            }
            fs::create_dir_all(&dir).map_err(BootstrapError::io("create", &dir))?;
            reporter.success(&format!("Created {}/", dir.display()));
            report.created.push(dir);
        }

        let project = self.project_name();
        for name in &self.files {
            let path = self.root.join(name);
            let contents = templates::render(name, &project).unwrap_or_default();
            if write_new(&path, &contents)? {
                reporter.success(&format!("Created {}", path.display()));
                report.created.push(path);
            } else {
                reporter.info(&format!("Kept existing {}", path.display()));
                report.skipped.push(path);
            }
        }

        Ok(report)
    }

    /// Directory name of the project root, used for the package name.
    pub fn project_name(&self) -> String {
        self.root
            .canonicalize()
            .ok()
            .as_deref()
            .and_then(Path::file_name)
            .or_else(|| self.root.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string())
    }
}

/// Write `contents` only if `path` does not exist yet. Returns true if written.
fn write_new(path: &Path, contents: &str) -> BootstrapResult<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(BootstrapError::io("create", path)(e)),
    };
    file.write_all(contents.as_bytes())
        .map_err(BootstrapError::io("write", path))?;
    Ok(true)
}
