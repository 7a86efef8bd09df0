use anyhow::Result;
use snboot::scaffold::Scaffold;
use snboot::Reporter;
use std::path::Path;

pub fn execute(name: &Path, files: &[String], reporter: &mut Reporter) -> Result<i32> {
    let scaffold = Scaffold::new(name, files)?;
    reporter.heading(&format!("Scaffolding {}", name.display()));

    let report = scaffold.create_project(reporter)?;

    reporter.raw(&format!(
        "\n{} created, {} already present",
        report.created.len(),
        report.skipped.len()
    ));
    if !report.created.is_empty() {
        reporter.info(&format!(
            "Next: cd {} && snboot --install",
            scaffold.root().display()
        ));
    }
    Ok(0)
}
