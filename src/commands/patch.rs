use anyhow::Result;
use snboot::editor;
use snboot::exec::SystemRunner;
use snboot::{Config, PatchOptions, Patcher, Reporter};

/// Patch the configured manifest. Returns the process exit code.
pub fn execute(config: &Config, install: bool, reporter: &mut Reporter) -> Result<i32> {
    let runner = SystemRunner;
    let editor = editor::get_editor(config.patch.editor, &runner);

    let options = PatchOptions::new(&config.patch.manifest)
        .with_extra_rules(&config.patch.rules)
        .with_install(config.install.clone(), install);

    reporter.debug(&format!(
        "Patching {} with the {} editor ({} rules)",
        config.patch.manifest.display(),
        editor.name(),
        options.rules().len()
    ));

    let report = Patcher::new(editor.as_ref(), &runner).run(&options, reporter)?;
    Ok(report.exit_code())
}
