use anyhow::Result;
use serde::Serialize;
use snboot::editor;
use snboot::environment::{Environment, ToolInfo};
use snboot::exec::{CommandRunner, SystemRunner};
use snboot::{Config, Reporter};

#[derive(Serialize)]
struct HealthCheck<'a> {
    status: &'static str, // "healthy", "warning", "critical"
    editor: String,
    environment: &'a Environment,
    recommendations: Vec<String>,
}

/// Report tool availability. Exit code 1 if a required tool is missing.
pub fn execute(config: &Config, json_output: bool, reporter: &mut Reporter) -> Result<i32> {
    let runner = SystemRunner;
    let environment = detect(config, &runner);
    let health = analyze(config, &environment);

    if json_output {
        reporter.raw(&serde_json::to_string_pretty(&health)?);
    } else {
        display(&health, reporter);
    }

    Ok(match health.status {
        "critical" => 1,
        _ => 0,
    })
}

fn detect(config: &Config, runner: &dyn CommandRunner) -> Environment {
    let editor = editor::get_editor(config.patch.editor, runner);
    let mut required = vec![config.install.program.as_str()];
    if let Some(tool) = editor.tool() {
        required.push(tool);
    }
    Environment::detect(runner, &required)
}

fn analyze<'a>(config: &Config, environment: &'a Environment) -> HealthCheck<'a> {
    let missing_required = environment.missing_required();
    let missing_optional = environment.missing_optional();

    let recommendations = missing_required
        .iter()
        .chain(missing_optional.iter())
        .map(|tool| format!("Install {}: {}", tool.name, install_hint(&tool.name)))
        .collect();

    let status = if !missing_required.is_empty() {
        "critical"
    } else if !missing_optional.is_empty() {
        "warning"
    } else {
        "healthy"
    };

    HealthCheck {
        status,
        editor: config.patch.editor.to_string(),
        environment,
        recommendations,
    }
}

fn install_hint(tool: &str) -> &'static str {
    match tool {
        "git" => "https://git-scm.com/downloads",
        "node" | "npm" => "install Node.js through nvm (https://github.com/nvm-sh/nvm)",
        "jq" => "brew install jq, apt install jq, or winget install jqlang.jq",
        _ => "check your package manager",
    }
}

fn display(health: &HealthCheck<'_>, reporter: &mut Reporter) {
    let env = health.environment;
    reporter.heading(&format!("Environment ({} {})", env.os, env.arch));

    for tool in &env.tools {
        display_tool(tool, reporter);
    }

    reporter.raw("");
    reporter.info(&format!("JSON editor: {}", health.editor));

    if !health.recommendations.is_empty() {
        reporter.heading("\nRecommendations:");
        for (i, rec) in health.recommendations.iter().enumerate() {
            reporter.raw(&format!("  {}. {}", i + 1, rec));
        }
    }
}

fn display_tool(tool: &ToolInfo, reporter: &mut Reporter) {
    let label = format!("{:<5}", tool.name);
    match (tool.available, tool.required) {
        (true, _) => reporter.success(&format!(
            "{} {}",
            label,
            tool.version.as_deref().unwrap_or("installed")
        )),
        (false, true) => reporter.error(&format!("{label} not found (required)")),
        (false, false) => reporter.warning(&format!("{label} not found")),
    }
}
