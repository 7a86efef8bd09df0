use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::exec::CommandRunner;

/// Tools a ServiceNow SDK project touches, in display order.
pub const KNOWN_TOOLS: &[&str] = &["git", "node", "npm", "jq"];

#[derive(Debug, Serialize, Deserialize)]
pub struct Environment {
    pub os: String,
    pub arch: String,
    pub tools: Vec<ToolInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    pub required: bool,
    pub version: Option<String>,
    pub path: Option<String>,
}

impl Environment {
    /// Detect the known tools plus any extra required ones.
    pub fn detect(runner: &dyn CommandRunner, required: &[&str]) -> Self {
        let mut names: Vec<&str> = KNOWN_TOOLS.to_vec();
        for name in required {
            if !names.contains(name) {
                names.push(*name);
            }
        }

        let tools = names
            .into_iter()
            .map(|name| detect_tool(runner, name, required.contains(&name)))
            .collect();

        Environment {
            os: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            tools,
        }
    }

    pub fn tool(&self, name: &str) -> Option<&ToolInfo> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn missing_required(&self) -> Vec<&ToolInfo> {
        self.tools
            .iter()
            .filter(|tool| tool.required && !tool.available)
            .collect()
    }

    pub fn missing_optional(&self) -> Vec<&ToolInfo> {
        self.tools
            .iter()
            .filter(|tool| !tool.required && !tool.available)
            .collect()
    }
}

fn detect_tool(runner: &dyn CommandRunner, name: &str, required: bool) -> ToolInfo {
    let mut info = ToolInfo {
        name: name.to_string(),
        available: false,
        required,
        version: None,
        path: None,
    };

    if let Some(path) = runner.locate(name) {
        info.available = true;
        info.path = Some(path.display().to_string());

        // Try to get version
        if let Ok(output) = runner.run(name, &["--version"], Path::new(".")) {
            info.version = output
                .stdout
                .lines()
                .next()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string);
        }
    }

    info
}
