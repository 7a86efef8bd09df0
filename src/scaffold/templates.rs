//! Boilerplate files for a new ServiceNow SDK project.

use serde_json::json;

pub const PACKAGE_JSON: &str = "package.json";
pub const TSCONFIG_JSON: &str = "tsconfig.json";
pub const ESLINTRC_JS: &str = ".eslintrc.js";
pub const GITIGNORE: &str = ".gitignore";

/// Every template snboot can write, in write order.
pub const TEMPLATE_NAMES: &[&str] = &[PACKAGE_JSON, TSCONFIG_JSON, ESLINTRC_JS, GITIGNORE];

/// Render a template for `project`. `None` for unknown names.
pub fn render(name: &str, project: &str) -> Option<String> {
    let text = match name {
        PACKAGE_JSON => package_json(project),
        TSCONFIG_JSON => pretty(&json!({
            "compilerOptions": {
                "target": "ES2021",
                "module": "commonjs",
                "lib": ["ES2021"],
                "strict": true,
                "esModuleInterop": true,
                "skipLibCheck": true,
                "forceConsistentCasingInFileNames": true,
                "outDir": "dist",
                "rootDir": ".",
                "types": ["jest", "node"]
            },
            "include": ["src/**/*.ts", "test/**/*.ts"],
            "exclude": ["node_modules", "dist"]
        })),
        ESLINTRC_JS => ESLINTRC.to_string(),
        GITIGNORE => GITIGNORE_LINES.to_string(),
        _ => return None,
    };
    Some(text)
}

fn package_json(project: &str) -> String {
    pretty(&json!({
        "name": npm_name(project),
        "version": "0.1.0",
        "description": "ServiceNow scoped application scripts",
        "private": true,
        "main": "dist/src/index.js",
        "scripts": {
            "build": "tsc",
            "lint": "eslint src test --ext .ts",
            "test": "jest"
        },
        "devDependencies": {
            "@servicenow/glide": "26.0.1",
            "@types/jest": "29.5.12",
            "@types/node": "20.14.10",
            "@typescript-eslint/eslint-plugin": "7.16.1",
            "@typescript-eslint/parser": "7.16.1",
            "eslint": "8.57.0",
            "jest": "29.7.0",
            "ts-jest": "29.2.3",
            "typescript": "5.5.4"
        }
    }))
}

fn pretty(value: &serde_json::Value) -> String {
    let mut text = serde_json::to_string_pretty(value).unwrap_or_default();
    text.push('\n');
    text
}

/// npm package names are lowercase without spaces.
pub fn npm_name(project: &str) -> String {
    let name: String = project
        .trim()
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => {
                c.to_ascii_lowercase()
            }
            _ => '-',
        })
        .collect();
    let name = name.trim_matches(|c| c == '-' || c == '.' || c == '_');
    if name.is_empty() {
        "project".to_string()
    } else {
        name.to_string()
    }
}

const ESLINTRC: &str = r#"module.exports = {
  root: true,
  parser: '@typescript-eslint/parser',
  plugins: ['@typescript-eslint'],
  extends: ['eslint:recommended', 'plugin:@typescript-eslint/recommended'],
  env: {
    node: true,
    jest: true,
  },
  ignorePatterns: ['dist/', 'node_modules/'],
  rules: {
    '@typescript-eslint/no-explicit-any': 'off',
  },
};
"#;

const GITIGNORE_LINES: &str = "node_modules/
dist/
coverage/
*.log
.env
package.json.backup
";
