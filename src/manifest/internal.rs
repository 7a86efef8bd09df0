//! Internal implementation for the manifest module
//!
//! The document is held as an ordered `serde_json::Value` tree. Only the
//! targeted section is ever touched; everything else round-trips untouched.

use serde_json::{Map, Value};

use super::MutationRule;

pub fn parse(text: &str) -> Result<Value, String> {
    let root: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    if !root.is_object() {
        return Err("top-level value is not an object".to_string());
    }
    Ok(root)
}

/// Two-space indented JSON with a trailing newline.
pub fn render(root: &Value) -> Result<String, String> {
    let mut text = serde_json::to_string_pretty(root).map_err(|e| e.to_string())?;
    text.push('\n');
    Ok(text)
}

/// Set `root[section][key] = value`. Returns true if the document changed.
///
/// An existing key keeps its position, a new key is appended, a missing
/// section is created at the end of the document.
pub fn set_field(root: &mut Value, rule: &MutationRule) -> Result<bool, String> {
    let object = root
        .as_object_mut()
        .ok_or_else(|| "top-level value is not an object".to_string())?;
    let section = object
        .entry(rule.section.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    let section = section
        .as_object_mut()
        .ok_or_else(|| format!("'{}' is not an object", rule.section))?;

    let value = Value::String(rule.value.clone());
    if section.get(&rule.key) == Some(&value) {
        return Ok(false);
    }
    section.insert(rule.key.clone(), value);
    Ok(true)
}

pub fn section<'a>(root: &'a Value, name: &str) -> Result<Option<&'a Map<String, Value>>, String> {
    match root.get(name) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(format!("'{name}' is not an object")),
    }
}
