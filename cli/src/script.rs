//! Action scripts for `replay` and `actions`
//!
//! JSON scripts are either a bare array of actions or `{ "actions": [...] }`;
//! TOML scripts use `[[actions]]` tables.

use anyhow::{Context, Result};
use cancelflow_flow::Action;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonScript {
    List(Vec<Action>),
    Document(Script),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Json,
    Toml,
}

impl ScriptFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ScriptFormat::Toml,
            _ => ScriptFormat::Json,
        }
    }
}

pub fn load_script(path: &Path) -> Result<Script> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    parse_script(&content, ScriptFormat::from_path(path))
        .with_context(|| format!("Failed to parse script: {}", path.display()))
}

pub fn parse_script(content: &str, format: ScriptFormat) -> Result<Script> {
    let script = match format {
        ScriptFormat::Toml => toml::from_str(content)?,
        ScriptFormat::Json => match serde_json::from_str::<JsonScript>(content)? {
            JsonScript::List(actions) => Script { actions },
            JsonScript::Document(script) => script,
        },
    };
    Ok(script)
}
