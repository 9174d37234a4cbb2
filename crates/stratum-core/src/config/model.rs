use crate::error::{LayoutError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// `stratum.toml` schema: types, routes, layouts and the resource tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
    #[serde(default)]
    pub layouts: Vec<LayoutDecl>,
    pub tree: TreeDecl,
}

/// Settings shared by every layout renderer of a site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Mark each rendered layout in the output
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub debug: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    /// Direct supertypes, most specific first
    #[serde(default)]
    pub extends: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDecl {
    pub name: String,
    /// Let layouts registered for plain requests match this route too
    #[serde(default)]
    pub use_global_views: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDecl {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    /// Template file, relative to the site file
    #[serde(default)]
    pub template: Option<String>,
    /// Inline template source
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default = "default_use_global_views")]
    pub use_global_views: bool,
    /// Static data merged into the layout data when the layout is applied
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

fn default_use_global_views() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeDecl {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub children: Vec<TreeDecl>,
}

/// Interpret a setting value as a boolean
///
/// Accepts `true`/`false`, `on`/`off`, `yes`/`no`, `y`/`n`, `t`/`f` and
/// `1`/`0`, case-insensitively and ignoring surrounding whitespace.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "y" | "t" | "1" => Some(true),
        "false" | "no" | "off" | "n" | "f" | "0" | "" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(n) => Ok(n != 0),
        Flag::Text(s) => parse_bool(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid boolean value '{}'", s))),
    }
}

impl SiteConfig {
    /// Read and validate a site file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LayoutError::ConfigParseError(e.to_string()))?;
        content.parse()
    }

    fn validate(&self) -> Result<()> {
        for (index, layout) in self.layouts.iter().enumerate() {
            if layout.template.is_some() && layout.source.is_some() {
                return Err(LayoutError::ConfigInvalidValue {
                    field: format!("layouts[{}]", index),
                    reason: "'template' and 'source' are mutually exclusive".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for SiteConfig {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        let config: SiteConfig =
            toml::from_str(s).map_err(|e| LayoutError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
