//! Encoding merged trees for display.

use crate::error::{Error, Result};
use crate::types::{Tree, Value};

/// Output encoding of a rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Toml,
    Json,
}

impl RenderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Toml => super::TOML,
            RenderFormat::Json => super::JSON,
        }
    }
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(RenderFormat::Toml),
            "json" => Ok(RenderFormat::Json),
            _ => Err(format!("Invalid format '{}'. Valid options: toml, json", s)),
        }
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render `tree` in `format`.
pub fn render(tree: &Tree, format: RenderFormat) -> Result<String> {
    match format {
        RenderFormat::Toml => to_toml_string(tree),
        RenderFormat::Json => to_json_string(tree),
    }
}

/// Render as TOML. Null values have no TOML form and are left out.
pub fn to_toml_string(tree: &Tree) -> Result<String> {
    let table = toml_table(tree)?;
    ::toml::to_string(&table).map_err(|e| render_error(RenderFormat::Toml, e))
}

/// Render as pretty-printed JSON with a trailing newline.
pub fn to_json_string(tree: &Tree) -> Result<String> {
    let mut out =
        serde_json::to_string_pretty(tree).map_err(|e| render_error(RenderFormat::Json, e))?;
    out.push('\n');
    Ok(out)
}

fn render_error(format: RenderFormat, err: impl std::fmt::Display) -> Error {
    Error::Render {
        format: format.as_str().to_string(),
        message: err.to_string(),
    }
}

fn toml_table(tree: &Tree) -> Result<::toml::Table> {
    let mut table = ::toml::Table::new();
    for (key, value) in tree {
        if let Some(value) = toml_value(value)? {
            table.insert(key.clone(), value);
        }
    }
    Ok(table)
}

fn toml_value(value: &Value) -> Result<Option<::toml::Value>> {
    use ::toml::Value as Toml;

    Ok(Some(match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => Toml::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Toml::Integer(i)
            } else if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
                Toml::Float(f)
            } else {
                return Err(render_error(
                    RenderFormat::Toml,
                    format!("integer {n} does not fit in a TOML integer"),
                ));
            }
        }
        Value::String(s) => Toml::String(s.clone()),
        Value::Array(items) => {
            let mut array = Vec::with_capacity(items.len());
            for item in items {
                if let Some(item) = toml_value(item)? {
                    array.push(item);
                }
            }
            Toml::Array(array)
        }
        Value::Object(map) => Toml::Table(toml_table(map)?),
    }))
}
