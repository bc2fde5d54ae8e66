//! INI decoder.
//!
//! Each `[section]` becomes a mapping of string values. Option names are
//! lower-cased. The `DEFAULT` section is not emitted; its options are visible
//! in every other section. Values support extended interpolation:
//! `${option}` reads from the same section, `${section:option}` from another
//! one and `$$` is a literal dollar sign.
//!
//! Indented lines continue the previous value. Repeating a section or an
//! option within a section is an error.

use super::{Decoder, read_text};
use crate::error::DecodeError;
use crate::types::{Tree, Value};
use ::ini::{Ini, ParseOption};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::io::Read;

const DEFAULT_SECTION: &str = "DEFAULT";
const MAX_INTERPOLATION_DEPTH: usize = 10;

type Options = IndexMap<String, String>;

/// Decodes INI files into one mapping per section.
#[derive(Debug, Clone, Copy, Default)]
pub struct IniDecoder;

impl Decoder for IniDecoder {
    fn decode(&self, reader: &mut dyn Read, _format: &str) -> Result<Tree, DecodeError> {
        let text = read_text(reader)?;
        Document::parse(&text)?.to_tree()
    }
}

struct Document {
    defaults: Options,
    sections: IndexMap<String, Options>,
}

impl Document {
    fn parse(text: &str) -> Result<Self, DecodeError> {
        let option = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, option).map_err(DecodeError::new)?;

        let mut defaults = Options::new();
        let mut sections: IndexMap<String, Options> = IndexMap::new();
        let mut seen = HashSet::new();

        for (name, properties) in ini.iter() {
            let Some(name) = name else {
                if properties.iter().next().is_some() {
                    return Err(DecodeError::new("option found before any [section] header"));
                }
                continue;
            };

            if !seen.insert(name) {
                return Err(DecodeError::new(format!("duplicate section [{name}]")));
            }
            let target = if name == DEFAULT_SECTION {
                &mut defaults
            } else {
                sections.entry(name.to_string()).or_default()
            };

            for (key, value) in properties.iter() {
                let key = key.trim().to_lowercase();
                if key.is_empty() {
                    return Err(DecodeError::new(format!(
                        "empty option name in section [{name}]"
                    )));
                }
                if target.contains_key(&key) {
                    return Err(DecodeError::new(format!(
                        "duplicate option '{key}' in section [{name}]"
                    )));
                }
                target.insert(key, join_continuation(value));
            }
        }

        Ok(Self { defaults, sections })
    }

    /// Raw value of `option` as seen from `section`.
    fn lookup(&self, section: &str, option: &str) -> Option<&str> {
        if section == DEFAULT_SECTION {
            return self.defaults.get(option).map(String::as_str);
        }
        let own = self.sections.get(section)?;
        own.get(option)
            .or_else(|| self.defaults.get(option))
            .map(String::as_str)
    }

    fn to_tree(&self) -> Result<Tree, DecodeError> {
        let mut tree = Tree::new();

        for (name, own) in &self.sections {
            let keys = self
                .defaults
                .keys()
                .chain(own.keys().filter(|key| !self.defaults.contains_key(*key)));

            let mut section = Tree::new();
            for key in keys {
                let raw = self.lookup(name, key).unwrap_or_default();
                let value = self.interpolate(name, raw, 1)?;
                section.insert(key.clone(), Value::String(value));
            }
            tree.insert(name.clone(), Value::Object(section));
        }

        Ok(tree)
    }

    fn interpolate(&self, section: &str, value: &str, depth: usize) -> Result<String, DecodeError> {
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(DecodeError::new(format!(
                "interpolation too deep in section [{section}]: {value:?}"
            )));
        }

        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if let Some(tail) = rest.strip_prefix("$$") {
                out.push('$');
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix("${") {
                let end = tail
                    .find('}')
                    .filter(|&end| end > 0)
                    .ok_or_else(|| {
                        DecodeError::new(format!("bad interpolation reference {rest:?}"))
                    })?;
                let reference = &tail[..end];
                rest = &tail[end + 1..];

                let parts: Vec<&str> = reference.split(':').collect();
                let (target, option) = match parts.as_slice() {
                    [option] => (section, option.to_lowercase()),
                    [target, option] => (*target, option.to_lowercase()),
                    _ => {
                        return Err(DecodeError::new(format!(
                            "more than one ':' in reference {reference:?}"
                        )));
                    }
                };

                let raw = self.lookup(target, &option).ok_or_else(|| {
                    DecodeError::new(format!(
                        "missing option '{option}' in section [{target}] referenced from [{section}]"
                    ))
                })?;
                if raw.contains('$') {
                    out.push_str(&self.interpolate(target, raw, depth + 1)?);
                } else {
                    out.push_str(raw);
                }
            } else {
                return Err(DecodeError::new(format!(
                    "'$' must be followed by '$' or '{{', found {rest:?}"
                )));
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Continuation lines are trimmed and joined with newlines.
fn join_continuation(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}
