//! Decoding JSON and YAML document streams into [`Value`] trees.
//!
//! Both formats may carry several documents per source: JSON as
//! concatenated or newline-delimited values (JSON Lines), YAML as a
//! `---`-separated stream.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{DiffnestError, Result};
use crate::value::{Number, Value};

/// Input format of a document source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl FromStr for Format {
    type Err = DiffnestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Err(DiffnestError::UnsupportedFormat(
                "toml (parser not implemented)".to_string(),
            )),
            other => Err(DiffnestError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("json"),
            Format::Yaml => f.write_str("yaml"),
        }
    }
}

/// Detect the format of a source from its file name.
///
/// `.json` is JSON and `.yaml`/`.yml` YAML. Stdin (`-`) and unknown
/// extensions fall back to YAML, which also accepts most JSON. `.toml`
/// is rejected as unsupported.
pub fn detect_format(path: &str) -> Result<Format> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => Ok(Format::Json),
        Some("toml") => "toml".parse(),
        _ => Ok(Format::Yaml),
    }
}

/// Decode every document in `text`.
///
/// Empty input yields no documents. YAML documents that decode to null are
/// skipped, whether empty (`---` followed by nothing) or an explicit
/// `--- null`, since the YAML parser reports both the same way. A literal
/// `null` in a JSON stream is kept as a document.
pub fn parse_documents(text: &str, format: Format) -> Result<Vec<Value>> {
    let documents = match format {
        Format::Json => parse_json(text)?,
        Format::Yaml => parse_yaml(text)?,
    };
    debug!(%format, count = documents.len(), "decoded documents");
    Ok(documents)
}

fn parse_json(text: &str) -> Result<Vec<Value>> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<serde_json::Value>()
        .map(|doc| Ok(Value::from(doc?)))
        .collect()
}

fn parse_yaml(text: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let raw = serde_yaml::Value::deserialize(document)?;
        if raw.is_null() {
            continue;
        }
        documents.push(from_yaml(raw));
    }
    Ok(documents)
}

fn from_yaml(raw: serde_yaml::Value) -> Value {
    match raw {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => Value::Number(yaml_number(&n)),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut fields: Vec<(String, Value)> = Vec::with_capacity(map.len());
            for (key, value) in map {
                let Some(key) = yaml_key(&key) else {
                    warn!("skipping non-scalar mapping key");
                    continue;
                };
                if fields.iter().any(|(k, _)| *k == key) {
                    warn!(%key, "skipping duplicate mapping key");
                    continue;
                }
                fields.push((key, from_yaml(value)));
            }
            Value::Object(fields)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Int(i)
    } else if let Some(u) = n.as_u64() {
        Number::UInt(u)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Scalar keys are stringified; `1: a` becomes the key `"1"`.
fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(&tagged.value),
        _ => None,
    }
}
