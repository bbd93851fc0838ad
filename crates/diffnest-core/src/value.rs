//! Format-agnostic value tree that every comparison operates on.
//!
//! The decoder turns JSON or YAML text into [`Value`]s. Integers and floats
//! are kept apart so that numbers compare exactly when both sides are
//! integral, and objects keep their keys in source order as a
//! `Vec<(String, Value)>`.

use std::fmt;

/// A decoded document node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in source order. Keys are unique.
    Object(Vec<(String, Value)>),
}

/// A numeric scalar in the representation the source format produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// The value as an exact integer, if it has no fractional part.
    ///
    /// Floats qualify when they are finite, integral and inside the `i128`
    /// range, so `42.0` yields `Some(42)`.
    pub fn as_integer(self) -> Option<i128> {
        match self {
            Number::Int(n) => Some(i128::from(n)),
            Number::UInt(n) => Some(i128::from(n)),
            Number::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 1.0e38 {
                    Some(f as i128)
                } else {
                    None
                }
            }
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::UInt(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Numeric equality across representations.
    ///
    /// Two integral values compare as integers; otherwise both sides are
    /// compared as `f64`. This keeps a YAML `42` equal to a JSON `42.0`.
    /// NaN equals NaN so that every value equals itself.
    pub fn numeric_eq(self, other: Number) -> bool {
        match (self.as_integer(), other.as_integer()) {
            (Some(a), Some(b)) => a == b,
            (None, None) if self.as_f64().is_nan() && other.as_f64().is_nan() => true,
            _ => self.as_f64() == other.as_f64(),
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::UInt(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

impl Value {
    /// Number of atomic values beneath this node.
    ///
    /// Scalars count as one; containers sum their children, so an empty
    /// array or object counts as zero.
    pub fn leaf_count(&self) -> usize {
        match self {
            Value::Array(items) => items.iter().map(Value::leaf_count).sum(),
            Value::Object(fields) => fields.iter().map(|(_, v)| v.leaf_count()).sum(),
            _ => 1,
        }
    }

    /// Whether this is the zero/empty form of its type:
    /// `null`, `false`, `0`, `""`, `[]` or `{}`.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.is_zero(),
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Whether both values have the same variant.
    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Look up an object field by exact key. Returns `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(Number::from(&n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(Number::Int(n)) => serde_json::Value::from(*n),
            Value::Number(Number::UInt(n)) => serde_json::Value::from(*n),
            // Non-finite floats have no JSON form.
            Value::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    /// Scalars print on one line, with line breaks in strings escaped;
    /// containers print a short summary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) if s.contains(['\n', '\r']) => {
                f.write_str(&s.replace('\r', "\\r").replace('\n', "\\n"))
            }
            Value::String(s) => f.write_str(s),
            Value::Array(items) if items.is_empty() => f.write_str("[]"),
            Value::Array(items) => write!(f, "[{} items]", items.len()),
            Value::Object(fields) if fields.is_empty() => f.write_str("{}"),
            Value::Object(fields) => write!(f, "{{{} fields}}", fields.len()),
        }
    }
}
