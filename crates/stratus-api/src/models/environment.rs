//! Environment aggregate of an application.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Number, Value};

/// The four independent variable groups of an application.
///
/// No group implies an ordering; presentation sorts keys itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    /// User-defined variables.
    pub environment: HashMap<String, String>,
    /// Platform-injected variables with arbitrary structured values.
    pub system: HashMap<String, EnvValue>,
    /// Runtime-injected group variables.
    pub running: HashMap<String, String>,
    /// Build-time group variables.
    pub staging: HashMap<String, String>,
}

impl Environment {
    /// Whether all four groups are empty.
    pub fn is_empty(&self) -> bool {
        self.environment.is_empty()
            && self.system.is_empty()
            && self.running.is_empty()
            && self.staging.is_empty()
    }
}

/// Dynamic value of a system-provided variable.
///
/// Mappings keep the order in which the server declared their keys.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
    /// JSON `null`.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar.
    Number(Number),
    /// String scalar.
    String(String),
    /// Ordered sequence.
    List(Vec<EnvValue>),
    /// Mapping in declaration order.
    Map(Vec<(String, EnvValue)>),
}

impl EnvValue {
    /// Whether this value is a scalar (renders on a single line).
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Map(_))
    }
}

impl From<Value> for EnvValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl fmt::Display for EnvValue {
    /// Scalars render raw; compound values render as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
