//! Typed layer parameters
//!
//! Every layer kind declares a static table of [`ParamDescriptor`]s. A node
//! holds exactly one [`ParamValue`] per descriptor, and the value's variant
//! always matches the descriptor's [`ParamType`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a parameter within its kind's descriptor table.
pub type ParamId = u16;

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamType {
    Double,
    Int,
    /// Same wire form as `Int`, but restricted to a known set of values.
    Enumeration,
    String,
    Boolean,
    Color,
    /// Written as one `name=value` line per element.
    StringList,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Runtime value of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ParamValue {
    Double(f64),
    Int(i32),
    Enumeration(i32),
    String(String),
    Boolean(bool),
    Color(Rgb),
    StringList(Vec<String>),
}

impl ParamValue {
    /// The type tag of the active variant.
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Double(_) => ParamType::Double,
            ParamValue::Int(_) => ParamType::Int,
            ParamValue::Enumeration(_) => ParamType::Enumeration,
            ParamValue::String(_) => ParamType::String,
            ParamValue::Boolean(_) => ParamType::Boolean,
            ParamValue::Color(_) => ParamType::Color,
            ParamValue::StringList(_) => ParamType::StringList,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer payload of either `Int` or `Enumeration`.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ParamValue::Int(v) | ParamValue::Enumeration(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match self {
            ParamValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::StringList(items) => Some(items),
            _ => None,
        }
    }
}

/// Compile-time default of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    Double(f64),
    Int(i32),
    Enumeration(i32),
    String(&'static str),
    Boolean(bool),
    Color(Rgb),
    EmptyList,
}

impl ParamDefault {
    pub fn value(&self) -> ParamValue {
        match *self {
            ParamDefault::Double(v) => ParamValue::Double(v),
            ParamDefault::Int(v) => ParamValue::Int(v),
            ParamDefault::Enumeration(v) => ParamValue::Enumeration(v),
            ParamDefault::String(s) => ParamValue::String(s.to_string()),
            ParamDefault::Boolean(b) => ParamValue::Boolean(b),
            ParamDefault::Color(c) => ParamValue::Color(c),
            ParamDefault::EmptyList => ParamValue::StringList(Vec::new()),
        }
    }

    const fn param_type(&self) -> ParamType {
        match self {
            ParamDefault::Double(_) => ParamType::Double,
            ParamDefault::Int(_) => ParamType::Int,
            ParamDefault::Enumeration(_) => ParamType::Enumeration,
            ParamDefault::String(_) => ParamType::String,
            ParamDefault::Boolean(_) => ParamType::Boolean,
            ParamDefault::Color(_) => ParamType::Color,
            ParamDefault::EmptyList => ParamType::StringList,
        }
    }
}

/// Static description of one parameter of a layer kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    pub id: ParamId,
    pub name: &'static str,
    pub param_type: ParamType,
    pub default: ParamDefault,
}

impl ParamDescriptor {
    /// The declared type is taken from the default so the two cannot disagree.
    pub const fn new(id: ParamId, name: &'static str, default: ParamDefault) -> Self {
        Self {
            id,
            name,
            param_type: default.param_type(),
            default,
        }
    }

    /// Case-insensitive match against the key of a `key=value` line.
    pub fn matches_key(&self, key: &str) -> bool {
        self.name.eq_ignore_ascii_case(key)
    }
}

/// Find a descriptor by the key of a `key=value` line.
pub fn find_by_key<'a>(table: &'a [ParamDescriptor], key: &str) -> Option<&'a ParamDescriptor> {
    table.iter().find(|d| d.matches_key(key))
}

/// Find a descriptor by id.
pub fn find_by_id(table: &[ParamDescriptor], id: ParamId) -> Option<&ParamDescriptor> {
    table.iter().find(|d| d.id == id)
}
