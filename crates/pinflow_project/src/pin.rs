//! Pin tags - direction and abstract value type of a node type pin
//!
//! Both enumerations are closed sets on the wire. Tags outside the set are
//! kept verbatim in an `Other` variant instead of failing the whole document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a node type pin
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PinDirection {
    Input,
    Output,
    /// Unrecognized direction tag, matches neither input nor output
    Other(String),
}

impl PinDirection {
    pub const INPUT: &'static str = "input";
    pub const OUTPUT: &'static str = "output";

    /// Wire tag for this direction
    pub fn as_str(&self) -> &str {
        match self {
            PinDirection::Input => Self::INPUT,
            PinDirection::Output => Self::OUTPUT,
            PinDirection::Other(tag) => tag,
        }
    }
}

impl From<String> for PinDirection {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            Self::INPUT => PinDirection::Input,
            Self::OUTPUT => PinDirection::Output,
            _ => PinDirection::Other(tag),
        }
    }
}

impl From<&str> for PinDirection {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<PinDirection> for String {
    fn from(direction: PinDirection) -> Self {
        match direction {
            PinDirection::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PinDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract value type declared by a node type pin
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PinType {
    /// Execution trigger
    Pulse,
    Bool,
    Number,
    String,
    /// Tag outside the closed set, preserved as written
    Other(String),
}

impl PinType {
    pub const PULSE: &'static str = "pulse";
    pub const BOOL: &'static str = "boolean";
    pub const NUMBER: &'static str = "number";
    pub const STRING: &'static str = "string";

    /// Wire tag for this type
    pub fn as_str(&self) -> &str {
        match self {
            PinType::Pulse => Self::PULSE,
            PinType::Bool => Self::BOOL,
            PinType::Number => Self::NUMBER,
            PinType::String => Self::STRING,
            PinType::Other(tag) => tag,
        }
    }
}

impl From<String> for PinType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            Self::PULSE => PinType::Pulse,
            Self::BOOL => PinType::Bool,
            Self::NUMBER => PinType::Number,
            Self::STRING => PinType::String,
            _ => PinType::Other(tag),
        }
    }
}

impl From<&str> for PinType {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<PinType> for String {
    fn from(pin_type: PinType) -> Self {
        match pin_type {
            PinType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
