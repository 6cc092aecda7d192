//! Diagnostics for lookups that fell back to a default
//!
//! Resolution never fails. Each place it substitutes an empty value is
//! recorded here so callers can surface it or refuse the result.

use serde::Serialize;
use std::fmt;

/// How much a degraded lookup matters
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Routine, e.g. an output that was never instantiated
    Note,
    /// The graph probably does not mean what its author intended
    Warning,
}

/// A single degraded-default event
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Node references a type id absent from `nodeTypes`
    MissingNodeType {
        node: String,
        type_id: Option<String>,
    },
    /// Output pin has no pin instance on its node
    MissingPinInstance { node: String, pin_key: String },
    /// Link destination does not name an existing pin instance
    DanglingLink {
        link: String,
        pin: Option<String>,
    },
    /// Input pin type tag outside the known set, passed through as is
    UnrecognizedPinType {
        node_type: String,
        pin_key: String,
        tag: String,
    },
    /// Input pin without a type tag
    UndeclaredPinType { node_type: String, pin_key: String },
}

impl Diagnostic {
    /// Severity of this diagnostic
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::MissingPinInstance { .. } => Severity::Note,
            _ => Severity::Warning,
        }
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }

    /// Send this diagnostic to the `log` facade
    pub fn log(&self) {
        match self.severity() {
            Severity::Warning => log::warn!("{}", self),
            Severity::Note => log::debug!("{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNodeType { node, type_id } => match type_id {
                Some(type_id) => write!(f, "Node '{}' has unknown type '{}'", node, type_id),
                None => write!(f, "Node '{}' has no type id", node),
            },
            Self::MissingPinInstance { node, pin_key } => {
                write!(f, "Node '{}' has no pin instance for output '{}'", node, pin_key)
            }
            Self::DanglingLink { link, pin } => match pin {
                Some(pin) => write!(f, "Link '{}' points to missing pin '{}'", link, pin),
                None => write!(f, "Link '{}' has no destination pin", link),
            },
            Self::UnrecognizedPinType { node_type, pin_key, tag } => write!(
                f,
                "Pin '{}' of node type '{}' has unrecognized type '{}'",
                pin_key, node_type, tag
            ),
            Self::UndeclaredPinType { node_type, pin_key } => {
                write!(f, "Pin '{}' of node type '{}' declares no type", pin_key, node_type)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        let note = Diagnostic::MissingPinInstance {
            node: "n1".into(),
            pin_key: "sum".into(),
        };
        assert_eq!(note.severity(), Severity::Note);
        assert!(!note.is_warning());

        let warning = Diagnostic::MissingNodeType {
            node: "n1".into(),
            type_id: Some("mul".into()),
        };
        assert!(warning.is_warning());
        assert!(Severity::Warning > Severity::Note);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::DanglingLink {
            link: "l1".into(),
            pin: Some("p9".into()),
        };
        assert_eq!(d.to_string(), "Link 'l1' points to missing pin 'p9'");

        let d = Diagnostic::MissingNodeType {
            node: "n1".into(),
            type_id: None,
        };
        assert_eq!(d.to_string(), "Node 'n1' has no type id");
    }
}
