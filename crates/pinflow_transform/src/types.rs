//! Type resolution - node types, pin classification and native types
//!
//! Node types live at project level, not in patches. A node whose type id is
//! missing resolves to an empty node type, which has no pins and no behavior.

use crate::context::ProjectContext;
use indexmap::IndexMap;
use pinflow_project::{Node, NodeType, NodeTypePin, PinDirection, PinType};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Runtime value kind an abstract pin type resolves to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeType {
    Boolean,
    Number,
    String,
    /// Unrecognized tag, passed through verbatim
    Unmapped(String),
    /// The pin declares no type at all
    Undeclared,
}

impl NativeType {
    /// Name of the runtime kind, or the raw tag for unmapped types
    pub fn name(&self) -> Option<&str> {
        match self {
            NativeType::Boolean => Some("Boolean"),
            NativeType::Number => Some("Number"),
            NativeType::String => Some("String"),
            NativeType::Unmapped(tag) => Some(tag),
            NativeType::Undeclared => None,
        }
    }
}

impl Serialize for NativeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_unit(),
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("undeclared"))
    }
}

/// Map an abstract pin type to its native kind
pub fn native_type(pin_type: &PinType) -> NativeType {
    match pin_type {
        PinType::Pulse | PinType::Bool => NativeType::Boolean,
        PinType::Number => NativeType::Number,
        PinType::String => NativeType::String,
        PinType::Other(tag) => NativeType::Unmapped(tag.clone()),
    }
}

/// Declared pins of a node type with the given direction, in declaration order
pub fn classify_pins<'a>(
    node_type: &'a NodeType,
    direction: &PinDirection,
) -> IndexMap<&'a str, &'a NodeTypePin> {
    node_type
        .pins
        .iter()
        .filter(|(_, pin)| pin.has_direction(direction))
        .map(|(key, pin)| (key.as_str(), pin))
        .collect()
}

/// Input pins of a node type
pub fn inputs(node_type: &NodeType) -> IndexMap<&str, &NodeTypePin> {
    classify_pins(node_type, &PinDirection::Input)
}

/// Output pins of a node type
pub fn outputs(node_type: &NodeType) -> IndexMap<&str, &NodeTypePin> {
    classify_pins(node_type, &PinDirection::Output)
}

/// Native type of every input pin, keyed by pin key
pub fn input_types(node_type: &NodeType) -> IndexMap<String, NativeType> {
    inputs(node_type)
        .into_iter()
        .map(|(key, pin)| {
            let native = pin
                .pin_type
                .as_ref()
                .map(native_type)
                .unwrap_or(NativeType::Undeclared);
            (key.to_string(), native)
        })
        .collect()
}

/// Behavior fields of a node type plus its input type map
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformedNodeType {
    pub pure: Option<Value>,
    pub setup: Option<Value>,
    pub evaluate: Option<Value>,
    pub input_types: IndexMap<String, NativeType>,
}

/// Extract the runtime-facing part of a node type
pub fn transformed_node_type(node_type: &NodeType) -> TransformedNodeType {
    TransformedNodeType {
        pure: node_type.pure.clone(),
        setup: node_type.setup.clone(),
        evaluate: node_type.evaluate.clone(),
        input_types: input_types(node_type),
    }
}

impl<'a> ProjectContext<'a> {
    /// Look up a node's type, if it exists
    pub fn find_node_type(&self, node: &Node) -> Option<&'a NodeType> {
        node.type_id
            .as_deref()
            .and_then(|type_id| self.project.node_type(type_id))
    }

    /// Look up a node's type, falling back to an empty node type
    pub fn node_type_by_node(&self, node: &Node) -> &NodeType {
        self.find_node_type(node).unwrap_or(&self.empty_node_type)
    }
}
