//! Project document - patches, node types, nodes, pins and links
//!
//! These are read-only projections of an authored project. Every field is
//! optional on the wire; lookups against missing data degrade to empty values
//! further down the pipeline rather than failing here.

use crate::lenient;
use crate::pin::{PinDirection, PinType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A whole project: authored patches plus the node types they instantiate
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Patch fragments keyed by patch id
    #[serde(default, deserialize_with = "lenient::map")]
    pub patches: IndexMap<String, Patch>,
    /// Node type definitions keyed by type id
    #[serde(default, deserialize_with = "lenient::map")]
    pub node_types: IndexMap<String, NodeType>,
}

impl Project {
    /// Create an empty project
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a patch, keyed by its id
    pub fn with_patch(mut self, patch: Patch) -> Self {
        let key = patch.id.clone().unwrap_or_else(|| self.patches.len().to_string());
        self.patches.insert(key, patch);
        self
    }

    /// Add a node type under the given type id
    pub fn with_node_type(mut self, type_id: impl Into<String>, node_type: NodeType) -> Self {
        self.node_types.insert(type_id.into(), node_type);
        self
    }

    /// Look up a node type by id
    pub fn node_type(&self, type_id: &str) -> Option<&NodeType> {
        self.node_types.get(type_id)
    }
}

/// A named fragment contributing nodes, pins and links
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::map")]
    pub nodes: IndexMap<String, Node>,
    #[serde(default, deserialize_with = "lenient::map")]
    pub pins: IndexMap<String, Pin>,
    #[serde(default, deserialize_with = "lenient::map")]
    pub links: IndexMap<String, Link>,
    /// Any other top-level keys, kept raw
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Patch {
    /// Create an empty patch
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Add a node, keyed by its id
    pub fn with_node(mut self, node: Node) -> Self {
        let key = node.id.clone().unwrap_or_default();
        self.nodes.insert(key, node);
        self
    }

    /// Add a pin instance, keyed by its id
    pub fn with_pin(mut self, pin: Pin) -> Self {
        let key = pin.id.clone().unwrap_or_default();
        self.pins.insert(key, pin);
        self
    }

    /// Add a link, keyed by its id
    pub fn with_link(mut self, link: Link) -> Self {
        let key = link.id.clone().unwrap_or_default();
        self.links.insert(key, link);
        self
    }

    /// Set an extra top-level entry
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Reusable behavior definition referenced from nodes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeType {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Pure marker, passed through as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pure: Option<Value>,
    /// Opaque setup payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<Value>,
    /// Opaque evaluate payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluate: Option<Value>,
    /// Declared pins keyed by pin key
    #[serde(default, deserialize_with = "lenient::map")]
    pub pins: IndexMap<String, NodeTypePin>,
}

impl NodeType {
    /// Create an empty node type
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pure marker
    pub fn pure(mut self, pure: bool) -> Self {
        self.pure = Some(Value::Bool(pure));
        self
    }

    /// Set the setup payload
    pub fn with_setup(mut self, setup: Value) -> Self {
        self.setup = Some(setup);
        self
    }

    /// Set the evaluate payload
    pub fn with_evaluate(mut self, evaluate: Value) -> Self {
        self.evaluate = Some(evaluate);
        self
    }

    /// Declare a pin, keyed by its key
    pub fn with_pin(mut self, pin: NodeTypePin) -> Self {
        let key = pin.key.clone().unwrap_or_default();
        self.pins.insert(key, pin);
        self
    }
}

/// Pin declaration on a node type
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeTypePin {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<PinDirection>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub pin_type: Option<PinType>,
}

impl NodeTypePin {
    /// Create an input pin declaration
    pub fn input(key: impl Into<String>, pin_type: impl Into<PinType>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Some(PinDirection::Input),
            pin_type: Some(pin_type.into()),
        }
    }

    /// Create an output pin declaration
    pub fn output(key: impl Into<String>, pin_type: impl Into<PinType>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Some(PinDirection::Output),
            pin_type: Some(pin_type.into()),
        }
    }

    /// Check the declared direction
    pub fn has_direction(&self, direction: &PinDirection) -> bool {
        self.direction.as_ref() == Some(direction)
    }
}

/// Node instance in the graph
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_id: Option<String>,
}

impl Node {
    /// Create a node of the given type
    pub fn new(id: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            type_id: Some(type_id.into()),
        }
    }
}

/// Pin instance bound to an owning node
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub node_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub key: Option<String>,
}

impl Pin {
    /// Create a pin instance for `key` on node `node_id`
    pub fn new(
        id: impl Into<String>,
        node_id: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            node_id: Some(node_id.into()),
            key: Some(key.into()),
        }
    }
}

/// Directed edge between two pin instances
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// `[source pin id, destination pin id]`
    #[serde(default, deserialize_with = "lenient::endpoints")]
    pub pins: Vec<Option<String>>,
}

impl Link {
    /// Create a link from pin `from` to pin `to`
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            pins: vec![Some(from.into()), Some(to.into())],
        }
    }

    /// Source pin id
    pub fn source(&self) -> Option<&str> {
        self.pins.first().and_then(|pin| pin.as_deref())
    }

    /// Destination pin id
    pub fn destination(&self) -> Option<&str> {
        self.pins.get(1).and_then(|pin| pin.as_deref())
    }
}
