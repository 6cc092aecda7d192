//! Link resolution - traces an output pin to the inputs it feeds
//!
//! ```text
//! NodeType.Pin ──► Pin instance ──► outgoing Links ──► destination Pin ──► { nodeId, key }
//! ```
//!
//! Fan-out is preserved: one output may feed any number of inputs, listed in
//! link declaration order without sorting or deduplication.

use crate::context::ProjectContext;
use crate::diagnostics::Diagnostic;
use pinflow_project::{Link, Node, NodeTypePin, Pin};
use serde::{Deserialize, Serialize};

/// Where an output value is delivered
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Receiving node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Input key on the receiving node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Destination {
    /// Create a destination
    pub fn new(node_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            node_id: Some(node_id.into()),
            key: Some(key.into()),
        }
    }

    /// Check if the destination could not be resolved
    pub fn is_empty(&self) -> bool {
        self.node_id.is_none() && self.key.is_none()
    }
}

impl From<&Pin> for Destination {
    fn from(pin: &Pin) -> Self {
        Self {
            node_id: pin.node_id.clone(),
            key: pin.key.clone(),
        }
    }
}

impl<'a> ProjectContext<'a> {
    /// Find the pin instance of `node_type_pin` on `owner`, first match wins
    pub fn pin_by_node_type_pin(&self, owner: &Node, node_type_pin: &NodeTypePin) -> Option<&Pin> {
        self.merged
            .pins()
            .values()
            .find(|pin| pin.node_id == owner.id && pin.key == node_type_pin.key)
    }

    /// Links whose source is `pin`, in declaration order
    pub fn outgoing_links(&self, pin: &Pin) -> Vec<&Link> {
        let Some(pin_id) = pin.id.as_deref() else {
            return Vec::new();
        };

        self.merged
            .links()
            .values()
            .filter(|link| link.source() == Some(pin_id))
            .collect()
    }

    /// Resolve a link's destination pin, `None` if the link dangles
    pub fn link_destination(&self, link: &Link) -> Option<Destination> {
        let pin_id = link.destination()?;
        self.merged.pin_by_id(pin_id).map(Destination::from)
    }

    /// Destinations fed by one output of `owner`
    ///
    /// A missing pin instance yields no destinations. A dangling link yields
    /// an empty destination in its slot.
    pub fn node_type_pin_out_links(
        &self,
        owner: &Node,
        node_type_pin: &NodeTypePin,
    ) -> Vec<Destination> {
        let pin_key = node_type_pin.key.as_deref().unwrap_or_default();
        self.resolve_pin_out_links(owner, pin_key, node_type_pin, &mut Vec::new())
    }

    /// Like [`node_type_pin_out_links`](Self::node_type_pin_out_links), recording
    /// a missing pin instance or dangling link in `diagnostics`
    pub fn resolve_pin_out_links(
        &self,
        owner: &Node,
        pin_key: &str,
        node_type_pin: &NodeTypePin,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Destination> {
        let Some(pin) = self.pin_by_node_type_pin(owner, node_type_pin) else {
            diagnostics.push(Diagnostic::MissingPinInstance {
                node: node_label(owner),
                pin_key: pin_key.to_string(),
            });
            return Vec::new();
        };

        self.outgoing_links(pin)
            .into_iter()
            .map(|link| {
                self.link_destination(link).unwrap_or_else(|| {
                    diagnostics.push(Diagnostic::DanglingLink {
                        link: link.id.clone().unwrap_or_default(),
                        pin: link.destination().map(str::to_string),
                    });
                    Destination::default()
                })
            })
            .collect()
    }
}

pub(crate) fn node_label(node: &Node) -> String {
    node.id.clone().unwrap_or_default()
}
