//! Node transformation - the flat records handed to the runtime
//!
//! Each node becomes its id, its type's behavior fields and input types,
//! and the list of live destinations of its outputs. Outputs that feed
//! nothing are left out entirely.

use crate::config::TransformConfig;
use crate::context::ProjectContext;
use crate::diagnostics::Diagnostic;
use crate::links::{node_label, Destination};
use crate::types::{outputs, transformed_node_type, NativeType};
use crate::TransformError;
use indexmap::IndexMap;
use pinflow_project::{Node, NodeType, PinDirection, PinType, Project};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// One live output connection, serialized as `{ pinKey: { nodeId, key } }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutLink {
    /// Output pin key on the owning node's type
    pub pin_key: String,
    pub destination: Destination,
}

impl OutLink {
    pub fn new(pin_key: impl Into<String>, destination: Destination) -> Self {
        Self {
            pin_key: pin_key.into(),
            destination,
        }
    }
}

impl Serialize for OutLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.pin_key, &self.destination)?;
        map.end()
    }
}

/// A node in the shape the runtime consumes
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pure: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluate: Option<Value>,
    pub input_types: IndexMap<String, NativeType>,
    /// Grouped by output in declaration order, then by link order
    pub out_links: Vec<OutLink>,
}

impl TransformedNode {
    /// Destinations regrouped per output pin
    pub fn out_links_by_pin(&self) -> IndexMap<&str, Vec<&Destination>> {
        let mut grouped: IndexMap<&str, Vec<&Destination>> = IndexMap::new();
        for link in &self.out_links {
            grouped
                .entry(link.pin_key.as_str())
                .or_default()
                .push(&link.destination);
        }
        grouped
    }
}

/// Result of a full transform run
#[derive(Clone, Debug, Default)]
pub struct TransformReport {
    /// Transformed nodes keyed by node id
    pub nodes: IndexMap<String, TransformedNode>,
    /// Every degraded lookup, in resolution order
    pub diagnostics: Vec<Diagnostic>,
}

impl TransformReport {
    /// Diagnostics of warning severity
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    /// Check for any warning
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

/// Turns a project into the runtime's node table
pub struct Transformer<'a> {
    context: ProjectContext<'a>,
    config: TransformConfig,
}

impl<'a> Transformer<'a> {
    /// Create a transformer with default configuration
    pub fn new(project: &'a Project) -> Self {
        Self::with_config(project, TransformConfig::default())
    }

    /// Create a transformer with the given configuration
    pub fn with_config(project: &'a Project, config: TransformConfig) -> Self {
        Self {
            context: ProjectContext::new(project),
            config,
        }
    }

    /// The resolution context
    pub fn context(&self) -> &ProjectContext<'a> {
        &self.context
    }

    /// The configuration
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transform a single node
    pub fn transformed_node(&self, node: &Node) -> TransformedNode {
        self.resolve_node(node, &mut Vec::new())
    }

    /// Live output destinations of a node
    pub fn node_out_links(&self, node: &Node) -> Vec<OutLink> {
        self.resolve_out_links(node, self.context.node_type_by_node(node), &mut Vec::new())
    }

    /// Transform every node of the merged patch
    pub fn run(&self) -> TransformReport {
        let mut diagnostics = Vec::new();

        for (type_id, node_type) in &self.context.project().node_types {
            check_pin_types(type_id, node_type, &mut diagnostics);
        }

        let nodes: IndexMap<String, TransformedNode> = self
            .context
            .merged()
            .nodes()
            .iter()
            .map(|(id, node)| (id.clone(), self.resolve_node(node, &mut diagnostics)))
            .collect();

        if self.config.log_diagnostics {
            diagnostics.iter().for_each(Diagnostic::log);
        }

        let report = TransformReport { nodes, diagnostics };
        log::debug!(
            "Transformed {} nodes ({} diagnostics, {} warnings)",
            report.nodes.len(),
            report.diagnostics.len(),
            report.warnings().count(),
        );
        report
    }

    /// Like `run`, but strict mode rejects any warning
    pub fn try_run(&self) -> Result<TransformReport, TransformError> {
        let report = self.run();
        if !self.config.strict {
            return Ok(report);
        }

        let warnings = report.warnings().count();
        let first = report.warnings().next().cloned();
        match first {
            Some(first) => Err(TransformError::Degraded { warnings, first }),
            None => Ok(report),
        }
    }

    fn resolve_node(&self, node: &Node, diagnostics: &mut Vec<Diagnostic>) -> TransformedNode {
        let node_type = match self.context.find_node_type(node) {
            Some(node_type) => node_type,
            None => {
                diagnostics.push(Diagnostic::MissingNodeType {
                    node: node_label(node),
                    type_id: node.type_id.clone(),
                });
                self.context.node_type_by_node(node)
            }
        };

        let behavior = transformed_node_type(node_type);
        TransformedNode {
            id: node.id.clone(),
            pure: behavior.pure,
            setup: behavior.setup,
            evaluate: behavior.evaluate,
            input_types: behavior.input_types,
            out_links: self.resolve_out_links(node, node_type, diagnostics),
        }
    }

    fn resolve_out_links(
        &self,
        node: &Node,
        node_type: &NodeType,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<OutLink> {
        outputs(node_type)
            .into_iter()
            .flat_map(|(key, node_type_pin)| {
                self.context
                    .resolve_pin_out_links(node, key, node_type_pin, diagnostics)
                    .into_iter()
                    .map(move |destination| OutLink::new(key, destination))
            })
            .collect()
    }
}

fn check_pin_types(type_id: &str, node_type: &NodeType, diagnostics: &mut Vec<Diagnostic>) {
    for (key, pin) in &node_type.pins {
        if !pin.has_direction(&PinDirection::Input) {
            continue;
        }
        match &pin.pin_type {
            None => diagnostics.push(Diagnostic::UndeclaredPinType {
                node_type: type_id.to_string(),
                pin_key: key.clone(),
            }),
            Some(PinType::Other(tag)) => diagnostics.push(Diagnostic::UnrecognizedPinType {
                node_type: type_id.to_string(),
                pin_key: key.clone(),
                tag: tag.clone(),
            }),
            Some(_) => {}
        }
    }
}
