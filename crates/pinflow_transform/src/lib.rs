//! # Pinflow Transform
//!
//! Resolves an authored project into the flat node table the runtime
//! evaluates. Every node is paired with its type's behavior and input types,
//! and every output is traced one hop forward to the inputs it feeds.
//!
//! ## Architecture
//!
//! ```text
//! Project ──► Patch Merger ──► ProjectContext ──┬──► Type Resolver ──┐
//!                                               └──► Link Resolver ──┴──► Node Transformer ──► { nodeId: TransformedNode }
//! ```
//!
//! Resolution is total: missing node types, pin instances or link targets
//! degrade to empty values and are reported as [`Diagnostic`]s.
//!
//! ## Example
//!
//! ```ignore
//! use pinflow_transform::prelude::*;
//!
//! let project = Project::from_json(source)?;
//! let nodes = transform(&project);
//! let runtime_input = to_json_value(&nodes)?;
//! ```

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod links;
pub mod transform;
pub mod types;

pub use config::TransformConfig;
pub use context::ProjectContext;
pub use diagnostics::{Diagnostic, Severity};
pub use links::Destination;
pub use transform::{OutLink, TransformReport, TransformedNode, Transformer};
pub use types::{
    classify_pins, input_types, inputs, native_type, outputs, transformed_node_type, NativeType,
    TransformedNodeType,
};

use indexmap::IndexMap;
use pinflow_project::{Project, ProjectError};
use serde_json::Value;
use thiserror::Error;

/// Errors from the fallible transform entry points
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Invalid transform config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Strict transform rejected {warnings} degraded lookup(s), first: {first}")]
    Degraded { warnings: usize, first: Diagnostic },
}

/// Transform a project into runtime nodes keyed by node id
pub fn transform(project: &Project) -> IndexMap<String, TransformedNode> {
    Transformer::new(project).run().nodes
}

/// Parse a project from JSON and transform it
pub fn transform_json(source: &str) -> Result<IndexMap<String, TransformedNode>, TransformError> {
    let project = Project::from_json(source)?;
    Ok(transform(&project))
}

/// Render transformed nodes as the JSON document the runtime accepts
pub fn to_json_value(nodes: &IndexMap<String, TransformedNode>) -> serde_json::Result<Value> {
    serde_json::to_value(nodes)
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::TransformConfig;
    pub use crate::diagnostics::{Diagnostic, Severity};
    pub use crate::links::Destination;
    pub use crate::transform::{OutLink, TransformReport, TransformedNode, Transformer};
    pub use crate::types::NativeType;
    pub use crate::{to_json_value, transform, transform_json, TransformError};
    pub use pinflow_project::prelude::*;
}
