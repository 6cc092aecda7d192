//! # Pinflow Project - Document Model & Patch Merging
//!
//! A project is authored as independent patches, each contributing nodes,
//! pin instances and links, plus a project-level table of node types.
//! This crate reads that document and folds the patches into one namespace.
//!
//! ## Architecture
//!
//! ```text
//! JSON ──► Project ──► merge_patches ──► MergedPatch { nodes, pins, links }
//!             │
//!             └──► nodeTypes (project level, not merged)
//! ```
//!
//! ## Key Concepts
//!
//! - **Patch**: A fragment of the graph, merged away after combination
//! - **NodeType**: A reusable behavior template with declared pins
//! - **Node**: An instance of a node type
//! - **Pin**: A per-node instantiation of a declared pin
//! - **Link**: A directed edge from one pin instance to another

pub mod model;
pub mod pin;
pub mod merge;
mod lenient;

pub use model::{Project, Patch, NodeType, NodeTypePin, Node, Pin, Link};
pub use pin::{PinDirection, PinType};
pub use merge::{MergedPatch, merge_patches};

use serde_json::Value;
use thiserror::Error;

/// Errors from reading a project document
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Project document must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

impl Project {
    /// Parse a project from JSON text
    pub fn from_json(source: &str) -> Result<Self, ProjectError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Build a project from an already parsed JSON document
    pub fn from_value(value: Value) -> Result<Self, ProjectError> {
        if !value.is_object() {
            return Err(ProjectError::NotAnObject(lenient::kind(&value)));
        }

        let project: Project = serde_json::from_value(value)?;
        log::debug!(
            "Loaded project with {} patches and {} node types",
            project.patches.len(),
            project.node_types.len(),
        );
        Ok(project)
    }
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::model::{Project, Patch, NodeType, NodeTypePin, Node, Pin, Link};
    pub use crate::pin::{PinDirection, PinType};
    pub use crate::merge::{MergedPatch, merge_patches};
    pub use crate::ProjectError;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            Project::from_json("[1, 2]"),
            Err(ProjectError::NotAnObject("an array"))
        ));
        assert!(matches!(
            Project::from_json("{ not json"),
            Err(ProjectError::Json(_))
        ));
    }

    #[test]
    fn test_from_json_empty_object() {
        let project = Project::from_json("{}").unwrap();
        assert!(project.patches.is_empty());
        assert!(project.node_types.is_empty());
    }
}
